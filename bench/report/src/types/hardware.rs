use serde::{Deserialize, Serialize};
use sysinfo::System;

const UNKNOWN: &str = "unknown";

/// The machine the load was generated from.
///
/// Throughput and breaking points are only comparable between runs from similar hosts, so the
/// report keeps enough to tell them apart.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
pub struct HostHardware {
    /// Caller supplied label, the hostname when none was given.
    pub identifier: String,
    pub cpu: String,
    pub logical_cores: usize,
    pub memory_mb: u64,
    pub os: String,
}

impl HostHardware {
    pub fn snapshot(identifier: Option<String>) -> Self {
        let mut sys = System::new();
        sys.refresh_cpu_all();
        sys.refresh_memory();

        let cpu = sys
            .cpus()
            .first()
            .map(|cpu| cpu.brand().trim().to_owned())
            .filter(|brand| !brand.is_empty())
            .unwrap_or_else(|| UNKNOWN.to_owned());
        let os = match (System::name(), System::os_version()) {
            (Some(name), Some(version)) => format!("{name} {version}"),
            (Some(name), None) => name,
            _ => UNKNOWN.to_owned(),
        };

        Self {
            identifier: identifier.unwrap_or_else(local_hostname),
            cpu,
            logical_cores: sys.cpus().len(),
            memory_mb: sys.total_memory() / 1024 / 1024,
            os,
        }
    }

    /// One-line description used in summaries and chart subtitles.
    pub fn describe(&self) -> String {
        format!(
            "{}: {}, {} cores, {} MB RAM, {}",
            self.identifier, self.cpu, self.logical_cores, self.memory_mb, self.os
        )
    }
}

fn local_hostname() -> String {
    hostname::get()
        .ok()
        .map(|name| name.to_string_lossy().into_owned())
        .filter(|name| !name.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_identifier_should_win_over_hostname() {
        let hardware = HostHardware::snapshot(Some("ci-runner".to_owned()));

        assert_eq!(hardware.identifier, "ci-runner");
        assert!(hardware.describe().starts_with("ci-runner: "));
    }

    #[test]
    fn missing_identifier_should_fall_back_to_hostname() {
        let hardware = HostHardware::snapshot(None);

        assert!(!hardware.identifier.is_empty());
        assert!(!hardware.os.is_empty());
    }
}
