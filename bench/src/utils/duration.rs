use humantime::format_duration;
use serde::de::{self, Visitor};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::{
    fmt::{Display, Formatter},
    str::FromStr,
    time::Duration,
};

/// Human readable duration, e.g. `10s`, `250ms` or `1m 30s`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct StrainDuration {
    duration: Duration,
}

impl StrainDuration {
    pub const fn new(duration: Duration) -> StrainDuration {
        StrainDuration { duration }
    }

    pub const fn from_millis(millis: u64) -> StrainDuration {
        StrainDuration::new(Duration::from_millis(millis))
    }

    pub const fn from_secs(secs: u64) -> StrainDuration {
        StrainDuration::new(Duration::from_secs(secs))
    }

    pub fn as_human_time_string(&self) -> String {
        format!("{}", format_duration(self.duration))
    }

    pub fn get_duration(&self) -> Duration {
        self.duration
    }

    pub fn is_zero(&self) -> bool {
        self.duration.is_zero()
    }
}

impl FromStr for StrainDuration {
    type Err = humantime::DurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = &s.trim().to_lowercase();
        if s == "0" || s == "none" {
            Ok(StrainDuration::default())
        } else {
            Ok(StrainDuration::new(humantime::parse_duration(s)?))
        }
    }
}

impl From<Duration> for StrainDuration {
    fn from(duration: Duration) -> Self {
        StrainDuration::new(duration)
    }
}

impl Display for StrainDuration {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_human_time_string())
    }
}

impl Serialize for StrainDuration {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.as_human_time_string())
    }
}

struct StrainDurationVisitor;

impl Visitor<'_> for StrainDurationVisitor {
    type Value = StrainDuration;

    fn expecting(&self, formatter: &mut Formatter) -> std::fmt::Result {
        formatter.write_str("a duration such as \"10s\" or a number of seconds")
    }

    fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        StrainDuration::from_str(value).map_err(de::Error::custom)
    }

    fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(StrainDuration::from_secs(value))
    }

    fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u64::try_from(value)
            .map(StrainDuration::from_secs)
            .map_err(|_| de::Error::custom("duration cannot be negative"))
    }
}

impl<'de> Deserialize<'de> for StrainDuration {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(StrainDurationVisitor)
    }
}
