use crate::args::defaults::{
    DEFAULT_CONCAVE_K, DEFAULT_CONCAVE_UNIT, DEFAULT_INVERSE_SQRT_FLOOR,
    DEFAULT_INVERSE_SQRT_SCALE,
};
use std::fmt::{Display, Formatter};
use std::time::Duration;

/// How the units of a batch are spread over time.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ArrivalPolicy {
    /// Every unit is launched at once.
    Burst,
    /// After launch `i` wait `max(0, i * k - i^2) * unit`: the gap grows up to `i = k / 2`,
    /// shrinks back and collapses to zero from `i = k` on.
    ConcaveRamp { k: u64, unit: Duration },
    /// After each launch wait `scale / sqrt(completed)`, never less than `floor`, so the send
    /// rate rises as responses come back.
    InverseSqrtRamp { scale: Duration, floor: Duration },
}

impl ArrivalPolicy {
    pub fn concave() -> Self {
        ArrivalPolicy::ConcaveRamp {
            k: DEFAULT_CONCAVE_K,
            unit: DEFAULT_CONCAVE_UNIT.get_duration(),
        }
    }

    pub fn inverse_sqrt() -> Self {
        ArrivalPolicy::InverseSqrtRamp {
            scale: DEFAULT_INVERSE_SQRT_SCALE.get_duration(),
            floor: DEFAULT_INVERSE_SQRT_FLOOR.get_duration(),
        }
    }

    /// Delay to apply after the launch with index `launched` (0-based), given how many units
    /// of the batch have completed so far.
    pub fn delay(&self, launched: u64, completed: u64) -> Duration {
        match *self {
            ArrivalPolicy::Burst => Duration::ZERO,
            ArrivalPolicy::ConcaveRamp { k, unit } => {
                let i = launched as i128;
                let weight = i * k as i128 - i * i;
                if weight <= 0 {
                    return Duration::ZERO;
                }
                unit.saturating_mul(u32::try_from(weight).unwrap_or(u32::MAX))
            }
            ArrivalPolicy::InverseSqrtRamp { scale, floor } => {
                let completed = completed.max(1) as f64;
                scale.div_f64(completed.sqrt()).max(floor)
            }
        }
    }

    pub fn is_ramp(&self) -> bool {
        !matches!(self, ArrivalPolicy::Burst)
    }
}

impl Display for ArrivalPolicy {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ArrivalPolicy::Burst => write!(f, "burst"),
            ArrivalPolicy::ConcaveRamp { k, unit } => {
                write!(f, "concave ramp (k = {k}, unit = {unit:?})")
            }
            ArrivalPolicy::InverseSqrtRamp { scale, floor } => {
                write!(f, "inverse sqrt ramp (scale = {scale:?}, floor = {floor:?})")
            }
        }
    }
}
