use crate::utils::duration::StrainDuration;
use nonzero_lit::u32;
use std::num::NonZeroU32;

pub const DEFAULT_ITERATIONS: NonZeroU32 = u32!(1);
pub const DEFAULT_REQUESTS_PER_ITERATION: NonZeroU32 = u32!(100);
pub const DEFAULT_SEARCH_INCREMENT: NonZeroU32 = u32!(10);

pub const DEFAULT_TIMEOUT: StrainDuration = StrainDuration::from_secs(30);
pub const DEFAULT_CONNECT_TIMEOUT: StrainDuration = StrainDuration::from_secs(10);
pub const DEFAULT_PROGRESS_CHANNEL_CAPACITY: usize = 1024;

pub const DEFAULT_CONCAVE_K: u64 = 50;
pub const DEFAULT_CONCAVE_UNIT: StrainDuration = StrainDuration::from_millis(1);
pub const DEFAULT_INVERSE_SQRT_SCALE: StrainDuration = StrainDuration::from_millis(100);
pub const DEFAULT_INVERSE_SQRT_FLOOR: StrainDuration = StrainDuration::from_millis(1);

pub const CONFIG_PATH_ENV: &str = "STRAIN_CONFIG_PATH";
pub const ENV_PREFIX: &str = "STRAIN_";
