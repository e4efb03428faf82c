use super::{DEFAULT_TICKS_PER_SECOND, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn clock_ticks_per_second() -> u64 {
        DEFAULT_TICKS_PER_SECOND
    }
}
