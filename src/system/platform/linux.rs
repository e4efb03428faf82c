use super::{DEFAULT_TICKS_PER_SECOND, PlatformExtensions};

pub struct Platform;

impl PlatformExtensions for Platform {
    fn clock_ticks_per_second() -> u64 {
        // SAFETY: sysconf has no preconditions and only reads a constant.
        let ticks = unsafe { libc::sysconf(libc::_SC_CLK_TCK) };
        if ticks <= 0 {
            DEFAULT_TICKS_PER_SECOND
        } else {
            ticks as u64
        }
    }
}
