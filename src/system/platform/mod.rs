pub trait PlatformExtensions {
    /// Clock ticks per second used by per-process CPU counters (`USER_HZ`).
    fn clock_ticks_per_second() -> u64;
}

/// Kernel default for `USER_HZ`.
pub const DEFAULT_TICKS_PER_SECOND: u64 = 100;

#[cfg(target_os = "linux")]
mod linux;
#[cfg(not(target_os = "linux"))]
mod fallback;

#[cfg(target_os = "linux")]
use linux as platform_impl;
#[cfg(not(target_os = "linux"))]
use fallback as platform_impl;

pub fn clock_ticks_per_second() -> u64 {
    platform_impl::Platform::clock_ticks_per_second()
}
