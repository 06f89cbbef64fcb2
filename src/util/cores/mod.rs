//! CPU core counting (`UTIL_countCores`, util.c).
//!
//! Every supported platform has its own strategy type implementing
//! [`CoreCounter`]; exactly one of them is selected for the build target as
//! [`HostCounter`]. The strategies are generic over the OS queries they issue
//! (see [`source`]), so each fallback chain can be driven with fixed values
//! on any host.
//!
//! | Target                              | Strategy            |
//! |-------------------------------------|---------------------|
//! | Windows                             | [`WindowsCounter`]  |
//! | Apple                               | [`DarwinCounter`]   |
//! | Linux, Android                      | [`LinuxCounter`]    |
//! | FreeBSD                             | [`FreeBsdCounter`]  |
//! | NetBSD, OpenBSD, DragonFly, Cygwin  | [`SysconfCounter`]  |
//! | anything else                       | [`UnknownCounter`]  |
//!
//! [`count_cores`] memoizes the host result for the lifetime of the process.

use std::sync::OnceLock;

use crate::config::FALLBACK_CORE_COUNT;

pub mod darwin;
pub mod freebsd;
pub mod linux;
pub mod source;
pub mod sys;
pub mod sysconf;
pub mod windows;

pub use darwin::DarwinCounter;
pub use freebsd::FreeBsdCounter;
pub use linux::{parse_cpuinfo, read_cpuinfo, CpuinfoError, HyperthreadInfo, LinuxCounter};
pub use source::{LogicalProcessor, ProcessorInfo, Relationship, Sysconf, Sysctl, SysctlError};
pub use sysconf::SysconfCounter;
pub use windows::{count_set_bits, WindowsCounter};

/// Reports how many processing units the process can use.
pub trait CoreCounter {
    /// Best-effort logical core count. Implementations never return 0.
    fn count_cores(&self) -> usize;
}

impl<T: CoreCounter + ?Sized> CoreCounter for &T {
    fn count_cores(&self) -> usize {
        (**self).count_cores()
    }
}

impl<T: CoreCounter + ?Sized> CoreCounter for Box<T> {
    fn count_cores(&self) -> usize {
        (**self).count_cores()
    }
}

/// Targets with no detection at all.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnknownCounter;

impl CoreCounter for UnknownCounter {
    fn count_cores(&self) -> usize {
        FALLBACK_CORE_COUNT
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Host strategy selection
// ─────────────────────────────────────────────────────────────────────────────

#[cfg(windows)]
pub type HostCounter = WindowsCounter<sys::Kernel32>;
#[cfg(windows)]
pub const HOST_STRATEGY: &str = "GetLogicalProcessorInformation";

#[cfg(target_vendor = "apple")]
pub type HostCounter = DarwinCounter<sys::HostSysctl>;
#[cfg(target_vendor = "apple")]
pub const HOST_STRATEGY: &str = "sysctl hw.logicalcpu";

#[cfg(any(target_os = "linux", target_os = "android"))]
pub type HostCounter = LinuxCounter<sys::HostSysconf>;
#[cfg(any(target_os = "linux", target_os = "android"))]
pub const HOST_STRATEGY: &str = "sysconf + /proc/cpuinfo";

#[cfg(target_os = "freebsd")]
pub type HostCounter = FreeBsdCounter<sys::HostSysctl, sys::HostSysconf>;
#[cfg(target_os = "freebsd")]
pub const HOST_STRATEGY: &str = "sysctl kern.smp";

#[cfg(cores_posix_sysconf)]
pub type HostCounter = SysconfCounter<sys::HostSysconf>;
#[cfg(cores_posix_sysconf)]
pub const HOST_STRATEGY: &str = "sysconf";

#[cfg(not(any(
    windows,
    target_vendor = "apple",
    target_os = "linux",
    target_os = "android",
    target_os = "freebsd",
    cores_posix_sysconf
)))]
pub type HostCounter = UnknownCounter;
#[cfg(not(any(
    windows,
    target_vendor = "apple",
    target_os = "linux",
    target_os = "android",
    target_os = "freebsd",
    cores_posix_sysconf
)))]
pub const HOST_STRATEGY: &str = "none";

/// Builds the strategy selected for the build target.
pub fn host_counter() -> HostCounter {
    #[cfg(windows)]
    {
        WindowsCounter::new(sys::Kernel32)
    }
    #[cfg(target_vendor = "apple")]
    {
        DarwinCounter::new(sys::HostSysctl)
    }
    #[cfg(any(target_os = "linux", target_os = "android"))]
    {
        LinuxCounter::new(sys::HostSysconf)
    }
    #[cfg(target_os = "freebsd")]
    {
        FreeBsdCounter::new(sys::HostSysctl, sys::HostSysconf)
    }
    #[cfg(cores_posix_sysconf)]
    {
        SysconfCounter::new(sys::HostSysconf)
    }
    #[cfg(not(any(
        windows,
        target_vendor = "apple",
        target_os = "linux",
        target_os = "android",
        target_os = "freebsd",
        cores_posix_sysconf
    )))]
    {
        UnknownCounter
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// Memoized entry point
// ─────────────────────────────────────────────────────────────────────────────

static NUM_CORES: OnceLock<usize> = OnceLock::new();

/// Returns the number of logical CPU cores available on the system.
///
/// The OS is queried on the first call only; every later call returns the
/// same value. Concurrent first calls are serialized, so the query runs once.
///
/// Guaranteed to return a value >= 1.
pub fn count_cores() -> usize {
    *NUM_CORES.get_or_init(count_cores_uncached)
}

/// Runs the host strategy without consulting or filling the cache.
pub fn count_cores_uncached() -> usize {
    host_counter().count_cores().max(FALLBACK_CORE_COUNT)
}
