// config.rs: Compile-time configuration constants.
// Migrated from the literals scattered through UTIL_countCores (util.c).
//
// Strategy selection itself is not configured here: it is fixed per target by
// `cfg(target_os)` in `util::cores` plus the `cores_posix_sysconf` cfg emitted
// by build.rs.

use std::ffi::CStr;

// Core count reported when every platform query fails, and on targets with no
// detection at all. Corresponds to the `numCores = 1` fallbacks in util.c.
pub const FALLBACK_CORE_COUNT: usize = 1;

// Location of the Linux per-processor description read for the
// hyperthreading refinement.
pub const CPUINFO_PATH: &str = "/proc/cpuinfo";

// Field prefixes matched (with strncmp semantics) in /proc/cpuinfo.
pub const CPUINFO_SIBLINGS: &str = "siblings";
pub const CPUINFO_CPU_CORES: &str = "cpu cores";

// Darwin: logical CPUs available in the current power management mode.
pub const SYSCTL_HW_LOGICALCPU: &CStr = c"hw.logicalcpu";

// FreeBSD (>= 13.0): physical cores and SMT threads per core.
// See smp(4).
pub const SYSCTL_KERN_SMP_CORES: &CStr = c"kern.smp.cores";
pub const SYSCTL_KERN_SMP_THREADS_PER_CORE: &CStr = c"kern.smp.threads_per_core";
