//! FreeBSD strategy: physical cores times SMT threads, via smp(4) sysctls.
//!
//! `kern.smp.cores` appeared in FreeBSD 13.0. On older kernels the key is
//! missing and the strategy falls through to `sysconf`.

use super::source::{online_processors, Sysconf, Sysctl, SysctlError};
use super::CoreCounter;
use crate::config::{FALLBACK_CORE_COUNT, SYSCTL_KERN_SMP_CORES, SYSCTL_KERN_SMP_THREADS_PER_CORE};
use crate::displaylevel;

#[derive(Debug, Clone, Default)]
pub struct FreeBsdCounter<C, S> {
    sysctl: C,
    sysconf: S,
}

impl<C: Sysctl, S: Sysconf> FreeBsdCounter<C, S> {
    pub fn new(sysctl: C, sysconf: S) -> Self {
        FreeBsdCounter { sysctl, sysconf }
    }

    /// `kern.smp.cores * kern.smp.threads_per_core`, or the physical count
    /// alone when the per-core thread count cannot be read.
    fn smp_count(&self) -> Result<i64, SysctlError> {
        let cores = self.sysctl.read_i32(SYSCTL_KERN_SMP_CORES)?;
        match self.sysctl.read_i32(SYSCTL_KERN_SMP_THREADS_PER_CORE) {
            Ok(per_core) => Ok(i64::from(cores) * i64::from(per_core)),
            Err(e) => {
                displaylevel!(4, "cores: kern.smp.threads_per_core: {}, using physical count\n", e);
                Ok(i64::from(cores))
            }
        }
    }
}

impl<C: Sysctl, S: Sysconf> CoreCounter for FreeBsdCounter<C, S> {
    fn count_cores(&self) -> usize {
        match self.smp_count() {
            Ok(n) if n >= 1 => return usize::try_from(n).unwrap_or(usize::MAX),
            Ok(n) => {
                displaylevel!(4, "cores: kern.smp reported {} cores, trying sysconf\n", n);
            }
            Err(SysctlError::NotFound) => {
                displaylevel!(4, "cores: kern.smp.cores not present, trying sysconf\n");
            }
            Err(e) => {
                // Unexpected errno: reported, never fatal.
                displaylevel!(1, "{}: can't get number of cpus: {}\n", crate::cli::constants::PROGRAM_NAME, e);
            }
        }

        match online_processors(&self.sysconf) {
            Some(n) => n,
            None => {
                displaylevel!(4, "cores: sysconf(_SC_NPROCESSORS_ONLN) unavailable, using {}\n", FALLBACK_CORE_COUNT);
                FALLBACK_CORE_COUNT
            }
        }
    }
}
