//! Plain POSIX strategy: NetBSD, OpenBSD, DragonFly and Cygwin.
//!
//! See sysconf(3).

use super::source::{online_processors, Sysconf};
use super::CoreCounter;
use crate::config::FALLBACK_CORE_COUNT;
use crate::displaylevel;

/// Online processor count from `sysconf`, or 1 when it cannot be queried.
#[derive(Debug, Clone, Default)]
pub struct SysconfCounter<S> {
    sysconf: S,
}

impl<S: Sysconf> SysconfCounter<S> {
    pub fn new(sysconf: S) -> Self {
        SysconfCounter { sysconf }
    }
}

impl<S: Sysconf> CoreCounter for SysconfCounter<S> {
    fn count_cores(&self) -> usize {
        match online_processors(&self.sysconf) {
            Some(n) => n,
            None => {
                displaylevel!(4, "cores: sysconf(_SC_NPROCESSORS_ONLN) unavailable, using {}\n", FALLBACK_CORE_COUNT);
                FALLBACK_CORE_COUNT
            }
        }
    }
}
