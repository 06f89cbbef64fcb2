//! Apple strategy: `hw.logicalcpu` (see sysctl(3)).

use super::source::Sysctl;
use super::CoreCounter;
use crate::config::{FALLBACK_CORE_COUNT, SYSCTL_HW_LOGICALCPU};
use crate::displaylevel;

#[derive(Debug, Clone, Default)]
pub struct DarwinCounter<C> {
    sysctl: C,
}

impl<C: Sysctl> DarwinCounter<C> {
    pub fn new(sysctl: C) -> Self {
        DarwinCounter { sysctl }
    }
}

impl<C: Sysctl> CoreCounter for DarwinCounter<C> {
    fn count_cores(&self) -> usize {
        match self.sysctl.read_i32(SYSCTL_HW_LOGICALCPU) {
            Ok(n) if n >= 1 => n as usize,
            Ok(n) => {
                displaylevel!(4, "cores: hw.logicalcpu reported {}, using {}\n", n, FALLBACK_CORE_COUNT);
                FALLBACK_CORE_COUNT
            }
            Err(e) => {
                displaylevel!(4, "cores: hw.logicalcpu: {}, using {}\n", e, FALLBACK_CORE_COUNT);
                FALLBACK_CORE_COUNT
            }
        }
    }
}
