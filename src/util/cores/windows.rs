//! Windows strategy: sum the affinity masks of every `RelationProcessorCore`
//! record from `GetLogicalProcessorInformation`, falling back on
//! `GetSystemInfo` when that API is unavailable.

use super::source::{ProcessorInfo, Relationship};
use super::CoreCounter;
use crate::config::FALLBACK_CORE_COUNT;
use crate::displaylevel;

/// Number of set bits in a processor affinity mask.
#[inline]
pub fn count_set_bits(mask: u64) -> u32 {
    mask.count_ones()
}

#[derive(Debug, Clone, Default)]
pub struct WindowsCounter<P> {
    info: P,
}

impl<P: ProcessorInfo> WindowsCounter<P> {
    pub fn new(info: P) -> Self {
        WindowsCounter { info }
    }

    fn system_info_count(&self) -> usize {
        match self.info.system_processor_count() {
            0 => FALLBACK_CORE_COUNT,
            n => n as usize,
        }
    }
}

impl<P: ProcessorInfo> CoreCounter for WindowsCounter<P> {
    fn count_cores(&self) -> usize {
        let Some(records) = self.info.logical_processors() else {
            displaylevel!(4, "cores: GetLogicalProcessorInformation unavailable, using GetSystemInfo\n");
            return self.system_info_count();
        };

        let logical: usize = records
            .iter()
            .filter(|r| r.relationship == Relationship::ProcessorCore)
            .map(|r| count_set_bits(r.processor_mask) as usize)
            .sum();

        if logical == 0 {
            displaylevel!(4, "cores: no processor core records, using {}\n", FALLBACK_CORE_COUNT);
            FALLBACK_CORE_COUNT
        } else {
            logical
        }
    }
}
