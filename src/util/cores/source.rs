//! OS query seams used by the core-count strategies.
//!
//! Each strategy is generic over the queries it performs so its fallback
//! chain can be exercised on any host. The real implementations live in
//! [`super::sys`]; tests substitute fixed values.

use std::ffi::CStr;
use std::fmt;

// ─────────────────────────────────────────────────────────────────────────────
// sysconf
// ─────────────────────────────────────────────────────────────────────────────

/// `sysconf(_SC_NPROCESSORS_ONLN)`.
pub trait Sysconf {
    /// Raw return value: the number of online processors, or `-1` when the
    /// value cannot be queried.
    fn nprocessors_onln(&self) -> i64;
}

/// Returns the sysconf processor count, or `None` when it is unavailable.
///
/// Only `-1` is documented as "not queryable"; any other non-positive value
/// is treated the same way so callers never see 0.
pub(crate) fn online_processors<S: Sysconf + ?Sized>(sysconf: &S) -> Option<usize> {
    let n = sysconf.nprocessors_onln();
    if n < 1 {
        None
    } else {
        Some(n as usize)
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// sysctl
// ─────────────────────────────────────────────────────────────────────────────

/// Failure of a `sysctlbyname` read.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SysctlError {
    /// The key does not exist on this kernel (`ENOENT`).
    NotFound,
    /// Any other errno.
    Os(i32),
}

impl fmt::Display for SysctlError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SysctlError::NotFound => f.write_str("sysctl key not found"),
            SysctlError::Os(errno) => write!(f, "sysctl failed with errno {errno}"),
        }
    }
}

impl std::error::Error for SysctlError {}

/// `sysctlbyname(key, &value, sizeof(int32_t), NULL, 0)`.
pub trait Sysctl {
    fn read_i32(&self, key: &CStr) -> Result<i32, SysctlError>;
}

// ─────────────────────────────────────────────────────────────────────────────
// Windows logical-processor enumeration
// ─────────────────────────────────────────────────────────────────────────────

/// `LOGICAL_PROCESSOR_RELATIONSHIP` from winnt.h.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Relationship {
    ProcessorCore,
    NumaNode,
    Cache,
    ProcessorPackage,
    Group,
    Other(u32),
}

impl Relationship {
    /// Maps the raw winnt.h discriminant.
    pub fn from_raw(raw: u32) -> Self {
        match raw {
            0 => Relationship::ProcessorCore,
            1 => Relationship::NumaNode,
            2 => Relationship::Cache,
            3 => Relationship::ProcessorPackage,
            4 => Relationship::Group,
            other => Relationship::Other(other),
        }
    }
}

/// One `SYSTEM_LOGICAL_PROCESSOR_INFORMATION` record, reduced to the fields
/// the core count needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LogicalProcessor {
    pub relationship: Relationship,
    /// Affinity mask of the logical processors covered by this record.
    pub processor_mask: u64,
}

/// Processor topology queries available on Windows.
pub trait ProcessorInfo {
    /// Full `GetLogicalProcessorInformation` result.
    ///
    /// `None` when the API is not exported by kernel32 or fails with anything
    /// other than `ERROR_INSUFFICIENT_BUFFER`.
    fn logical_processors(&self) -> Option<Vec<LogicalProcessor>>;

    /// `GetSystemInfo().dwNumberOfProcessors`.
    fn system_processor_count(&self) -> u32;
}
