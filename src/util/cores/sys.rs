//! Host implementations of the OS query seams.

#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
use std::ffi::CStr;

#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
use super::source::{Sysctl, SysctlError};

#[cfg(unix)]
use super::source::Sysconf;

#[cfg(windows)]
use super::source::{LogicalProcessor, ProcessorInfo, Relationship};

// ─────────────────────────────────────────────────────────────────────────────
// sysconf(3)
// ─────────────────────────────────────────────────────────────────────────────

/// `sysconf(_SC_NPROCESSORS_ONLN)` through libc.
#[cfg(unix)]
#[derive(Debug, Clone, Copy, Default)]
pub struct HostSysconf;

#[cfg(unix)]
impl Sysconf for HostSysconf {
    fn nprocessors_onln(&self) -> i64 {
        // SAFETY: sysconf has no memory-safety preconditions.
        let n = unsafe { libc::sysconf(libc::_SC_NPROCESSORS_ONLN) };
        n as i64
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// sysctlbyname(3)
// ─────────────────────────────────────────────────────────────────────────────

/// `sysctlbyname` reads of native `int` values.
#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
#[derive(Debug, Clone, Copy, Default)]
pub struct HostSysctl;

#[cfg(any(target_vendor = "apple", target_os = "freebsd"))]
impl Sysctl for HostSysctl {
    fn read_i32(&self, key: &CStr) -> Result<i32, SysctlError> {
        use nix::errno::Errno;

        let mut value: libc::c_int = 0;
        let mut size = std::mem::size_of::<libc::c_int>();
        // SAFETY: `key` is NUL-terminated, `value` and `size` are valid for
        // writes and `size` describes `value` exactly; no new value is set.
        let ret = unsafe {
            libc::sysctlbyname(
                key.as_ptr(),
                (&mut value as *mut libc::c_int).cast(),
                &mut size,
                std::ptr::null_mut::<libc::c_void>(),
                0,
            )
        };
        if ret == 0 {
            return Ok(value);
        }
        match Errno::last() {
            Errno::ENOENT => Err(SysctlError::NotFound),
            errno => Err(SysctlError::Os(errno as i32)),
        }
    }
}

// ─────────────────────────────────────────────────────────────────────────────
// kernel32
// ─────────────────────────────────────────────────────────────────────────────

/// `GetLogicalProcessorInformation` (resolved at runtime) and `GetSystemInfo`.
#[cfg(windows)]
#[derive(Debug, Clone, Copy, Default)]
pub struct Kernel32;

#[cfg(windows)]
type LpfnGlpi = unsafe extern "system" fn(
    winapi::um::winnt::PSYSTEM_LOGICAL_PROCESSOR_INFORMATION,
    winapi::shared::minwindef::PDWORD,
) -> winapi::shared::minwindef::BOOL;

#[cfg(windows)]
impl ProcessorInfo for Kernel32 {
    fn logical_processors(&self) -> Option<Vec<LogicalProcessor>> {
        use std::mem::size_of;
        use winapi::shared::minwindef::{DWORD, FALSE};
        use winapi::shared::winerror::ERROR_INSUFFICIENT_BUFFER;
        use winapi::um::errhandlingapi::GetLastError;
        use winapi::um::libloaderapi::{GetModuleHandleA, GetProcAddress};
        use winapi::um::winnt::SYSTEM_LOGICAL_PROCESSOR_INFORMATION;

        // SAFETY: both names are NUL-terminated; a null module or proc
        // address is checked before use.
        let glpi: LpfnGlpi = unsafe {
            let kernel32 = GetModuleHandleA(c"kernel32".as_ptr());
            if kernel32.is_null() {
                return None;
            }
            let proc = GetProcAddress(kernel32, c"GetLogicalProcessorInformation".as_ptr());
            if proc.is_null() {
                return None;
            }
            std::mem::transmute::<_, LpfnGlpi>(proc)
        };

        let record_size = size_of::<SYSTEM_LOGICAL_PROCESSOR_INFORMATION>();
        let mut buffer: Vec<SYSTEM_LOGICAL_PROCESSOR_INFORMATION> = Vec::new();
        let mut return_length: DWORD = 0;

        loop {
            let ptr = if buffer.capacity() == 0 {
                std::ptr::null_mut()
            } else {
                buffer.as_mut_ptr()
            };
            // SAFETY: `return_length` never exceeds the byte capacity behind
            // `ptr` (it is either 0 or the size we just reserved).
            let rc = unsafe { glpi(ptr, &mut return_length) };
            if rc != FALSE {
                break;
            }
            // SAFETY: plain thread-local error query.
            if unsafe { GetLastError() } != ERROR_INSUFFICIENT_BUFFER {
                return None;
            }
            let records = (return_length as usize).div_ceil(record_size);
            buffer = Vec::with_capacity(records);
            return_length = (buffer.capacity() * record_size) as DWORD;
        }

        let filled = (return_length as usize / record_size).min(buffer.capacity());
        // SAFETY: the API wrote `filled` complete records into the buffer.
        unsafe { buffer.set_len(filled) };

        Some(
            buffer
                .iter()
                .map(|r| LogicalProcessor {
                    relationship: Relationship::from_raw(r.Relationship),
                    processor_mask: r.ProcessorMask as u64,
                })
                .collect(),
        )
    }

    fn system_processor_count(&self) -> u32 {
        use winapi::um::sysinfoapi::{GetSystemInfo, SYSTEM_INFO};

        // SAFETY: SYSTEM_INFO is plain data; GetSystemInfo fills it in.
        unsafe {
            let mut info: SYSTEM_INFO = std::mem::zeroed();
            GetSystemInfo(&mut info);
            info.dwNumberOfProcessors
        }
    }
}
