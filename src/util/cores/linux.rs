//! Linux strategy: `sysconf` plus a `/proc/cpuinfo` hyperthreading probe.
//!
//! `siblings / cpu cores` gives the hyperthreading ratio of the machine. The
//! ratio is computed and traced but never applied: the reported count is the
//! online processor count from `sysconf`, unchanged.

use std::fmt;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::path::{Path, PathBuf};

use super::source::{online_processors, Sysconf};
use super::CoreCounter;
use crate::config::{CPUINFO_CPU_CORES, CPUINFO_PATH, CPUINFO_SIBLINGS, FALLBACK_CORE_COUNT};
use crate::displaylevel;

// ─────────────────────────────────────────────────────────────────────────────
// /proc/cpuinfo parsing
// ─────────────────────────────────────────────────────────────────────────────

/// Topology fields read from `/proc/cpuinfo`.
///
/// The values are assumed constant across all processor entries; the last
/// occurrence of each field wins. A field that never appears stays 0.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HyperthreadInfo {
    pub siblings: i32,
    pub cpu_cores: i32,
}

impl HyperthreadInfo {
    /// Logical threads per physical core, or 1 when it cannot be derived.
    pub fn ratio(&self) -> i32 {
        if self.siblings != 0 && self.cpu_cores != 0 && self.siblings > self.cpu_cores {
            self.siblings / self.cpu_cores
        } else {
            1
        }
    }
}

/// Errors produced while reading `/proc/cpuinfo`.
#[derive(Debug)]
pub enum CpuinfoError {
    /// The file could not be opened or read.
    Io(io::Error),
    /// A `siblings` or `cpu cores` line had no `:` separator.
    Malformed { line: usize, field: &'static str },
}

impl fmt::Display for CpuinfoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CpuinfoError::Io(e) => write!(f, "read error: {e}"),
            CpuinfoError::Malformed { line, field } => {
                write!(f, "line {line}: '{field}' entry has no ':' separator")
            }
        }
    }
}

impl std::error::Error for CpuinfoError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CpuinfoError::Io(e) => Some(e),
            CpuinfoError::Malformed { .. } => None,
        }
    }
}

impl From<io::Error> for CpuinfoError {
    fn from(e: io::Error) -> Self {
        CpuinfoError::Io(e)
    }
}

/// Parses cpuinfo-format text.
///
/// Lines are matched by prefix, so `siblings\t: 8` and `cpu cores\t: 4` are
/// recognised regardless of the padding before the colon. Values are read
/// with C `atoi` rules: leading whitespace skipped, optional sign, digits up
/// to the first non-digit, 0 if there are none.
pub fn parse_cpuinfo<R: BufRead>(mut reader: R) -> Result<HyperthreadInfo, CpuinfoError> {
    let mut info = HyperthreadInfo::default();
    let mut buf = Vec::new();
    let mut line_no = 0usize;

    loop {
        buf.clear();
        if reader.read_until(b'\n', &mut buf)? == 0 {
            break;
        }
        line_no += 1;

        if buf.starts_with(CPUINFO_SIBLINGS.as_bytes()) {
            info.siblings = field_value(&buf, line_no, CPUINFO_SIBLINGS)?;
        }
        if buf.starts_with(CPUINFO_CPU_CORES.as_bytes()) {
            info.cpu_cores = field_value(&buf, line_no, CPUINFO_CPU_CORES)?;
        }
    }

    Ok(info)
}

/// Opens and parses a cpuinfo file.
pub fn read_cpuinfo(path: &Path) -> Result<HyperthreadInfo, CpuinfoError> {
    let file = File::open(path)?;
    parse_cpuinfo(BufReader::new(file))
}

fn field_value(line: &[u8], line_no: usize, field: &'static str) -> Result<i32, CpuinfoError> {
    match line.iter().position(|&b| b == b':') {
        Some(sep) => Ok(atoi(&line[sep + 1..])),
        None => Err(CpuinfoError::Malformed { line: line_no, field }),
    }
}

/// C `atoi`, saturating instead of overflowing.
fn atoi(bytes: &[u8]) -> i32 {
    let mut rest = bytes;
    while let [b, tail @ ..] = rest {
        if matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c) {
            rest = tail;
        } else {
            break;
        }
    }

    let negative = match rest.first() {
        Some(b'-') => {
            rest = &rest[1..];
            true
        }
        Some(b'+') => {
            rest = &rest[1..];
            false
        }
        _ => false,
    };

    let mut value: i64 = 0;
    for &b in rest.iter().take_while(|b| b.is_ascii_digit()) {
        value = (value * 10 + i64::from(b - b'0')).min(i64::from(i32::MAX) + 1);
    }
    if negative {
        value = -value;
    }
    value.clamp(i64::from(i32::MIN), i64::from(i32::MAX)) as i32
}

// ─────────────────────────────────────────────────────────────────────────────
// Strategy
// ─────────────────────────────────────────────────────────────────────────────

/// Linux / Android core counter.
#[derive(Debug, Clone)]
pub struct LinuxCounter<S> {
    sysconf: S,
    cpuinfo_path: PathBuf,
}

impl<S: Sysconf> LinuxCounter<S> {
    /// Counter reading the system's `/proc/cpuinfo`.
    pub fn new(sysconf: S) -> Self {
        Self::with_cpuinfo_path(sysconf, CPUINFO_PATH)
    }

    /// Counter reading cpuinfo from an alternate location.
    pub fn with_cpuinfo_path(sysconf: S, cpuinfo_path: impl Into<PathBuf>) -> Self {
        LinuxCounter {
            sysconf,
            cpuinfo_path: cpuinfo_path.into(),
        }
    }

    pub fn cpuinfo_path(&self) -> &Path {
        &self.cpuinfo_path
    }
}

impl<S: Sysconf> CoreCounter for LinuxCounter<S> {
    fn count_cores(&self) -> usize {
        let Some(num_cores) = online_processors(&self.sysconf) else {
            displaylevel!(4, "cores: sysconf(_SC_NPROCESSORS_ONLN) unavailable, using {}\n", FALLBACK_CORE_COUNT);
            return FALLBACK_CORE_COUNT;
        };

        match read_cpuinfo(&self.cpuinfo_path) {
            Ok(info) => {
                displaylevel!(
                    4,
                    "cores: {} siblings / {} cpu cores, hyperthreading ratio {} (not applied)\n",
                    info.siblings,
                    info.cpu_cores,
                    info.ratio()
                );
            }
            Err(e) => {
                displaylevel!(
                    4,
                    "cores: {}: {}, keeping sysconf value\n",
                    self.cpuinfo_path.display(),
                    e
                );
            }
        }

        num_cores
    }
}
