// Integration tests for the per-platform strategies behind util::cores.
//
// Each strategy is driven with fixed OS answers so the fallback chains of
// every platform are exercised on whichever host runs the suite:
//   - Linux:   sysconf value returned unchanged, cpuinfo ratio not applied
//   - FreeBSD: kern.smp.cores * kern.smp.threads_per_core, ENOENT → sysconf
//   - Darwin:  hw.logicalcpu, failure → 1
//   - Windows: ProcessorCore masks summed, missing API → GetSystemInfo
//   - Others:  sysconf or a fixed 1

use std::ffi::CStr;
use std::fs;

use lz4_cores::config::{SYSCTL_KERN_SMP_CORES, SYSCTL_KERN_SMP_THREADS_PER_CORE};
use lz4_cores::util::cores::{
    parse_cpuinfo, read_cpuinfo, CoreCounter, DarwinCounter, FreeBsdCounter, LinuxCounter,
    LogicalProcessor, ProcessorInfo, Relationship, SysconfCounter, Sysconf, Sysctl, SysctlError,
    UnknownCounter, WindowsCounter,
};
use tempfile::TempDir;

// ─────────────────────────────────────────────────────────────────────────────
// Fakes
// ─────────────────────────────────────────────────────────────────────────────

struct Online(i64);

impl Sysconf for Online {
    fn nprocessors_onln(&self) -> i64 {
        self.0
    }
}

#[derive(Default)]
struct SysctlTable(Vec<(&'static CStr, Result<i32, SysctlError>)>);

impl SysctlTable {
    fn with(mut self, key: &'static CStr, value: Result<i32, SysctlError>) -> Self {
        self.0.push((key, value));
        self
    }
}

impl Sysctl for SysctlTable {
    fn read_i32(&self, key: &CStr) -> Result<i32, SysctlError> {
        self.0
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| *v)
            .unwrap_or(Err(SysctlError::NotFound))
    }
}

struct Topology {
    records: Option<Vec<LogicalProcessor>>,
    system: u32,
}

impl ProcessorInfo for Topology {
    fn logical_processors(&self) -> Option<Vec<LogicalProcessor>> {
        self.records.clone()
    }

    fn system_processor_count(&self) -> u32 {
        self.system
    }
}

/// Four processor entries of a 4-core / 8-thread part.
fn hyperthreaded_cpuinfo() -> String {
    let mut text = String::new();
    for n in 0..4 {
        text.push_str(&format!(
            "processor\t: {n}\nvendor_id\t: GenuineIntel\nsiblings\t: 8\ncore id\t\t: {n}\ncpu cores\t: 4\nflags\t\t: fpu vme de pse tsc msr pae mce cx8 apic sep mtrr pge mca cmov ht\n\n"
        ));
    }
    text
}

fn write_cpuinfo(dir: &TempDir, contents: &str) -> std::path::PathBuf {
    let path = dir.path().join("cpuinfo");
    fs::write(&path, contents).unwrap();
    path
}

// ─────────────────────────────────────────────────────────────────────────────
// Linux
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn linux_hyperthread_ratio_is_computed_but_not_applied() {
    let dir = TempDir::new().unwrap();
    let path = write_cpuinfo(&dir, &hyperthreaded_cpuinfo());

    let info = read_cpuinfo(&path).unwrap();
    assert_eq!(info.siblings, 8);
    assert_eq!(info.cpu_cores, 4);
    assert_eq!(info.ratio(), 2);

    // Known quirk: the ratio never adjusts the reported count.
    let counter = LinuxCounter::with_cpuinfo_path(Online(8), &path);
    assert_eq!(counter.count_cores(), 8);
}

#[test]
fn linux_malformed_cpuinfo_keeps_sysconf_value() {
    let dir = TempDir::new().unwrap();
    let path = write_cpuinfo(&dir, "processor\t: 0\nsiblings 8\ncpu cores\t: 4\n");

    assert!(read_cpuinfo(&path).is_err());
    let counter = LinuxCounter::with_cpuinfo_path(Online(12), &path);
    assert_eq!(counter.count_cores(), 12);
}

#[test]
fn linux_missing_cpuinfo_keeps_sysconf_value() {
    let dir = TempDir::new().unwrap();
    let counter = LinuxCounter::with_cpuinfo_path(Online(5), dir.path().join("absent"));
    assert_eq!(counter.count_cores(), 5);
}

#[test]
fn linux_sysconf_unavailable_gives_one() {
    let dir = TempDir::new().unwrap();
    let path = write_cpuinfo(&dir, &hyperthreaded_cpuinfo());
    let counter = LinuxCounter::with_cpuinfo_path(Online(-1), &path);
    assert_eq!(counter.count_cores(), 1);
}

#[test]
fn linux_default_path_is_proc_cpuinfo() {
    let counter = LinuxCounter::new(Online(2));
    assert_eq!(counter.cpuinfo_path(), std::path::Path::new("/proc/cpuinfo"));
}

#[test]
fn parse_cpuinfo_without_topology_fields() {
    // Some ARM kernels publish neither field.
    let info = parse_cpuinfo("processor\t: 0\nBogoMIPS\t: 48.00\n".as_bytes()).unwrap();
    assert_eq!(info.siblings, 0);
    assert_eq!(info.cpu_cores, 0);
    assert_eq!(info.ratio(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// FreeBSD
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn freebsd_multiplies_cores_by_threads() {
    let sysctl = SysctlTable::default()
        .with(SYSCTL_KERN_SMP_CORES, Ok(4))
        .with(SYSCTL_KERN_SMP_THREADS_PER_CORE, Ok(2));
    assert_eq!(FreeBsdCounter::new(sysctl, Online(99)).count_cores(), 8);
}

#[test]
fn freebsd_threads_missing_uses_physical_count() {
    let sysctl = SysctlTable::default().with(SYSCTL_KERN_SMP_CORES, Ok(6));
    assert_eq!(FreeBsdCounter::new(sysctl, Online(99)).count_cores(), 6);
}

#[test]
fn freebsd_old_kernel_falls_back_to_sysconf() {
    let sysctl = SysctlTable::default();
    assert_eq!(FreeBsdCounter::new(sysctl, Online(3)).count_cores(), 3);
}

#[test]
fn freebsd_unexpected_errno_does_not_abort() {
    let sysctl = SysctlTable::default().with(SYSCTL_KERN_SMP_CORES, Err(SysctlError::Os(libc::EACCES)));
    assert_eq!(FreeBsdCounter::new(sysctl, Online(7)).count_cores(), 7);
    let sysctl = SysctlTable::default().with(SYSCTL_KERN_SMP_CORES, Err(SysctlError::Os(libc::EACCES)));
    assert_eq!(FreeBsdCounter::new(sysctl, Online(-1)).count_cores(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Darwin
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn darwin_reads_logicalcpu() {
    let sysctl = SysctlTable::default().with(c"hw.logicalcpu", Ok(10));
    assert_eq!(DarwinCounter::new(sysctl).count_cores(), 10);
}

#[test]
fn darwin_failure_gives_one() {
    assert_eq!(DarwinCounter::new(SysctlTable::default()).count_cores(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Windows
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn windows_counts_bits_of_core_records() {
    let records = vec![
        LogicalProcessor { relationship: Relationship::ProcessorPackage, processor_mask: 0xff },
        LogicalProcessor { relationship: Relationship::ProcessorCore, processor_mask: 0x03 },
        LogicalProcessor { relationship: Relationship::Cache, processor_mask: 0x03 },
        LogicalProcessor { relationship: Relationship::ProcessorCore, processor_mask: 0x0c },
        LogicalProcessor { relationship: Relationship::ProcessorCore, processor_mask: 0x30 },
        LogicalProcessor { relationship: Relationship::ProcessorCore, processor_mask: 0xc0 },
    ];
    let counter = WindowsCounter::new(Topology { records: Some(records), system: 1 });
    assert_eq!(counter.count_cores(), 8);
}

#[test]
fn windows_missing_api_uses_system_info() {
    let counter = WindowsCounter::new(Topology { records: None, system: 12 });
    assert_eq!(counter.count_cores(), 12);
}

#[test]
fn windows_zero_processors_clamps_to_one() {
    let counter = WindowsCounter::new(Topology { records: None, system: 0 });
    assert_eq!(counter.count_cores(), 1);
}

// ─────────────────────────────────────────────────────────────────────────────
// Plain sysconf / unknown targets
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn sysconf_strategy() {
    assert_eq!(SysconfCounter::new(Online(16)).count_cores(), 16);
    assert_eq!(SysconfCounter::new(Online(-1)).count_cores(), 1);
}

#[test]
fn unknown_platform_is_always_one() {
    assert_eq!(UnknownCounter.count_cores(), 1);
}
