// build.rs: Target classification for the core-count strategies.
// Migrated from the `#if defined(...)` ladder around UTIL_countCores in util.c.
//
// Emits `cargo:rustc-cfg=cores_posix_sysconf` on targets whose only core-count
// source is `sysconf(_SC_NPROCESSORS_ONLN)` (the NetBSD / OpenBSD / DragonFly /
// Cygwin branch in C). Windows, Apple, Linux and FreeBSD have dedicated
// strategies selected directly with `cfg(target_os)`; everything else gets
// the fixed fallback of 1.
fn main() {
    println!("cargo:rerun-if-changed=build.rs");

    let target_os = std::env::var("CARGO_CFG_TARGET_OS").unwrap_or_default();
    let sysconf_targets = ["netbsd", "openbsd", "dragonfly", "cygwin"];
    if sysconf_targets.contains(&target_os.as_str()) {
        println!("cargo:rustc-cfg=cores_posix_sysconf");
    }
}
