// cli/constants.rs: Identity constants and display infrastructure.
//
// The DISPLAY / DISPLAYOUT / DISPLAYLEVEL macros of the LZ4 programs are
// provided here so the library strategies and the binary share one
// verbosity switch.

use std::sync::atomic::{AtomicU32, Ordering};

// ── String / identity constants ───────────────────────────────────────────────
pub const PROGRAM_NAME: &str = "lz4-cores";
pub const AUTHOR: &str = "Yann Collet";

// ── Display level global ──────────────────────────────────────────────────────
//
// 0 = no output; 1 = errors only; 2 = normal (downgradable); 3 = info; 4 = verbose
//
// Level 4 traces every fallback decision taken by the core-count strategies.
pub static DISPLAY_LEVEL: AtomicU32 = AtomicU32::new(2);

/// Returns the current display level.
#[inline]
pub fn display_level() -> u32 {
    DISPLAY_LEVEL.load(Ordering::Relaxed)
}

/// Sets the display level.
#[inline]
pub fn set_display_level(level: u32) {
    DISPLAY_LEVEL.store(level, Ordering::Relaxed);
}

// ── Display helpers ───────────────────────────────────────────────────────────
//
//   DISPLAYOUT(...)      → `displayout!`  (stdout)
//   DISPLAY(...)         → `display!`     (stderr)
//   DISPLAYLEVEL(l, ...) → `displaylevel!` (stderr, gated on display_level())

/// Print to stdout, equivalent to C `DISPLAYOUT(...)`.
#[macro_export]
macro_rules! displayout {
    ($($arg:tt)*) => { print!($($arg)*) };
}

/// Print to stderr, equivalent to C `DISPLAY(...)`.
#[macro_export]
macro_rules! display {
    ($($arg:tt)*) => { eprint!($($arg)*) };
}

/// Conditionally print to stderr at or above `level`, equivalent to C `DISPLAYLEVEL(l, ...)`.
#[macro_export]
macro_rules! displaylevel {
    ($level:expr, $($arg:tt)*) => {
        if $crate::cli::constants::display_level() >= $level {
            eprint!($($arg)*);
        }
    };
}
