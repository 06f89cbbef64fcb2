//! Utility module: Rust port of the core-counting section of `util.c`
//! from lz4-1.10.0/programs.
//!
//! - [`cores`]: CPU core counting (`UTIL_countCores`)

pub mod cores;

// ── Re-exports at `util::` level ─────────────────────────────────────────────

pub use cores::{count_cores, count_cores_uncached, CoreCounter};
