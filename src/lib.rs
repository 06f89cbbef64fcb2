// lz4-cores: CPU core counting for the LZ4 programs (UTIL_countCores)

pub mod config;
pub mod cli;
pub mod util;

// ── Version constants (mirrors lz4.h) ─────────────────────────────────────────
pub const LZ4_VERSION_STRING: &str = "1.10.0";

// ── Top-level re-exports ──────────────────────────────────────────────────────
pub use util::count_cores;
