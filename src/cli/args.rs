//! Command-line arguments for `lz4-cores`.
//!
//! Verbosity follows the LZ4 programs: the display level starts at 2 and
//! each `-v` raises it by one, each `-q` lowers it by one (never below 0).

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::cli::constants::PROGRAM_NAME;

/// Default display level before any `-v` / `-q` flag is applied.
pub const DEFAULT_DISPLAY_LEVEL: u32 = 2;

/// Print the number of usable CPU cores.
#[derive(Debug, Parser)]
#[command(name = PROGRAM_NAME, version)]
pub struct Args {
    /// Increase verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Decrease verbosity (repeatable)
    #[arg(short, long, action = ArgAction::Count)]
    pub quiet: u8,

    /// Query the OS again instead of using the memoized value
    #[arg(long)]
    pub uncached: bool,

    /// Parse a cpuinfo-format file and print its hyperthreading fields
    #[arg(long, value_name = "PATH")]
    pub cpuinfo: Option<PathBuf>,
}

impl Args {
    /// Display level selected by the `-v` / `-q` flags.
    pub fn display_level(&self) -> u32 {
        (DEFAULT_DISPLAY_LEVEL + u32::from(self.verbose)).saturating_sub(u32::from(self.quiet))
    }
}
