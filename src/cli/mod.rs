//! Command-line interface for the `lz4-cores` binary.
//!
//! | Submodule     | Responsibility |
//! |---------------|---------------|
//! | [`constants`] | Program identity strings and the shared `DISPLAY_LEVEL` atomic with its display macros. |
//! | [`args`]      | `Args`: clap definition of the flags, plus the display level they resolve to. |

pub mod constants;
pub mod args;
