//! Indoor path CLI library.
//!
//! Subcommand handlers and output formatting for the `indoorpath-cli` binary.

pub mod commands;
pub mod output;
