//! Fire brigade CLI library.
//!
//! Subcommand handlers, terminal styling and output formatting for the
//! `firebrigade` binary.

pub mod commands;
pub mod output;
pub mod terminal;
