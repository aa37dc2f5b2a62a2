// Handlers for CLI subcommands. main.rs parses arguments and dispatches here.

pub mod generate;
pub mod simulate;
