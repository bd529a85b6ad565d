/// CLI argument parsing and command handling - Gateway
mod args;
mod commands;

pub use args::{CacheAction, Cli, Commands, OutputFormat, SayArgs};
pub use commands::{handle_command, is_clean_exit};
