pub mod commands;

pub use commands::{AdminCommands, Cli, Commands};
