//! CLI module for callbox

mod args;
pub mod commands;

pub use args::{Cli, Commands, ConfigCommand};
