//! Strictly Quoridor shell - scripts, configuration and hot-seat play
//!
//! The `quoridor` binary is a thin wrapper over these modules; they live in
//! a library so they can be tested without spawning a process.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Private module declarations
mod cli;
mod config;
mod play;
mod report;
mod script;

// Crate-level exports - CLI
pub use cli::{Cli, Command};

// Crate-level exports - Configuration
pub use config::{Config, ConfigError};

// Crate-level exports - Scripts
pub use script::{Script, ScriptError};

// Crate-level exports - Play
pub use play::{CommandError, PlayCommand, PlayError, play};

// Crate-level exports - Reports
pub use report::{moves_lines, status_line, turn_line};
