//! Command-line interface for the quoridor shell.

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Strictly Quoridor - replay, inspect and play Quoridor games
#[derive(Parser, Debug)]
#[command(name = "quoridor")]
#[command(about = "Contract-checked Quoridor rules engine shell", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to a TOML config file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Replay a script and print the final state
    Replay {
        /// Path to the script file
        script: PathBuf,

        /// Print the final snapshot as JSON
        #[arg(long)]
        json: bool,
    },

    /// Replay a script and list the legal actions for a player
    Moves {
        /// Path to the script file
        script: PathBuf,

        /// Player to list actions for
        #[arg(short, long)]
        player: String,
    },

    /// Play a hot-seat game on stdin
    Play,
}
