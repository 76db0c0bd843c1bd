//! Strictly Quoridor - command-line shell
//!
//! Replays scripted games, lists legal actions, and runs hot-seat play.

#![warn(missing_docs)]

use anyhow::{Context, Result};
use clap::Parser;
use std::io::{self, Write};
use strictly_quoridor::{GameStore, PlayerId, valid_moves, valid_wall_placements};
use strictly_quoridor_cli::{Cli, Command, Config, Script, moves_lines, play, status_line};
use tracing::{info, instrument};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = Config::load(cli.config.as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.log_filter())),
        )
        .with_writer(io::stderr)
        .init();

    match cli.command {
        Command::Replay { script, json } => run_replay(&script, json || *config.json()),
        Command::Moves { script, player } => run_moves(&script, PlayerId::new(player)),
        Command::Play => run_play(&config),
    }
}

/// Replay a script and print where it ended.
#[instrument]
fn run_replay(path: &std::path::Path, json: bool) -> Result<()> {
    let script = Script::from_file(path)?;
    let state = script
        .run()
        .with_context(|| format!("Replaying {}", path.display()))?;
    info!(status = %state.status(), "Replay finished");

    let mut stdout = io::stdout().lock();
    if json {
        writeln!(stdout, "{}", serde_json::to_string_pretty(&state)?)?;
    } else {
        writeln!(stdout, "{}", status_line(&state))?;
    }
    Ok(())
}

/// Replay a script and list a player's legal actions.
#[instrument]
fn run_moves(path: &std::path::Path, player: PlayerId) -> Result<()> {
    let state = Script::from_file(path)?
        .run()
        .with_context(|| format!("Replaying {}", path.display()))?;
    anyhow::ensure!(
        state.player(&player).is_some(),
        "Player {} is not seated in game {}",
        player,
        state.id()
    );

    let moves = valid_moves(&state, &player);
    let walls = valid_wall_placements(&state, &player);

    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{}", status_line(&state))?;
    for line in moves_lines(&player, &moves, walls.len()) {
        writeln!(stdout, "{}", line)?;
    }
    Ok(())
}

/// Run a hot-seat game on stdin and stdout.
#[instrument(skip(config))]
fn run_play(config: &Config) -> Result<()> {
    let store = GameStore::new();
    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    let state = play(&store, config, stdin, stdout)?;
    info!(status = %state.status(), "Session over");
    Ok(())
}
