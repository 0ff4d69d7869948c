use std::{io, path::PathBuf};

use anyhow::Context as _;
use clap::{Parser, Subcommand};
use oxifour_search::{SearchConfig, SearchSeed};

use self::{best_move::BestMoveArg, play::PlayArg, self_play::SelfPlayArg};
use crate::util;

mod best_move;
mod play;
mod self_play;

#[derive(Debug, Clone, Parser)]
#[command(author, version, about, long_about = None)]
pub struct CommandArgs {
    /// Log filter used when `RUST_LOG` is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,
    /// What mode to run the program in
    #[command(subcommand)]
    mode: Option<Mode>,
}

#[derive(Debug, Clone, Subcommand)]
enum Mode {
    /// Play against the engine on the terminal
    Play(#[clap(flatten)] PlayArg),
    /// Search a single position and print the chosen column as JSON
    BestMove(#[clap(flatten)] BestMoveArg),
    /// Pit the engine against the greedy baseline
    SelfPlay(#[clap(flatten)] SelfPlayArg),
}

/// Search options shared by every subcommand that runs the engine.
///
/// Flags override the values loaded from `--config`.
#[derive(Default, Debug, Clone, clap::Args)]
pub(crate) struct SearchArg {
    /// Search configuration file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Search depth in plies [default: 5]
    #[arg(long)]
    depth: Option<u32>,
    /// Tie-break seed (32 hex characters)
    #[arg(long)]
    seed: Option<SearchSeed>,
}

impl SearchArg {
    pub(crate) fn load_config(&self) -> anyhow::Result<SearchConfig> {
        let mut config = match &self.config {
            Some(path) => util::read_json_file("search config", path)?,
            None => SearchConfig::default(),
        };
        if let Some(depth) = self.depth {
            config.depth = depth;
        }
        if let Some(seed) = self.seed {
            config.seed = Some(seed);
        }
        config
            .validate()
            .context("Invalid search configuration")?;
        Ok(config)
    }
}

fn init_tracing(level: &str) -> anyhow::Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .with_context(|| format!("Invalid log level: {level}"))?;

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    Ok(())
}

pub fn run() -> anyhow::Result<()> {
    let args = CommandArgs::parse();
    init_tracing(&args.log_level)?;
    match args.mode.unwrap_or(Mode::Play(PlayArg::default())) {
        Mode::Play(arg) => play::run(&arg)?,
        Mode::BestMove(arg) => best_move::run(&arg)?,
        Mode::SelfPlay(arg) => self_play::run(&arg)?,
    }
    Ok(())
}
