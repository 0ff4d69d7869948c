use std::path::PathBuf;

use oxifour_engine::Player;
use oxifour_evaluator::Score;
use oxifour_search::{Minimax, SearchOutcome};
use serde::Serialize;

use crate::{
    command::SearchArg,
    util::{self, Output},
};

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct BestMoveArg {
    /// Board file in text form (top row first), or `-` for stdin
    #[arg(long)]
    board: PathBuf,
    /// Player to move, searched as the maximizing side
    #[arg(long, default_value = "yellow")]
    player: Player,
    #[command(flatten)]
    search: SearchArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct BestMoveReport {
    player: Player,
    depth: u32,
    column: usize,
    score: Score,
    nodes: u64,
    cutoffs: u64,
}

impl BestMoveReport {
    fn new(player: Player, depth: u32, outcome: &SearchOutcome) -> Self {
        Self {
            player,
            depth,
            column: outcome.column,
            score: outcome.score,
            nodes: outcome.stats.nodes,
            cutoffs: outcome.stats.cutoffs,
        }
    }
}

pub(crate) fn run(arg: &BestMoveArg) -> anyhow::Result<()> {
    let BestMoveArg {
        board,
        player,
        search,
        output,
    } = arg;

    let config = search.load_config()?;
    let board = util::read_board_file(board)?;
    let mut engine = Minimax::from_config(&config)?;
    let outcome = engine.search(&board, config.depth, *player)?;

    let report = BestMoveReport::new(*player, config.depth, &outcome);
    Output::save_json(&report, output.clone())?;
    Ok(())
}
