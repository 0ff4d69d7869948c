use std::path::PathBuf;

use anyhow::Context as _;
use chrono::{DateTime, Utc};
use oxifour_engine::{Board, GameOutcome, GameState, Player};
use oxifour_evaluator::{GreedyMoveSelector, WindowEvaluator};
use oxifour_search::{Minimax, SearchConfig, SearchSeed};
use rand::Rng as _;
use rand_pcg::Pcg32;
use serde::Serialize;
use tracing::info;

use crate::{command::SearchArg, util::Output};

const ENGINE: Player = Player::Yellow;
const BASELINE: Player = Player::Red;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct SelfPlayArg {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: usize,
    /// Number of board rows
    #[arg(long, default_value_t = Board::STANDARD_ROWS)]
    rows: usize,
    /// Number of board columns
    #[arg(long, default_value_t = Board::STANDARD_COLS)]
    cols: usize,
    #[command(flatten)]
    search: SearchArg,
    /// Output file path
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(Debug, Clone, Serialize)]
struct GameRecord {
    first: Player,
    moves: Vec<usize>,
    outcome: GameOutcome,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
struct Tally {
    engine_wins: usize,
    baseline_wins: usize,
    draws: usize,
}

impl Tally {
    fn record(&mut self, outcome: GameOutcome) {
        match outcome {
            GameOutcome::Winner(ENGINE) => self.engine_wins += 1,
            GameOutcome::Winner(_) => self.baseline_wins += 1,
            GameOutcome::Draw => self.draws += 1,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
struct SelfPlayReport {
    created_at: DateTime<Utc>,
    rows: usize,
    cols: usize,
    engine: Player,
    baseline: Player,
    /// Configuration including the seed that was used.
    config: SearchConfig,
    tally: Tally,
    games: Vec<GameRecord>,
}

struct Players {
    engine: Minimax,
    depth: u32,
    baseline: GreedyMoveSelector<WindowEvaluator>,
    rng: Pcg32,
}

impl Players {
    fn choose(&mut self, board: &Board, player: Player) -> anyhow::Result<usize> {
        let col = if player == ENGINE {
            self.engine.search(board, self.depth, ENGINE)?.column
        } else {
            self.baseline
                .select_best_move(board, BASELINE, &mut self.rng)?
        };
        Ok(col)
    }

    fn play_game(&mut self, rows: usize, cols: usize, first: Player) -> anyhow::Result<GameRecord> {
        let mut game = GameState::new(rows, cols, first)?;
        while !game.is_over() {
            let player = game.current_player();
            let col = self.choose(game.board(), player)?;
            game.play(col)
                .with_context(|| format!("{player} chose an illegal column {col}"))?;
        }
        let outcome = game
            .outcome()
            .context("Game ended without an outcome")?;
        Ok(GameRecord {
            first,
            moves: game.moves().to_vec(),
            outcome,
        })
    }
}

pub(crate) fn run(arg: &SelfPlayArg) -> anyhow::Result<()> {
    let SelfPlayArg {
        games,
        rows,
        cols,
        search,
        output,
    } = arg;

    let config = search.load_config()?;
    let seed = config.seed.unwrap_or_else(|| rand::rng().random());
    let mut rng = seed.rng();
    let engine_seed: SearchSeed = rng.random();

    let evaluator = WindowEvaluator::new(config.weights);
    let mut players = Players {
        engine: Minimax::new(evaluator, engine_seed),
        depth: config.depth,
        baseline: GreedyMoveSelector::new(evaluator),
        rng,
    };

    let mut tally = Tally::default();
    let mut records = Vec::with_capacity(*games);
    for index in 0..*games {
        // Openers alternate, starting with the engine.
        let first = if index % 2 == 0 { ENGINE } else { BASELINE };
        let record = players.play_game(*rows, *cols, first)?;
        tally.record(record.outcome);
        info!(
            game = index,
            %first,
            moves = record.moves.len(),
            outcome = ?record.outcome,
            "game finished"
        );
        records.push(record);
    }
    eprintln!(
        "Engine {}, baseline {}, draws {} ({} games)",
        tally.engine_wins, tally.baseline_wins, tally.draws, games
    );

    let report = SelfPlayReport {
        created_at: Utc::now(),
        rows: *rows,
        cols: *cols,
        engine: ENGINE,
        baseline: BASELINE,
        config: SearchConfig {
            seed: Some(seed),
            ..config
        },
        tally,
        games: records,
    };
    Output::save_json(&report, output.clone())?;
    Ok(())
}
