use std::io::{self, BufRead as _, Write as _};

use anyhow::Context as _;
use oxifour_engine::{Board, FirstPlayer, GameOutcome, GameState, Player};
use oxifour_search::Minimax;
use tracing::info;

use crate::{command::SearchArg, util};

const HUMAN: Player = Player::Red;
const ENGINE: Player = Player::Yellow;

#[derive(Debug, Clone, clap::Args)]
pub(crate) struct PlayArg {
    /// Number of board rows
    #[arg(long, default_value_t = Board::STANDARD_ROWS)]
    rows: usize,
    /// Number of board columns
    #[arg(long, default_value_t = Board::STANDARD_COLS)]
    cols: usize,
    /// Who moves first: red (you), yellow (the engine) or random
    #[arg(long, default_value = "random")]
    first: FirstPlayer,
    #[command(flatten)]
    search: SearchArg,
}

impl Default for PlayArg {
    fn default() -> Self {
        Self {
            rows: Board::STANDARD_ROWS,
            cols: Board::STANDARD_COLS,
            first: FirstPlayer::default(),
            search: SearchArg::default(),
        }
    }
}

enum Input {
    Column(usize),
    Quit,
}

pub(crate) fn run(arg: &PlayArg) -> anyhow::Result<()> {
    let PlayArg {
        rows,
        cols,
        first,
        search,
    } = arg;

    let config = search.load_config()?;
    let mut engine = Minimax::from_config(&config)?;
    let first = first.resolve(&mut rand::rng());
    let mut game = GameState::new(*rows, *cols, first)?;
    info!(rows, cols, %first, depth = config.depth, "game started");

    println!(
        "You are {HUMAN} ({}), the engine is {ENGINE} ({}). {first} moves first.",
        HUMAN.as_char(),
        ENGINE.as_char()
    );
    println!(
        "Enter a column number (0-{}) to drop a piece, or q to quit.",
        cols - 1
    );
    println!();
    println!("{}", util::render_board(game.board()));

    let mut lines = io::stdin().lock().lines();
    while !game.is_over() {
        let col = if game.current_player() == HUMAN {
            print!("{HUMAN}> ");
            io::stdout().flush().context("Failed to flush stdout")?;
            let Some(line) = lines.next() else {
                println!();
                return Ok(());
            };
            let line = line.context("Failed to read from stdin")?;
            match parse_input(&line) {
                Some(Input::Quit) => {
                    println!("Bye.");
                    return Ok(());
                }
                Some(Input::Column(col)) => col,
                None => {
                    println!("Not a column number: {:?}", line.trim());
                    continue;
                }
            }
        } else {
            let outcome = engine.search(game.board(), config.depth, ENGINE)?;
            println!("{ENGINE} plays column {}", outcome.column);
            outcome.column
        };

        match game.play(col) {
            Ok(_) => {
                println!();
                println!("{}", util::render_board(game.board()));
            }
            Err(err) if game.current_player() == HUMAN => println!("{err}"),
            Err(err) => return Err(err).context("Engine chose an illegal move"),
        }
    }

    match game.outcome() {
        Some(GameOutcome::Winner(player)) if player == HUMAN => println!("You win!"),
        Some(GameOutcome::Winner(player)) => println!("{player} wins."),
        Some(GameOutcome::Draw) => println!("Draw."),
        None => {}
    }
    info!(moves = game.moves().len(), outcome = ?game.outcome(), "game finished");
    Ok(())
}

fn parse_input(line: &str) -> Option<Input> {
    let input = line.trim();
    if input.eq_ignore_ascii_case("q") || input.eq_ignore_ascii_case("quit") {
        return Some(Input::Quit);
    }
    input.parse().ok().map(Input::Column)
}
