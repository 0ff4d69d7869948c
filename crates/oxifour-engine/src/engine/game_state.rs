use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    BoardSizeError, PlayError,
    core::{
        board::Board,
        cell::Player,
        lines::GameOutcome,
    },
};

/// Who opens a game.
#[derive(Default, Debug, Clone, Copy, PartialEq, Eq, derive_more::FromStr)]
pub enum FirstPlayer {
    Red,
    Yellow,
    /// Pick one of the two players uniformly at random.
    #[default]
    Random,
}

impl FirstPlayer {
    /// Resolves the choice to a concrete player.
    pub fn resolve<R>(self, rng: &mut R) -> Player
    where
        R: Rng + ?Sized,
    {
        match self {
            Self::Red => Player::Red,
            Self::Yellow => Player::Yellow,
            Self::Random => {
                if rng.random_bool(0.5) {
                    Player::Red
                } else {
                    Player::Yellow
                }
            }
        }
    }
}

/// A move that has been applied to a [`GameState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayedMove {
    pub player: Player,
    pub col: usize,
    pub row: usize,
    /// Outcome of the game if this move ended it.
    pub outcome: Option<GameOutcome>,
}

/// State of a game in progress: board, side to move, history and outcome.
///
/// This is the live board owned by a game loop. Both sides' moves go through
/// [`GameState::play`], which enforces turn order and stops accepting moves once
/// the game is over.
///
/// # Example
///
/// ```
/// use oxifour_engine::{GameOutcome, GameState, Player};
///
/// let mut game = GameState::standard(Player::Red);
/// for col in [0, 0, 1, 1, 2, 2] {
///     game.play(col).unwrap();
/// }
/// let last = game.play(3).unwrap();
/// assert_eq!(last.outcome, Some(GameOutcome::Winner(Player::Red)));
/// assert!(game.is_over());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameState {
    board: Board,
    current_player: Player,
    outcome: Option<GameOutcome>,
    moves: Vec<usize>,
}

impl GameState {
    /// Creates a game on an empty `rows × cols` board.
    pub fn new(rows: usize, cols: usize, first: Player) -> Result<Self, BoardSizeError> {
        Ok(Self::from_empty_board(Board::new(rows, cols)?, first))
    }

    /// Creates a game on an empty 6×7 board.
    #[must_use]
    pub fn standard(first: Player) -> Self {
        Self::from_empty_board(Board::standard(), first)
    }

    fn from_empty_board(board: Board, first: Player) -> Self {
        Self {
            board,
            current_player: first,
            outcome: None,
            moves: vec![],
        }
    }

    #[must_use]
    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Player whose turn it is. After the game is over this is the player who
    /// would have moved next.
    #[must_use]
    pub fn current_player(&self) -> Player {
        self.current_player
    }

    #[must_use]
    pub fn outcome(&self) -> Option<GameOutcome> {
        self.outcome
    }

    #[must_use]
    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Columns played so far, in order.
    #[must_use]
    pub fn moves(&self) -> &[usize] {
        &self.moves
    }

    /// Plays `col` for the current player.
    pub fn play(&mut self, col: usize) -> Result<PlayedMove, PlayError> {
        if self.is_over() {
            return Err(PlayError::GameOver);
        }

        let player = self.current_player;
        let row = self.board.drop_piece(col, player)?;
        self.moves.push(col);

        self.outcome = if self.board.has_four_in_a_row(player) {
            Some(GameOutcome::Winner(player))
        } else if self.board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        };
        self.current_player = player.opponent();

        Ok(PlayedMove {
            player,
            col,
            row,
            outcome: self.outcome,
        })
    }
}
