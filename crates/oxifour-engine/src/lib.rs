//! Board model and game rules for a four-in-a-row game.
//!
//! - [`core`] - [`Board`] with gravity-constrained moves, [`Player`]/[`Cell`],
//!   and line detection over length-4 windows
//! - [`engine`] - [`GameState`] for a live game with turn order and outcome

pub use self::{core::*, engine::*};

pub mod core;
pub mod engine;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid board size {rows}x{cols} (rows and columns must be in 1..=16)")]
pub struct BoardSizeError {
    pub rows: usize,
    pub cols: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum MoveError {
    #[display("column {col} is out of range (board has {cols} columns)")]
    ColumnOutOfRange { col: usize, cols: usize },
    #[display("column {col} is full")]
    ColumnFull { col: usize },
    #[display("column {col} is empty")]
    ColumnEmpty { col: usize },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("both players have four in a row")]
pub struct ConflictingWinError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum PlayError {
    #[display("game is already over")]
    GameOver,
    #[display("{_0}")]
    Move(MoveError),
}

impl From<MoveError> for PlayError {
    fn from(err: MoveError) -> Self {
        Self::Move(err)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ParseBoardError {
    #[display("{_0}")]
    Size(BoardSizeError),
    #[display("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
    #[display("invalid character {ch:?} at row {row}, column {col}")]
    InvalidChar { row: usize, col: usize, ch: char },
    #[display("piece at row {row}, column {col} has an empty cell below it")]
    FloatingPiece { row: usize, col: usize },
}

impl From<BoardSizeError> for ParseBoardError {
    fn from(err: BoardSizeError) -> Self {
        Self::Size(err)
    }
}
