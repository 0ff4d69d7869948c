//! Line detection: length-4 windows and four-in-a-row checks.
//!
//! A *window* is a contiguous run of [`WINDOW_LENGTH`] cells along one of the
//! four [`Direction`]s. Win detection and the heuristic evaluator both work on
//! the same set of windows, produced by [`windows`].

use serde::{Deserialize, Serialize};

use crate::ConflictingWinError;

use super::{
    board::Board,
    cell::{Cell, Player},
};

/// Number of aligned pieces needed to win.
pub const WINDOW_LENGTH: usize = 4;

/// Board coordinates `(row, col)` of the cells of one window.
pub type Window = [(usize, usize); WINDOW_LENGTH];

/// Orientation of a window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Along a row, left to right.
    Horizontal,
    /// Along a column, bottom to top.
    Vertical,
    /// Rising to the right (`/`).
    DiagonalUp,
    /// Falling to the right (`\`).
    DiagonalDown,
}

impl Direction {
    pub const ALL: [Self; 4] = [
        Self::Horizontal,
        Self::Vertical,
        Self::DiagonalUp,
        Self::DiagonalDown,
    ];

    /// Row and column step between consecutive cells.
    #[must_use]
    pub const fn step(self) -> (isize, isize) {
        match self {
            Self::Horizontal => (0, 1),
            Self::Vertical => (1, 0),
            Self::DiagonalUp => (1, 1),
            Self::DiagonalDown => (-1, 1),
        }
    }

    /// Returns the window starting at `(row, col)`, or `None` if it leaves the board.
    #[must_use]
    pub fn window_at(self, row: usize, col: usize, rows: usize, cols: usize) -> Option<Window> {
        let (dr, dc) = self.step();
        let span = WINDOW_LENGTH as isize - 1;
        let end_row = row.checked_add_signed(dr * span)?;
        let end_col = col.checked_add_signed(dc * span)?;
        if end_row >= rows || end_col >= cols {
            return None;
        }
        Some(std::array::from_fn(|i| {
            let i = i as isize;
            (
                row.wrapping_add_signed(dr * i),
                col.wrapping_add_signed(dc * i),
            )
        }))
    }

    /// Iterates over every window of this orientation on a `rows × cols` board.
    pub fn windows(self, rows: usize, cols: usize) -> impl Iterator<Item = Window> {
        (0..rows)
            .flat_map(move |row| (0..cols).map(move |col| (row, col)))
            .filter_map(move |(row, col)| self.window_at(row, col, rows, cols))
    }
}

/// Iterates over every window of a `rows × cols` board, each exactly once per
/// orientation.
pub fn windows(rows: usize, cols: usize) -> impl Iterator<Item = Window> {
    Direction::ALL
        .into_iter()
        .flat_map(move |direction| direction.windows(rows, cols))
}

/// Final result of a game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, derive_more::IsVariant)]
#[serde(rename_all = "snake_case")]
pub enum GameOutcome {
    Winner(Player),
    Draw,
}

impl Board {
    /// Iterates over the cells of every window on this board.
    pub fn windows(&self) -> impl Iterator<Item = [Cell; WINDOW_LENGTH]> + '_ {
        windows(self.rows(), self.cols()).map(|window| window.map(|(row, col)| self.get(row, col)))
    }

    /// Returns `true` if `player` has four pieces aligned in any direction.
    #[must_use]
    pub fn has_four_in_a_row(&self, player: Player) -> bool {
        self.windows()
            .any(|cells| cells.iter().all(|cell| cell.is_owned_by(player)))
    }

    /// Returns the player with four in a row, if any.
    ///
    /// Alternating legal play stops at the first alignment, so at most one player
    /// can have won. A board where both players have four in a row is reported
    /// as an error.
    pub fn winner(&self) -> Result<Option<Player>, ConflictingWinError> {
        match (
            self.has_four_in_a_row(Player::Red),
            self.has_four_in_a_row(Player::Yellow),
        ) {
            (true, true) => Err(ConflictingWinError),
            (true, false) => Ok(Some(Player::Red)),
            (false, true) => Ok(Some(Player::Yellow)),
            (false, false) => Ok(None),
        }
    }

    /// Returns `true` if either player has four in a row or the board is full.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        Player::ALL
            .into_iter()
            .any(|player| self.has_four_in_a_row(player))
            || self.is_full()
    }

    /// Returns the outcome of a finished game, or `None` while it is still open.
    pub fn outcome(&self) -> Result<Option<GameOutcome>, ConflictingWinError> {
        if let Some(player) = self.winner()? {
            return Ok(Some(GameOutcome::Winner(player)));
        }
        Ok(self.is_full().then_some(GameOutcome::Draw))
    }
}
