use std::{fmt, str::FromStr};

use arrayvec::ArrayVec;
use serde::{Deserialize, Serialize};

use crate::{BoardSizeError, MoveError, ParseBoardError};

use super::cell::{Cell, Player};

const MAX_ROWS: usize = 16;
const MAX_COLS: usize = 16;

/// Legal columns of a board in ascending order.
pub type LegalColumns = ArrayVec<usize, MAX_COLS>;

/// Gravity-constrained game board.
///
/// A board is a `rows × cols` grid where row 0 is the bottom row. Pieces are only
/// added through [`Board::drop_piece`] (or its pure variant [`Board::with_move`]),
/// which always places a piece on the lowest empty cell of a column, and only
/// removed through [`Board::take_back`], which lifts the topmost piece. Because
/// there is no other way to write a cell, every board satisfies the gravity
/// invariant: an occupied cell never has an empty cell below it.
///
/// Storage has a fixed capacity of 16×16 cells, so `Board` is `Copy` and every
/// copy is an independent value.
///
/// # Text Format
///
/// `Display` and `FromStr` use one line per row, top row first, with `.` for an
/// empty cell and `R`/`Y` for pieces:
///
/// ```text
/// .......
/// .......
/// .......
/// .......
/// ...Y...
/// ..RRY..
/// ```
///
/// # Example
///
/// ```
/// use oxifour_engine::{Board, Cell, Player};
///
/// let mut board = Board::standard();
/// let row = board.drop_piece(3, Player::Red).unwrap();
/// assert_eq!(row, 0);
/// assert_eq!(board.get(0, 3), Cell::Piece(Player::Red));
/// assert_eq!(board.lowest_open_row(3), Some(1));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Board {
    rows: usize,
    cols: usize,
    cells: [[Cell; MAX_COLS]; MAX_ROWS],
    heights: [usize; MAX_COLS],
}

impl Board {
    pub const MAX_ROWS: usize = MAX_ROWS;
    pub const MAX_COLS: usize = MAX_COLS;
    pub const STANDARD_ROWS: usize = 6;
    pub const STANDARD_COLS: usize = 7;

    const fn empty(rows: usize, cols: usize) -> Self {
        Self {
            rows,
            cols,
            cells: [[Cell::Empty; MAX_COLS]; MAX_ROWS],
            heights: [0; MAX_COLS],
        }
    }

    /// Creates an empty board with the given dimensions.
    pub fn new(rows: usize, cols: usize) -> Result<Self, BoardSizeError> {
        if !(1..=MAX_ROWS).contains(&rows) || !(1..=MAX_COLS).contains(&cols) {
            return Err(BoardSizeError { rows, cols });
        }
        Ok(Self::empty(rows, cols))
    }

    /// Creates an empty 6×7 board.
    #[must_use]
    pub const fn standard() -> Self {
        Self::empty(Self::STANDARD_ROWS, Self::STANDARD_COLS)
    }

    #[must_use]
    pub const fn rows(&self) -> usize {
        self.rows
    }

    #[must_use]
    pub const fn cols(&self) -> usize {
        self.cols
    }

    /// Index of the middle column (`cols / 2`).
    #[must_use]
    pub const fn center_column(&self) -> usize {
        self.cols / 2
    }

    /// Returns the cell at `row` (0 is the bottom) and `col`.
    ///
    /// # Panics
    ///
    /// Panics if the position is outside the board.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < self.rows && col < self.cols,
            "cell ({row}, {col}) is outside the {}x{} board",
            self.rows,
            self.cols
        );
        self.cells[row][col]
    }

    /// Returns the cells of a column from the bottom up.
    pub fn column_cells(&self, col: usize) -> impl Iterator<Item = Cell> + '_ {
        self.assert_column(col);
        (0..self.rows).map(move |row| self.cells[row][col])
    }

    /// Number of pieces stacked in a column.
    #[must_use]
    pub fn column_height(&self, col: usize) -> usize {
        self.assert_column(col);
        self.heights[col]
    }

    /// Returns `true` if the topmost cell of `col` is empty.
    ///
    /// # Panics
    ///
    /// Panics if `col` is outside the board.
    #[must_use]
    pub fn is_column_open(&self, col: usize) -> bool {
        self.assert_column(col);
        self.heights[col] < self.rows
    }

    /// Returns the row a piece dropped into `col` would land on, or `None` if the
    /// column is full.
    ///
    /// # Panics
    ///
    /// Panics if `col` is outside the board.
    #[must_use]
    pub fn lowest_open_row(&self, col: usize) -> Option<usize> {
        self.is_column_open(col).then_some(self.heights[col])
    }

    /// Returns every open column in ascending order.
    #[must_use]
    pub fn legal_columns(&self) -> LegalColumns {
        (0..self.cols)
            .filter(|&col| self.heights[col] < self.rows)
            .collect()
    }

    /// Checks that `col` is a column of this board.
    pub fn check_column(&self, col: usize) -> Result<(), MoveError> {
        if col >= self.cols {
            return Err(MoveError::ColumnOutOfRange {
                col,
                cols: self.cols,
            });
        }
        Ok(())
    }

    #[must_use]
    pub fn piece_count(&self) -> usize {
        self.heights[..self.cols].iter().sum()
    }

    /// Returns `true` if no column is open.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.heights[..self.cols].iter().all(|&h| h == self.rows)
    }

    /// Drops a piece for `player` into `col` and returns the row it landed on.
    pub fn drop_piece(&mut self, col: usize, player: Player) -> Result<usize, MoveError> {
        self.check_column(col)?;
        let row = self.heights[col];
        if row == self.rows {
            return Err(MoveError::ColumnFull { col });
        }
        self.cells[row][col] = Cell::Piece(player);
        self.heights[col] += 1;
        Ok(row)
    }

    /// Like [`Self::drop_piece`], but returns a new board and leaves `self` untouched.
    pub fn with_move(&self, col: usize, player: Player) -> Result<(Self, usize), MoveError> {
        let mut next = *self;
        let row = next.drop_piece(col, player)?;
        Ok((next, row))
    }

    /// Removes the topmost piece of `col` and returns it.
    ///
    /// This is the inverse of [`Self::drop_piece`].
    pub fn take_back(&mut self, col: usize) -> Result<Cell, MoveError> {
        self.check_column(col)?;
        let Some(row) = self.heights[col].checked_sub(1) else {
            return Err(MoveError::ColumnEmpty { col });
        };
        let cell = std::mem::take(&mut self.cells[row][col]);
        self.heights[col] = row;
        Ok(cell)
    }

    fn assert_column(&self, col: usize) {
        assert!(
            col < self.cols,
            "column {col} is outside the board (columns: 0..{})",
            self.cols
        );
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::standard()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in (0..self.rows).rev() {
            for col in 0..self.cols {
                write!(f, "{}", self.cells[row][col].as_char())?;
            }
            if row > 0 {
                writeln!(f)?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = ParseBoardError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lines: Vec<&str> = s
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .collect();
        let rows = lines.len();
        let cols = lines.first().map_or(0, |line| line.chars().count());
        let mut board = Self::new(rows, cols)?;

        // Lines are listed top row first.
        for (i, line) in lines.iter().enumerate() {
            let row = rows - 1 - i;
            let found = line.chars().count();
            if found != cols {
                return Err(ParseBoardError::RaggedRow {
                    row,
                    expected: cols,
                    found,
                });
            }
            for (col, ch) in line.chars().enumerate() {
                board.cells[row][col] = match ch {
                    '.' => Cell::Empty,
                    _ => Cell::Piece(
                        Player::from_char(ch)
                            .ok_or(ParseBoardError::InvalidChar { row, col, ch })?,
                    ),
                };
            }
        }

        for col in 0..cols {
            let height = (0..rows)
                .take_while(|&row| board.cells[row][col].is_piece())
                .count();
            if let Some(row) = (height..rows).find(|&row| board.cells[row][col].is_piece()) {
                return Err(ParseBoardError::FloatingPiece { row, col });
            }
            board.heights[col] = height;
        }

        Ok(board)
    }
}

impl Serialize for Board {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        // Format: rows separated by '/', top row first (e.g. ".../.../RY.")
        let text = self.to_string().replace('\n', "/");
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for Board {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.replace('/', "\n")
            .parse()
            .map_err(|e| serde::de::Error::custom(format!("invalid board '{s}': {e}")))
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    fn assert_gravity(board: &Board) {
        for col in 0..board.cols() {
            let cells: Vec<Cell> = board.column_cells(col).collect();
            let height = cells.iter().take_while(|c| c.is_piece()).count();
            assert!(
                cells[height..].iter().all(|c| c.is_empty()),
                "floating piece in column {col}:\n{board}"
            );
            assert_eq!(board.column_height(col), height);
        }
    }

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::standard();
        assert_eq!(board.rows(), 6);
        assert_eq!(board.cols(), 7);
        for row in 0..board.rows() {
            for col in 0..board.cols() {
                assert_eq!(board.get(row, col), Cell::Empty);
            }
        }
        assert_eq!(board.legal_columns().as_slice(), &[0, 1, 2, 3, 4, 5, 6]);
        assert_eq!(board.piece_count(), 0);
    }

    #[test]
    fn test_invalid_size() {
        assert_eq!(Board::new(0, 7), Err(BoardSizeError { rows: 0, cols: 7 }));
        assert_eq!(Board::new(6, 17), Err(BoardSizeError { rows: 6, cols: 17 }));
        assert!(Board::new(16, 16).is_ok());
        assert!(Board::new(1, 1).is_ok());
    }

    #[test]
    fn test_drop_piece_stacks_from_bottom() {
        let mut board = Board::standard();
        assert_eq!(board.lowest_open_row(3), Some(0));
        assert_eq!(board.drop_piece(3, Player::Red), Ok(0));
        assert_eq!(board.drop_piece(3, Player::Yellow), Ok(1));
        assert_eq!(board.get(0, 3), Cell::Piece(Player::Red));
        assert_eq!(board.get(1, 3), Cell::Piece(Player::Yellow));
        assert_eq!(board.lowest_open_row(3), Some(2));
        assert_eq!(board.column_height(3), 2);
    }

    #[test]
    fn test_column_full() {
        let mut board = Board::standard();
        for _ in 0..board.rows() {
            board.drop_piece(0, Player::Red).unwrap();
        }
        assert!(!board.is_column_open(0));
        assert_eq!(board.lowest_open_row(0), None);
        assert_eq!(
            board.drop_piece(0, Player::Yellow),
            Err(MoveError::ColumnFull { col: 0 })
        );
        assert_eq!(board.legal_columns().as_slice(), &[1, 2, 3, 4, 5, 6]);
    }

    #[test]
    fn test_column_out_of_range() {
        let mut board = Board::standard();
        assert_eq!(
            board.drop_piece(7, Player::Red),
            Err(MoveError::ColumnOutOfRange { col: 7, cols: 7 })
        );
        assert_eq!(
            board.with_move(9, Player::Red),
            Err(MoveError::ColumnOutOfRange { col: 9, cols: 7 })
        );
    }

    #[test]
    #[should_panic(expected = "column 7 is outside the board")]
    fn test_is_column_open_out_of_range_panics() {
        let _ = Board::standard().is_column_open(7);
    }

    #[test]
    #[should_panic(expected = "outside the board")]
    fn test_lowest_open_row_out_of_range_panics() {
        let _ = Board::standard().lowest_open_row(100);
    }

    #[test]
    fn test_full_board() {
        let mut board = Board::new(4, 4).unwrap();
        for col in 0..4 {
            for _ in 0..4 {
                board.drop_piece(col, Player::Red).unwrap();
            }
        }
        assert!(board.is_full());
        assert!(board.legal_columns().is_empty());
        assert_eq!(board.piece_count(), 16);
    }

    #[test]
    fn test_with_move_leaves_original_untouched() {
        let board = Board::standard();
        let (next, row) = board.with_move(2, Player::Yellow).unwrap();
        assert_eq!(row, 0);
        assert_eq!(board, Board::standard());
        assert_eq!(next.get(0, 2), Cell::Piece(Player::Yellow));
    }

    #[test]
    fn test_take_back() {
        let mut board = Board::standard();
        board.drop_piece(4, Player::Red).unwrap();
        board.drop_piece(4, Player::Yellow).unwrap();
        assert_eq!(board.take_back(4), Ok(Cell::Piece(Player::Yellow)));
        assert_eq!(board.take_back(4), Ok(Cell::Piece(Player::Red)));
        assert_eq!(board.take_back(4), Err(MoveError::ColumnEmpty { col: 4 }));
        assert_eq!(board, Board::standard());
    }

    #[test]
    fn test_parse_and_display() {
        let text = "\
            .......\n\
            .......\n\
            .......\n\
            .......\n\
            ...Y...\n\
            ..RRY..";
        let board: Board = text.parse().unwrap();
        assert_eq!(board.rows(), 6);
        assert_eq!(board.cols(), 7);
        assert_eq!(board.get(0, 2), Cell::Piece(Player::Red));
        assert_eq!(board.get(1, 3), Cell::Piece(Player::Yellow));
        assert_eq!(board.column_height(3), 2);
        assert_eq!(board.piece_count(), 5);
        assert_eq!(board.to_string(), text);
    }

    #[test]
    fn test_parse_rejects_floating_piece() {
        let text = "...\n.R.\n...";
        assert_eq!(
            text.parse::<Board>(),
            Err(ParseBoardError::FloatingPiece { row: 1, col: 1 })
        );
    }

    #[test]
    fn test_parse_errors() {
        assert_eq!(
            "....\n...".parse::<Board>(),
            Err(ParseBoardError::RaggedRow {
                row: 0,
                expected: 4,
                found: 3
            })
        );
        assert_eq!(
            "..\nRX".parse::<Board>(),
            Err(ParseBoardError::InvalidChar {
                row: 0,
                col: 1,
                ch: 'X'
            })
        );
        assert!(matches!(
            "".parse::<Board>(),
            Err(ParseBoardError::Size(_))
        ));
    }

    #[test]
    fn test_serde_roundtrip() {
        let mut board = Board::new(4, 5).unwrap();
        board.drop_piece(1, Player::Red).unwrap();
        board.drop_piece(1, Player::Yellow).unwrap();
        let json = serde_json::to_string(&board).unwrap();
        assert_eq!(json, "\"...../...../.Y.../.R...\"");
        let restored: Board = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, board);
    }

    #[test]
    fn test_deserialize_invalid_board() {
        let result: Result<Board, _> = serde_json::from_str("\"R../...\"");
        let err_msg = result.unwrap_err().to_string();
        assert!(err_msg.contains("invalid board"));
    }

    proptest! {
        #[test]
        fn prop_gravity_holds_after_any_move_sequence(
            rows in 1usize..=8,
            cols in 1usize..=8,
            moves in proptest::collection::vec(0usize..10, 0..80),
        ) {
            let mut board = Board::new(rows, cols).unwrap();
            let mut player = Player::Red;
            for col in moves {
                match board.drop_piece(col, player) {
                    Ok(row) => {
                        prop_assert_eq!(board.get(row, col), Cell::Piece(player));
                        player = player.opponent();
                    }
                    Err(MoveError::ColumnOutOfRange { .. }) => prop_assert!(col >= cols),
                    Err(MoveError::ColumnFull { .. }) => prop_assert!(!board.is_column_open(col)),
                    Err(MoveError::ColumnEmpty { .. }) => unreachable!(),
                }
                assert_gravity(&board);
            }
            let reparsed: Board = board.to_string().parse().unwrap();
            prop_assert_eq!(reparsed, board);
        }

        #[test]
        fn prop_copy_is_independent(moves in proptest::collection::vec(0usize..7, 1..30)) {
            let mut original = Board::standard();
            for &col in &moves {
                let _ = original.drop_piece(col, Player::Red);
            }
            let snapshot = original;
            let mut copy = original;
            for col in copy.legal_columns() {
                copy.drop_piece(col, Player::Yellow).unwrap();
            }
            prop_assert_eq!(original, snapshot);
        }
    }
}
