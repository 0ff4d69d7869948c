//! Position evaluation: scoring a non-terminal board for one player.
//!
//! The score of a position is the sum of two parts:
//!
//! 1. **Window patterns** - every horizontal, vertical and diagonal length-4
//!    window is scored by [`evaluate_window`]
//! 2. **Center control** - each of the player's pieces in the middle column
//!    (`cols / 2`) adds [`HeuristicWeights::center_piece`]
//!
//! The evaluation is not symmetric: the opponent's open threes are penalized, but
//! the opponent's other patterns are ignored.

use std::fmt;

use oxifour_engine::{Board, Cell, Player, WINDOW_LENGTH};

use crate::{HeuristicWeights, Score};

/// Scores board positions for a player (higher is better for that player).
///
/// The search engine uses this at leaf nodes when the depth budget is exhausted,
/// so implementations must be pure functions of the board contents.
pub trait PositionEvaluator: fmt::Debug + Send + Sync {
    fn evaluate(&self, board: &Board, player: Player) -> Score;
}

impl<E> PositionEvaluator for &E
where
    E: PositionEvaluator + ?Sized,
{
    fn evaluate(&self, board: &Board, player: Player) -> Score {
        (**self).evaluate(board, player)
    }
}

impl<E> PositionEvaluator for Box<E>
where
    E: PositionEvaluator + ?Sized,
{
    fn evaluate(&self, board: &Board, player: Player) -> Score {
        (**self).evaluate(board, player)
    }
}

/// Window-pattern evaluator driven by [`HeuristicWeights`].
///
/// # Example
///
/// ```
/// use oxifour_engine::{Board, Player};
/// use oxifour_evaluator::{PositionEvaluator, WindowEvaluator};
///
/// let evaluator = WindowEvaluator::default();
/// let mut board = Board::standard();
/// board.drop_piece(3, Player::Red).unwrap();
///
/// // One center piece: +3, and no window holds two or more pieces yet.
/// assert_eq!(evaluator.evaluate(&board, Player::Red), 3);
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WindowEvaluator {
    weights: HeuristicWeights,
}

impl WindowEvaluator {
    #[must_use]
    pub fn new(weights: HeuristicWeights) -> Self {
        Self { weights }
    }

    #[must_use]
    pub fn weights(&self) -> &HeuristicWeights {
        &self.weights
    }
}

impl PositionEvaluator for WindowEvaluator {
    #[inline]
    fn evaluate(&self, board: &Board, player: Player) -> Score {
        score_position(board, player, &self.weights)
    }
}

/// Scores one window for `player`.
///
/// Own patterns (four, open three, open two) and the opponent's open three are
/// scored independently and added; every other configuration scores 0.
#[must_use]
pub fn evaluate_window(
    cells: &[Cell; WINDOW_LENGTH],
    player: Player,
    weights: &HeuristicWeights,
) -> Score {
    let own = cells.iter().filter(|c| c.is_owned_by(player)).count();
    let opponent = cells
        .iter()
        .filter(|c| c.is_owned_by(player.opponent()))
        .count();
    let empty = WINDOW_LENGTH - own - opponent;

    let mut score = match (own, empty) {
        (4, _) => weights.four,
        (3, 1) => weights.open_three,
        (2, 2) => weights.open_two,
        _ => 0,
    };
    if opponent == 3 && empty == 1 {
        score += weights.opponent_open_three;
    }
    score
}

/// Scores a whole board for `player`: window patterns plus the center bonus.
#[must_use]
pub fn score_position(board: &Board, player: Player, weights: &HeuristicWeights) -> Score {
    let center_pieces = board
        .column_cells(board.center_column())
        .filter(|c| c.is_owned_by(player))
        .count();
    let center = weights.center_piece * Score::try_from(center_pieces).unwrap_or(Score::MAX);

    board
        .windows()
        .map(|cells| evaluate_window(&cells, player, weights))
        .sum::<Score>()
        + center
}

#[cfg(test)]
mod tests {
    use super::*;

    const R: Cell = Cell::Piece(Player::Red);
    const Y: Cell = Cell::Piece(Player::Yellow);
    const E: Cell = Cell::Empty;

    fn window_score(cells: [Cell; 4]) -> Score {
        evaluate_window(&cells, Player::Red, &HeuristicWeights::CLASSIC)
    }

    #[test]
    fn test_window_patterns() {
        assert_eq!(window_score([R, R, R, R]), 100);
        assert_eq!(window_score([R, R, E, R]), 5);
        assert_eq!(window_score([E, R, R, E]), 2);
        assert_eq!(window_score([Y, Y, E, Y]), -4);
        assert_eq!(window_score([E, E, E, E]), 0);
        assert_eq!(window_score([R, E, E, E]), 0);
        assert_eq!(window_score([R, R, R, Y]), 0);
        assert_eq!(window_score([R, R, Y, E]), 0);
        assert_eq!(window_score([Y, Y, Y, Y]), 0);
        assert_eq!(window_score([Y, Y, E, E]), 0);
    }

    #[test]
    fn test_window_uses_weights() {
        let weights = HeuristicWeights {
            open_two: 7,
            opponent_open_three: -50,
            ..HeuristicWeights::CLASSIC
        };
        assert_eq!(evaluate_window(&[R, E, R, E], Player::Red, &weights), 7);
        assert_eq!(evaluate_window(&[Y, Y, Y, E], Player::Red, &weights), -50);
        assert_eq!(evaluate_window(&[Y, Y, Y, E], Player::Yellow, &weights), 5);
    }

    #[test]
    fn test_empty_board_scores_zero() {
        let board = Board::standard();
        let evaluator = WindowEvaluator::default();
        assert_eq!(evaluator.evaluate(&board, Player::Red), 0);
        assert_eq!(evaluator.evaluate(&board, Player::Yellow), 0);
    }

    #[test]
    fn test_center_preference() {
        let evaluator = WindowEvaluator::default();
        let (center, _) = Board::standard().with_move(3, Player::Red).unwrap();
        let (edge, _) = Board::standard().with_move(0, Player::Red).unwrap();
        assert_eq!(evaluator.evaluate(&center, Player::Red), 3);
        assert_eq!(evaluator.evaluate(&edge, Player::Red), 0);
        // Opponent center pieces are not counted.
        assert_eq!(evaluator.evaluate(&center, Player::Yellow), 0);
    }

    #[test]
    fn test_center_column_of_even_width_board() {
        let mut board = Board::new(4, 6).unwrap();
        board.drop_piece(3, Player::Yellow).unwrap();
        assert_eq!(board.center_column(), 3);
        assert_eq!(
            score_position(&board, Player::Yellow, &HeuristicWeights::CLASSIC),
            3
        );
    }

    #[test]
    fn test_open_three_on_bottom_row() {
        let board: Board = "
            .......
            RRR...."
            .parse()
            .unwrap();
        // Horizontal windows on row 0: [RRR.] = 5, [RR..] = 2; no other window
        // holds two red pieces with two empty cells.
        assert_eq!(
            score_position(&board, Player::Red, &HeuristicWeights::CLASSIC),
            7
        );
        // For yellow only the penalty for red's open three applies.
        assert_eq!(
            score_position(&board, Player::Yellow, &HeuristicWeights::CLASSIC),
            -4
        );
    }

    #[test]
    fn test_boxed_and_borrowed_evaluators() {
        let evaluator = WindowEvaluator::default();
        let boxed: Box<dyn PositionEvaluator> = Box::new(evaluator);
        let (board, _) = Board::standard().with_move(3, Player::Red).unwrap();
        assert_eq!(boxed.evaluate(&board, Player::Red), 3);
        assert_eq!((&evaluator).evaluate(&board, Player::Red), 3);
    }
}
