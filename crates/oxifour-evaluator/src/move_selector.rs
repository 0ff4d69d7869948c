//! Greedy move selection: one-ply lookahead without recursion.
//!
//! [`GreedyMoveSelector`] applies each legal move once, scores the resulting
//! board with a [`PositionEvaluator`], and keeps the column with the strictly
//! highest score. It is the baseline opponent the minimax engine is measured
//! against.
//!
//! # Design: Greedy One-Step Lookahead
//!
//! The selector never looks at the opponent's reply. It is fast (one evaluation
//! per column) but blind to threats that only appear after the next move.
//!
//! # Tie-breaking
//!
//! The candidate starts as a uniformly random legal column and the best score
//! starts below every real score, so the first column evaluated always replaces
//! it; later columns only win on a strictly higher score. Pass a seeded RNG for
//! reproducible choices.

use oxifour_engine::{Board, Player};
use rand::{Rng, seq::IndexedRandom as _};

use crate::{PositionEvaluator, Score};

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SelectError {
    #[display("no legal move: every column is full")]
    NoLegalMoves,
}

/// Picks the column whose resulting position scores best for the mover.
///
/// # Example
///
/// ```
/// use oxifour_engine::{Board, Player};
/// use oxifour_evaluator::{GreedyMoveSelector, WindowEvaluator};
/// use rand::SeedableRng as _;
///
/// let selector = GreedyMoveSelector::new(WindowEvaluator::default());
/// let mut rng = rand_pcg::Pcg32::seed_from_u64(0);
///
/// // On an empty board only the center bonus separates the columns.
/// let col = selector.select_best_move(&Board::standard(), Player::Red, &mut rng).unwrap();
/// assert_eq!(col, 3);
/// ```
#[derive(Debug, Clone)]
pub struct GreedyMoveSelector<E> {
    evaluator: E,
}

impl<E> GreedyMoveSelector<E>
where
    E: PositionEvaluator,
{
    #[must_use]
    pub fn new(evaluator: E) -> Self {
        Self { evaluator }
    }

    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Selects the best column for `player` and returns it with its score.
    pub fn select_best_move_with_score<R>(
        &self,
        board: &Board,
        player: Player,
        rng: &mut R,
    ) -> Result<(usize, Score), SelectError>
    where
        R: Rng + ?Sized,
    {
        let legal = board.legal_columns();
        let mut best_col = *legal.choose(rng).ok_or(SelectError::NoLegalMoves)?;
        let mut best_score = Score::MIN;

        for &col in &legal {
            let mut next = *board;
            // `col` comes from `legal_columns`, so the drop cannot fail.
            if next.drop_piece(col, player).is_err() {
                continue;
            }
            let score = self.evaluator.evaluate(&next, player);
            if score > best_score {
                best_score = score;
                best_col = col;
            }
        }

        Ok((best_col, best_score))
    }

    /// Selects the best column for `player`.
    pub fn select_best_move<R>(
        &self,
        board: &Board,
        player: Player,
        rng: &mut R,
    ) -> Result<usize, SelectError>
    where
        R: Rng + ?Sized,
    {
        self.select_best_move_with_score(board, player, rng)
            .map(|(col, _)| col)
    }
}

#[cfg(test)]
mod tests {
    use rand::SeedableRng as _;
    use rand_pcg::Pcg32;

    use super::*;
    use crate::{HeuristicWeights, WindowEvaluator};

    fn selector() -> GreedyMoveSelector<WindowEvaluator> {
        GreedyMoveSelector::new(WindowEvaluator::default())
    }

    #[test]
    fn test_prefers_center_on_empty_board() {
        for seed in 0..8 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let (col, score) = selector()
                .select_best_move_with_score(&Board::standard(), Player::Yellow, &mut rng)
                .unwrap();
            assert_eq!(col, 3);
            assert_eq!(score, 3);
        }
    }

    #[test]
    fn test_completes_four() {
        let board: Board = "
            .......
            YYY....
            RRR...."
            .parse()
            .unwrap();
        let mut rng = Pcg32::seed_from_u64(1);
        let col = selector()
            .select_best_move(&board, Player::Red, &mut rng)
            .unwrap();
        assert_eq!(col, 3);
    }

    #[test]
    fn test_ties_keep_first_strict_improvement() {
        // With the center bonus disabled every column of an empty board scores 0,
        // so the lowest column wins regardless of the random initial pick.
        let weights = HeuristicWeights {
            center_piece: 0,
            ..HeuristicWeights::CLASSIC
        };
        let selector = GreedyMoveSelector::new(WindowEvaluator::new(weights));
        for seed in 0..8 {
            let mut rng = Pcg32::seed_from_u64(seed);
            let col = selector
                .select_best_move(&Board::standard(), Player::Red, &mut rng)
                .unwrap();
            assert_eq!(col, 0);
        }
    }

    #[test]
    fn test_skips_full_columns() {
        let mut board = Board::new(4, 4).unwrap();
        for col in [0, 1, 3] {
            for player in [Player::Red, Player::Yellow, Player::Red, Player::Yellow] {
                board.drop_piece(col, player).unwrap();
            }
        }
        let mut rng = Pcg32::seed_from_u64(3);
        let col = selector()
            .select_best_move(&board, Player::Red, &mut rng)
            .unwrap();
        assert_eq!(col, 2);
    }

    #[test]
    fn test_full_board_is_an_error() {
        let board: Board = "RY\nYR".parse().unwrap();
        let mut rng = Pcg32::seed_from_u64(0);
        assert_eq!(
            selector().select_best_move(&board, Player::Red, &mut rng),
            Err(SelectError::NoLegalMoves)
        );
    }
}
