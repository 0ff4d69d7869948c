//! Depth-limited minimax with alpha-beta pruning.
//!
//! # Algorithm
//!
//! Every node first checks for a terminal position. When the depth budget is
//! exhausted or the game is over, the node is scored from the maximizer's point
//! of view:
//!
//! | position                     | score                                  |
//! |------------------------------|----------------------------------------|
//! | maximizer has four in a row  | [`WIN_SCORE`]                          |
//! | minimizer has four in a row  | `-WIN_SCORE`                           |
//! | board full, no winner        | `0`                                    |
//! | depth exhausted, game open   | position evaluation for the maximizer  |
//!
//! Otherwise the legal columns are explored in ascending order. The candidate
//! column starts as a uniformly random legal column, and is replaced whenever a
//! child's score strictly improves on the best value so far. After each child,
//! `alpha` (maximizing) or `beta` (minimizing) is tightened, and exploration
//! stops once `alpha >= beta`.
//!
//! Pruning never changes the value backed up to the root, only the number of
//! nodes visited. Among columns with equal value, the first one found wins.
//!
//! # Board Handling
//!
//! The search copies the root board once and then works on that copy with
//! [`Board::drop_piece`] / [`Board::take_back`]. Sibling branches never observe
//! each other's moves because each move is undone before the next column is
//! tried, and the caller's board is never touched.

use oxifour_engine::{Board, Cell, Player};
use oxifour_evaluator::{PositionEvaluator, Score, WindowEvaluator};
use rand::{Rng, seq::IndexedRandom as _};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::{ConfigError, SearchConfig, SearchSeed};

/// Score of a position the maximizer has won.
///
/// Larger than any heuristic score allowed by
/// [`HeuristicWeights::validate`](oxifour_evaluator::HeuristicWeights::validate).
pub const WIN_SCORE: Score = 100_000_000_000_000;

const INFINITY: Score = Score::MAX;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum SearchError {
    #[display("search depth must be at least 1")]
    ZeroDepth,
    #[display("position is already decided")]
    TerminalPosition,
    #[display("both players have four in a row")]
    ConflictingWinners,
    #[display("no legal move available")]
    NoLegalMoves,
}

/// Node counters of a single search.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchStats {
    /// Positions visited, including the root.
    pub nodes: u64,
    /// Nodes whose remaining columns were pruned.
    pub cutoffs: u64,
}

/// Result of [`Minimax::search`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchOutcome {
    /// Column to play.
    pub column: usize,
    /// Backed-up minimax score of the root, from the maximizer's point of view.
    pub score: Score,
    pub stats: SearchStats,
}

impl SearchOutcome {
    /// Returns `true` if the score proves a forced win for the maximizer.
    #[must_use]
    pub fn is_forced_win(&self) -> bool {
        self.score >= WIN_SCORE
    }

    /// Returns `true` if the score proves a forced loss for the maximizer.
    #[must_use]
    pub fn is_forced_loss(&self) -> bool {
        self.score <= -WIN_SCORE
    }
}

/// Minimax search engine.
///
/// Owns the position evaluator used at leaf nodes and the random source used for
/// the initial candidate column of every node.
///
/// # Example
///
/// ```
/// use oxifour_engine::{Board, Player};
/// use oxifour_evaluator::WindowEvaluator;
/// use oxifour_search::{Minimax, SearchSeed};
///
/// let mut engine = Minimax::new(WindowEvaluator::default(), SearchSeed::from_u128(1));
/// let outcome = engine.search(&Board::standard(), 1, Player::Yellow).unwrap();
/// assert_eq!(outcome.column, 3);
/// assert_eq!(outcome.score, 3);
/// ```
#[derive(Debug, Clone)]
pub struct Minimax<E = WindowEvaluator> {
    evaluator: E,
    rng: Pcg32,
}

impl Minimax<WindowEvaluator> {
    /// Builds an engine with the window evaluator and seed of `config`.
    pub fn from_config(config: &SearchConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let seed = config.seed.unwrap_or_else(|| rand::rng().random());
        Ok(Self::new(WindowEvaluator::new(config.weights), seed))
    }
}

impl<E> Minimax<E>
where
    E: PositionEvaluator,
{
    #[must_use]
    pub fn new(evaluator: E, seed: SearchSeed) -> Self {
        Self {
            evaluator,
            rng: seed.rng(),
        }
    }

    #[must_use]
    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    /// Searches `depth` plies below `board` with `maximizer` to move.
    ///
    /// The root must be an open position: not full and without four in a row.
    pub fn search(
        &mut self,
        board: &Board,
        depth: u32,
        maximizer: Player,
    ) -> Result<SearchOutcome, SearchError> {
        if depth == 0 {
            return Err(SearchError::ZeroDepth);
        }
        let winner = board
            .winner()
            .map_err(|_| SearchError::ConflictingWinners)?;
        if winner.is_some() || board.is_full() {
            return Err(SearchError::TerminalPosition);
        }

        let mut node = Node {
            evaluator: &self.evaluator,
            rng: &mut self.rng,
            maximizer,
            root_depth: depth,
            stats: SearchStats::default(),
        };
        let mut scratch = *board;
        let (column, score) = node.minimax(&mut scratch, depth, -INFINITY, INFINITY, true);
        let stats = node.stats;
        debug_assert_eq!(&scratch, board);

        let column = column.ok_or(SearchError::NoLegalMoves)?;
        debug!(
            column,
            score,
            depth,
            nodes = stats.nodes,
            cutoffs = stats.cutoffs,
            "search completed"
        );
        Ok(SearchOutcome {
            column,
            score,
            stats,
        })
    }
}

struct Node<'a, E, R: ?Sized> {
    evaluator: &'a E,
    rng: &'a mut R,
    maximizer: Player,
    root_depth: u32,
    stats: SearchStats,
}

impl<E, R> Node<'_, E, R>
where
    E: PositionEvaluator,
    R: Rng + ?Sized,
{
    fn minimax(
        &mut self,
        board: &mut Board,
        depth: u32,
        mut alpha: Score,
        mut beta: Score,
        maximizing: bool,
    ) -> (Option<usize>, Score) {
        self.stats.nodes += 1;

        let legal = board.legal_columns();
        let maximizer_won = board.has_four_in_a_row(self.maximizer);
        let minimizer_won = board.has_four_in_a_row(self.maximizer.opponent());
        debug_assert!(!(maximizer_won && minimizer_won));
        let terminal = maximizer_won || minimizer_won || legal.is_empty();

        if depth == 0 || terminal {
            let score = if maximizer_won {
                WIN_SCORE
            } else if minimizer_won {
                -WIN_SCORE
            } else if terminal {
                0
            } else {
                self.evaluator.evaluate(board, self.maximizer)
            };
            return (None, score);
        }

        let mover = if maximizing {
            self.maximizer
        } else {
            self.maximizer.opponent()
        };
        let mut column = legal.choose(&mut *self.rng).copied();
        let mut value = if maximizing { -INFINITY } else { INFINITY };

        for &col in &legal {
            if board.drop_piece(col, mover).is_err() {
                continue;
            }
            let (_, score) = self.minimax(board, depth - 1, alpha, beta, !maximizing);
            let undone = board.take_back(col);
            debug_assert_eq!(undone, Ok(Cell::Piece(mover)));

            if depth == self.root_depth {
                trace!(col, score, "root move evaluated");
            }

            if maximizing {
                if score > value {
                    value = score;
                    column = Some(col);
                }
                alpha = alpha.max(value);
            } else {
                if score < value {
                    value = score;
                    column = Some(col);
                }
                beta = beta.min(value);
            }
            if alpha >= beta {
                self.stats.cutoffs += 1;
                break;
            }
        }

        (column, value)
    }
}
