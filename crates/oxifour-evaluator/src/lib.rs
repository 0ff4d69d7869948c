//! Heuristic evaluation of four-in-a-row positions.
//!
//! This crate implements the two levels of evaluation below the search engine:
//!
//! 1. **Position Evaluation** ([`position_evaluator`]) - Scores a board for one
//!    player from length-4 window patterns and center-column control.
//!
//! 2. **Greedy Move Selection** ([`move_selector`]) - Picks a column by scoring
//!    every one-ply successor, without recursion.
//!
//! # Architecture
//!
//! ```text
//! Minimax search (oxifour-search)
//!     ↓ uses at leaf nodes
//! Position Evaluation (score a board)
//!     ↑ uses per legal column
//! Greedy Move Selection (baseline opponent)
//! ```
//!
//! All scoring constants live in [`HeuristicWeights`], so alternative heuristics
//! can be tested without touching the search algorithm.

pub use self::{move_selector::*, position_evaluator::*, weights::*};

pub mod move_selector;
pub mod position_evaluator;
pub mod weights;

/// Evaluation score. Higher favors the player the score was computed for.
pub type Score = i64;
