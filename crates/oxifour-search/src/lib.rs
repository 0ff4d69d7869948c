//! Game-tree search for four-in-a-row.
//!
//! [`Minimax`] explores the game tree to a fixed depth with alpha-beta pruning
//! and scores leaves with a [`PositionEvaluator`](oxifour_evaluator::PositionEvaluator).
//! [`SearchConfig`] bundles the depth, heuristic weights and tie-break seed so a
//! whole engine can be loaded from a JSON file.
//!
//! Searches are reproducible: given the same [`SearchSeed`], board, depth and
//! evaluator, [`Minimax::search`] returns the same [`SearchOutcome`].

pub use self::{config::*, minimax::*, seed::*};

mod config;
mod minimax;
mod seed;
