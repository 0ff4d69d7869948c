//! Tunable heuristic weights.
//!
//! The default values reproduce the classic connect-four window heuristic:
//!
//! | configuration (per window)            | weight |
//! |---------------------------------------|--------|
//! | four own pieces                       | `100`  |
//! | three own pieces + one empty          | `5`    |
//! | two own pieces + two empty            | `2`    |
//! | three opponent pieces + one empty     | `-4`   |
//! | own piece in the center column (each) | `3`    |
//!
//! Weights can be loaded from JSON; missing fields fall back to the defaults.
//!
//! ```
//! use oxifour_evaluator::HeuristicWeights;
//!
//! let weights: HeuristicWeights = serde_json::from_str(r#"{ "open_three": 8 }"#).unwrap();
//! assert_eq!(weights.open_three, 8);
//! assert_eq!(weights.four, 100);
//! assert!(weights.validate().is_ok());
//! ```

use serde::{Deserialize, Serialize};

use crate::Score;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("heuristic weight `{name}` = {value} exceeds the allowed magnitude {max}")]
pub struct WeightsError {
    pub name: &'static str,
    pub value: Score,
    pub max: Score,
}

/// Scoring constants of the window heuristic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct HeuristicWeights {
    /// Window holding four own pieces.
    pub four: Score,
    /// Window holding three own pieces and one empty cell.
    pub open_three: Score,
    /// Window holding two own pieces and two empty cells.
    pub open_two: Score,
    /// Window holding three opponent pieces and one empty cell.
    pub opponent_open_three: Score,
    /// Each own piece in the center column.
    pub center_piece: Score,
}

impl Default for HeuristicWeights {
    fn default() -> Self {
        Self::CLASSIC
    }
}

impl HeuristicWeights {
    pub const CLASSIC: Self = Self {
        four: 100,
        open_three: 5,
        open_two: 2,
        opponent_open_three: -4,
        center_piece: 3,
    };

    /// Largest accepted magnitude of a single weight.
    ///
    /// A 16×16 board has fewer than 1000 windows, so any heuristic sum stays
    /// several orders of magnitude below the search engine's win sentinel.
    pub const MAX_ABS_WEIGHT: Score = 1_000_000;

    fn named(&self) -> [(&'static str, Score); 5] {
        [
            ("four", self.four),
            ("open_three", self.open_three),
            ("open_two", self.open_two),
            ("opponent_open_three", self.opponent_open_three),
            ("center_piece", self.center_piece),
        ]
    }

    /// Checks that every weight is within [`Self::MAX_ABS_WEIGHT`].
    pub fn validate(&self) -> Result<(), WeightsError> {
        for (name, value) in self.named() {
            if value.unsigned_abs() > Self::MAX_ABS_WEIGHT.unsigned_abs() {
                return Err(WeightsError {
                    name,
                    value,
                    max: Self::MAX_ABS_WEIGHT,
                });
            }
        }
        Ok(())
    }
}
