use oxifour_evaluator::{HeuristicWeights, WeightsError};
use serde::{Deserialize, Serialize};

use crate::SearchSeed;

/// Depth used for the engine's real moves.
pub const DEFAULT_DEPTH: u32 = 5;

/// Deepest search accepted by [`SearchConfig::validate`] (one ply per cell of a
/// standard board).
pub const MAX_DEPTH: u32 = 42;

#[derive(Debug, Clone, Copy, PartialEq, Eq, derive_more::Display, derive_more::Error)]
pub enum ConfigError {
    #[display("search depth must be at least 1")]
    ZeroDepth,
    #[display("search depth {depth} exceeds the maximum of {}", MAX_DEPTH)]
    DepthTooLarge { depth: u32 },
    #[display("{_0}")]
    Weights(WeightsError),
}

impl From<WeightsError> for ConfigError {
    fn from(err: WeightsError) -> Self {
        Self::Weights(err)
    }
}

/// Search engine configuration.
///
/// Loadable from JSON; every field is optional:
///
/// ```
/// use oxifour_search::SearchConfig;
///
/// let config: SearchConfig = serde_json::from_str(r#"{
///     "depth": 3,
///     "seed": "000000000000000000000000000000ff",
///     "weights": { "center_piece": 4 }
/// }"#).unwrap();
/// assert_eq!(config.depth, 3);
/// assert_eq!(config.weights.center_piece, 4);
/// assert_eq!(config.weights.four, 100);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchConfig {
    /// Plies searched below the current position.
    pub depth: u32,
    /// Tie-break seed. `None` draws a fresh seed from the thread RNG.
    pub seed: Option<SearchSeed>,
    pub weights: HeuristicWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            depth: DEFAULT_DEPTH,
            seed: None,
            weights: HeuristicWeights::default(),
        }
    }
}

impl SearchConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        match self.depth {
            0 => return Err(ConfigError::ZeroDepth),
            depth if depth > MAX_DEPTH => return Err(ConfigError::DepthTooLarge { depth }),
            _ => {}
        }
        self.weights.validate()?;
        Ok(())
    }
}
