//! Game flow on top of the core board types.
//!
//! - [`GameState`] - Live game: board, side to move, move history, outcome
//! - [`FirstPlayer`] - Choice of the opening player, optionally random
//! - [`PlayedMove`] - Result of applying one move to a [`GameState`]
//!
//! The decision engine never owns a [`GameState`]; it receives a copy of the
//! board and returns a column, which the game loop then plays through
//! [`GameState::play`].

pub use self::game_state::*;

mod game_state;
