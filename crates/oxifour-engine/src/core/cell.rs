use serde::{Deserialize, Serialize};

/// One of the two sides of a game.
///
/// `Red` and `Yellow` are colors only; which side is the maximizing player in a
/// search is decided by the caller.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    derive_more::Display,
    derive_more::FromStr,
)]
#[serde(rename_all = "snake_case")]
pub enum Player {
    Red,
    Yellow,
}

impl Player {
    pub const ALL: [Self; 2] = [Self::Red, Self::Yellow];

    /// Returns the other player.
    #[must_use]
    pub const fn opponent(self) -> Self {
        match self {
            Self::Red => Self::Yellow,
            Self::Yellow => Self::Red,
        }
    }

    /// Character used for this player's pieces in the board text format.
    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Red => 'R',
            Self::Yellow => 'Y',
        }
    }

    #[must_use]
    pub const fn from_char(c: char) -> Option<Self> {
        match c {
            'R' | 'r' => Some(Self::Red),
            'Y' | 'y' => Some(Self::Yellow),
            _ => None,
        }
    }
}

/// Content of a single board cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, derive_more::IsVariant)]
pub enum Cell {
    /// No piece.
    #[default]
    Empty,
    /// A piece owned by a player.
    Piece(Player),
}

impl Cell {
    /// Returns the owner of the piece in this cell, if any.
    #[must_use]
    pub const fn player(self) -> Option<Player> {
        match self {
            Self::Empty => None,
            Self::Piece(player) => Some(player),
        }
    }

    #[must_use]
    pub fn is_owned_by(self, player: Player) -> bool {
        self == Self::Piece(player)
    }

    #[must_use]
    pub const fn as_char(self) -> char {
        match self {
            Self::Empty => '.',
            Self::Piece(player) => player.as_char(),
        }
    }
}

impl From<Player> for Cell {
    fn from(player: Player) -> Self {
        Self::Piece(player)
    }
}
