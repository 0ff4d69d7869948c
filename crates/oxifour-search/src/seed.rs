use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Seed for the search engine's tie-breaking random source.
///
/// This is a 128-bit (16-byte) seed used to initialize a [`Pcg32`]. Using the
/// same seed makes every random choice of a search (and of a whole self-play
/// run) reproducible. The text form is a 32-character hex string, used both by
/// `serde` and by `FromStr`/`Display`.
///
/// # Example
///
/// ```
/// use oxifour_search::SearchSeed;
/// use rand::Rng as _;
///
/// let seed: SearchSeed = rand::rng().random();
/// let parsed: SearchSeed = seed.to_string().parse().unwrap();
/// assert_eq!(seed, parsed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SearchSeed([u8; 16]);

#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid seed {text:?}: expected 32 hex characters")]
pub struct ParseSeedError {
    text: String,
}

impl SearchSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn from_u128(num: u128) -> Self {
        Self(num.to_be_bytes())
    }

    /// Creates the random number generator for this seed.
    #[must_use]
    pub fn rng(self) -> Pcg32 {
        Pcg32::from_seed(self.0)
    }
}

impl fmt::Display for SearchSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:032x}", u128::from_be_bytes(self.0))
    }
}

impl FromStr for SearchSeed {
    type Err = ParseSeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || ParseSeedError { text: s.to_owned() };
        if s.len() != 32 {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self::from_u128(num))
    }
}

impl Serialize for SearchSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for SearchSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `SearchSeed` values with `rng.random()`.
impl Distribution<SearchSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> SearchSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        SearchSeed(seed)
    }
}
