use std::{fmt, str::FromStr};

use rand::{
    Rng, SeedableRng as _,
    distr::{Distribution, StandardUniform},
};
use rand_pcg::Pcg32;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::core::shape::ShapeKind;

/// Lookahead buffer of the next three shapes.
///
/// Each shape is drawn independently and uniformly from the seven catalog
/// shapes, so repeats (including back-to-back repeats) are possible. When the
/// head is taken with [`Self::advance`], the remaining shapes move forward and
/// a freshly drawn shape is appended at the tail.
///
/// # Example
///
/// ```
/// use blockfall_engine::PieceQueue;
///
/// let mut queue = PieceQueue::new();
///
/// let next = queue.peek_next();
/// assert_eq!(queue.advance(), next);
/// assert_eq!(queue.upcoming().count(), PieceQueue::LEN);
/// ```
#[derive(Debug, Clone)]
pub struct PieceQueue {
    rng: Pcg32,
    upcoming: [ShapeKind; PieceQueue::LEN],
}

impl Default for PieceQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl PieceQueue {
    /// Number of shapes kept in the lookahead.
    pub const LEN: usize = 3;

    /// Creates a queue with a random seed.
    ///
    /// For deterministic piece generation, use [`Self::with_seed`] instead.
    #[must_use]
    pub fn new() -> Self {
        Self::with_seed(rand::rng().random())
    }

    /// Like [`Self::new`], but with a specific seed for deterministic piece generation.
    #[must_use]
    pub fn with_seed(seed: PieceSeed) -> Self {
        let mut rng = Pcg32::from_seed(seed.0);
        let upcoming = [(); Self::LEN].map(|()| rng.random());
        Self { rng, upcoming }
    }

    /// Returns the shape that [`Self::advance`] will hand out next.
    #[must_use]
    pub fn peek_next(&self) -> ShapeKind {
        self.upcoming[0]
    }

    /// Returns the upcoming shapes, head first.
    pub fn upcoming(&self) -> impl ExactSizeIterator<Item = ShapeKind> + '_ {
        self.upcoming.iter().copied()
    }

    /// Pops the head and appends a freshly drawn shape at the tail.
    pub fn advance(&mut self) -> ShapeKind {
        let head = self.upcoming[0];
        self.upcoming.rotate_left(1);
        self.upcoming[Self::LEN - 1] = self.rng.random();
        head
    }

    /// Replaces every upcoming shape with a fresh draw.
    ///
    /// The generator keeps its state, so a refilled queue continues the seeded
    /// sequence instead of repeating it.
    pub fn refill(&mut self) {
        for slot in &mut self.upcoming {
            *slot = self.rng.random();
        }
    }
}

/// Seed for deterministic piece generation.
///
/// A 128-bit seed for the queue's random number generator. The same seed
/// always produces the same sequence of shapes, which makes sessions
/// reproducible for debugging and testing.
///
/// Seeds serialize as, and parse from, a 32-character hex string.
///
/// # Example
///
/// ```
/// use blockfall_engine::{PieceQueue, PieceSeed};
/// use rand::Rng as _;
///
/// let seed: PieceSeed = rand::rng().random();
///
/// let mut queue1 = PieceQueue::with_seed(seed);
/// let mut queue2 = PieceQueue::with_seed(seed);
/// assert_eq!(queue1.advance(), queue2.advance());
///
/// let parsed: PieceSeed = seed.to_string().parse().unwrap();
/// assert_eq!(parsed, seed);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PieceSeed([u8; 16]);

impl PieceSeed {
    #[must_use]
    pub const fn from_bytes(bytes: [u8; 16]) -> Self {
        Self(bytes)
    }

    #[must_use]
    pub const fn to_bytes(self) -> [u8; 16] {
        self.0
    }
}

/// Error returned when a [`PieceSeed`] string is not 32 hex characters.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error)]
#[display("invalid hex seed {input:?}: expected 32 hex characters")]
pub struct SeedParseError {
    #[error(not(source))]
    input: String,
}

impl fmt::Display for PieceSeed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let num = u128::from_be_bytes(self.0);
        write!(f, "{num:032x}")
    }
}

impl FromStr for PieceSeed {
    type Err = SeedParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let err = || SeedParseError {
            input: s.to_owned(),
        };
        if s.len() != 32 || !s.bytes().all(|b| b.is_ascii_hexdigit()) {
            return Err(err());
        }
        let num = u128::from_str_radix(s, 16).map_err(|_| err())?;
        Ok(Self(num.to_be_bytes()))
    }
}

impl Serialize for PieceSeed {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for PieceSeed {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let hex_str = String::deserialize(deserializer)?;
        hex_str.parse().map_err(serde::de::Error::custom)
    }
}

/// Allows generating random `PieceSeed` values using the standard random distribution.
impl Distribution<PieceSeed> for StandardUniform {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> PieceSeed {
        let mut seed = [0; 16];
        rng.fill(&mut seed);
        PieceSeed(seed)
    }
}
