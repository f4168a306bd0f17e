//! Simulation time model.
//!
//! Time is a monotonically increasing `Turn` counter.  There is no mapping to
//! wall-clock time: a turn is the only unit, and every move takes a whole
//! number of turns.

use std::fmt;

/// A simulation turn counter.  The first simulated turn is `Turn(1)`.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Turn(pub u64);

impl Turn {
    pub const ZERO: Turn = Turn(0);

    /// The turn immediately after `self`.
    #[inline]
    pub fn next(self) -> Turn {
        Turn(self.0 + 1)
    }
}

impl fmt::Display for Turn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}
