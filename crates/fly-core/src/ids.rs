//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into `Vec`s via `id.0 as usize`, but callers should prefer
//! the `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
///
/// `prefix` is the short tag written by `Display` (`D7`, `Z3`, …).
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty) = $prefix:literal;) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}{}", $prefix, self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Identity of a drone.  **1-based**: a fleet of `n` drones uses
    /// `DroneId(1) ..= DroneId(n)`, and `Display` yields the wire form `D<n>`.
    pub struct DroneId(u32) = "D";
}

typed_id! {
    /// Index of a zone in a `ZoneMap`.
    ///
    /// Zone ids are assigned in ascending lexicographic order of zone name,
    /// so `ZoneId` ordering is name ordering.
    pub struct ZoneId(u32) = "Z";
}

typed_id! {
    /// Index of an (undirected) connection in a `ZoneMap`.
    pub struct ConnectionId(u32) = "C";
}

impl DroneId {
    /// Zero-based slot of this drone, for indexing per-drone `Vec`s.
    ///
    /// # Panics
    /// Panics in debug mode on `DroneId(0)`, which is never a valid drone.
    #[inline]
    pub fn slot(self) -> usize {
        self.index() - 1
    }

    /// All drone ids of a fleet of `count` drones, in ascending order.
    pub fn fleet(count: u32) -> impl Iterator<Item = DroneId> {
        (1..=count).map(DroneId)
    }
}
