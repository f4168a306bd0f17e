//! Zones, zone types, and connections.

use std::fmt;
use std::str::FromStr;

use fly_core::ZoneId;

use crate::MapError;

// ── ZoneType ──────────────────────────────────────────────────────────────────

/// Zone type: decides the entry cost and whether drones may enter at all.
///
/// | Type         | Entry cost | Notes                                     |
/// |--------------|------------|-------------------------------------------|
/// | `Normal`     | 1 turn     | default                                   |
/// | `Priority`   | 1 turn     |                                           |
/// | `Restricted` | 2 turns    | one turn in transit, one turn to arrive   |
/// | `Blocked`    | none       | never part of the traversable graph       |
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ZoneType {
    #[default]
    Normal,
    Blocked,
    Restricted,
    Priority,
}

impl ZoneType {
    /// Turns required to enter a zone of this type, or `None` if it cannot be
    /// entered.
    #[inline]
    pub fn movement_cost(self) -> Option<u32> {
        match self {
            ZoneType::Normal | ZoneType::Priority => Some(1),
            ZoneType::Restricted => Some(2),
            ZoneType::Blocked => None,
        }
    }

    #[inline]
    pub fn is_traversable(self) -> bool {
        self != ZoneType::Blocked
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ZoneType::Normal => "normal",
            ZoneType::Blocked => "blocked",
            ZoneType::Restricted => "restricted",
            ZoneType::Priority => "priority",
        }
    }
}

impl FromStr for ZoneType {
    type Err = MapError;

    /// Case-insensitive parse of `normal | blocked | restricted | priority`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(ZoneType::Normal),
            "blocked" => Ok(ZoneType::Blocked),
            "restricted" => Ok(ZoneType::Restricted),
            "priority" => Ok(ZoneType::Priority),
            _ => Err(MapError::InvalidZoneType(s.to_owned())),
        }
    }
}

impl fmt::Display for ZoneType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Zone ──────────────────────────────────────────────────────────────────────

/// A named node of the routing graph.
///
/// Coordinates are carried for display only; they never influence costs or
/// ordering.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Zone {
    pub name:       String,
    pub x:          i32,
    pub y:          i32,
    pub kind:       ZoneType,
    pub color:      Option<String>,
    /// Occupancy limit.  Ignored for the end zone, which is unconstrained.
    pub max_drones: u32,
    pub is_start:   bool,
    pub is_end:     bool,
}

impl Zone {
    /// An ordinary hub: `Normal`, capacity 1, no color.
    pub fn hub(name: impl Into<String>, x: i32, y: i32) -> Self {
        Self {
            name: name.into(),
            x,
            y,
            kind: ZoneType::Normal,
            color: None,
            max_drones: 1,
            is_start: false,
            is_end: false,
        }
    }

    /// The start hub, where every drone begins.
    pub fn start(name: impl Into<String>, x: i32, y: i32) -> Self {
        Self { is_start: true, ..Self::hub(name, x, y) }
    }

    /// The end hub, where drones are delivered.
    pub fn end(name: impl Into<String>, x: i32, y: i32) -> Self {
        Self { is_end: true, ..Self::hub(name, x, y) }
    }

    pub fn with_kind(mut self, kind: ZoneType) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_max_drones(mut self, max_drones: u32) -> Self {
        self.max_drones = max_drones;
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }
}

/// `true` if `name` can be used as a zone name: non-empty, and free of the
/// connection separator `-` and of whitespace.
pub fn is_valid_zone_name(name: &str) -> bool {
    !name.is_empty() && !name.chars().any(|c| c == '-' || c.is_whitespace())
}

// ── Connection ────────────────────────────────────────────────────────────────

/// An undirected link between two zones.
///
/// Stored canonically with `a < b`; since zone ids follow name order, this is
/// the lexicographically ordered name pair.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Connection {
    pub a: ZoneId,
    pub b: ZoneId,
    /// Drones that may cross this link in a single turn (either direction).
    pub max_link_capacity: u32,
}

impl Connection {
    /// The endpoint opposite `zone`, or `None` if `zone` is not an endpoint.
    #[inline]
    pub fn other(&self, zone: ZoneId) -> Option<ZoneId> {
        if zone == self.a {
            Some(self.b)
        } else if zone == self.b {
            Some(self.a)
        } else {
            None
        }
    }

    /// Canonical (ordered) endpoint pair.
    #[inline]
    pub fn pair(&self) -> (ZoneId, ZoneId) {
        (self.a, self.b)
    }
}

/// Order two endpoints canonically.
#[inline]
pub(crate) fn canonical(x: ZoneId, y: ZoneId) -> (ZoneId, ZoneId) {
    if x <= y { (x, y) } else { (y, x) }
}
