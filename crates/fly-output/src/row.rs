//! Plain data row types written by output backends.

use std::fmt;

use fly_graph::ZoneMap;
use fly_sim::Move;

/// One move token, with zone names resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveRow {
    pub turn:        u64,
    pub drone:       u32,
    /// Zone the drone left; only set when it started a transit.
    pub origin:      Option<String>,
    /// Zone entered, or the restricted zone being flown into.
    pub destination: String,
    pub in_transit:  bool,
}

impl MoveRow {
    pub fn new(turn: u64, mv: &Move, map: &ZoneMap) -> Self {
        match *mv {
            Move::Enter { drone, zone } => Self {
                turn,
                drone:       drone.0,
                origin:      None,
                destination: map.name(zone).to_owned(),
                in_transit:  false,
            },
            Move::Depart { drone, from, to } => Self {
                turn,
                drone:       drone.0,
                origin:      Some(map.name(from).to_owned()),
                destination: map.name(to).to_owned(),
                in_transit:  true,
            },
        }
    }
}

/// Formats the row as its move token (`D1-B` or `D1-A-R`).
impl fmt::Display for MoveRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.origin {
            Some(origin) => write!(f, "D{}-{}-{}", self.drone, origin, self.destination),
            None => write!(f, "D{}-{}", self.drone, self.destination),
        }
    }
}

/// Counts for one simulated turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TurnSummaryRow {
    pub turn:      u64,
    pub moves:     u64,
    pub remaining: u64,
}
