//! Turn records, move tokens, and per-turn scratch counters.

use std::fmt;

use fly_core::{DroneId, Turn, ZoneId};
use fly_graph::ZoneMap;

use crate::DroneState;

// ── Move ──────────────────────────────────────────────────────────────────────

/// One token of the movement log.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Move {
    /// The drone is now in `zone` (simple move, or arrival after a transit).
    /// Wire form: `D<id>-<zone>`.
    Enter { drone: DroneId, zone: ZoneId },
    /// The drone started crossing from `from` into the restricted zone `to`.
    /// Wire form: `D<id>-<from>-<to>`.
    Depart { drone: DroneId, from: ZoneId, to: ZoneId },
}

impl Move {
    #[inline]
    pub fn drone(&self) -> DroneId {
        match *self {
            Move::Enter { drone, .. } | Move::Depart { drone, .. } => drone,
        }
    }

    /// Adapter that formats the token with zone names from `map`.
    pub fn display<'a>(&'a self, map: &'a ZoneMap) -> MoveDisplay<'a> {
        MoveDisplay { mv: self, map }
    }
}

/// [`Display`](fmt::Display) adapter returned by [`Move::display`].
pub struct MoveDisplay<'a> {
    mv:  &'a Move,
    map: &'a ZoneMap,
}

impl fmt::Display for MoveDisplay<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.mv {
            Move::Enter { drone, zone } => write!(f, "{drone}-{}", self.map.name(zone)),
            Move::Depart { drone, from, to } => {
                write!(f, "{drone}-{}-{}", self.map.name(from), self.map.name(to))
            }
        }
    }
}

// ── TurnRecord ────────────────────────────────────────────────────────────────

/// Everything that happened in one turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnRecord {
    pub turn:      Turn,
    /// Arrivals first, then move attempts in scheduling order.
    pub moves:     Vec<Move>,
    /// Drones delivered this turn.
    pub delivered: usize,
    /// Drones still undelivered after this turn.
    pub remaining: usize,
}

impl TurnRecord {
    /// The turn as one space-separated line of tokens.
    pub fn render(&self, map: &ZoneMap) -> String {
        let mut line = String::new();
        for (i, mv) in self.moves.iter().enumerate() {
            if i > 0 {
                line.push(' ');
            }
            line.push_str(&mv.display(map).to_string());
        }
        line
    }

    pub fn is_empty(&self) -> bool {
        self.moves.is_empty()
    }
}

// ── TurnScratch ───────────────────────────────────────────────────────────────

/// Per-turn counters.  Rebuilt from the fleet at the start of every move
/// phase and dropped at the end of the turn; nothing here survives a turn
/// boundary.
pub(crate) struct TurnScratch {
    /// Drones in each zone, indexed by `ZoneId`.
    pub occupancy:  Vec<u32>,
    /// Crossings of each connection this turn, indexed by `ConnectionId`.
    pub link_usage: Vec<u32>,
    /// Drones in transit toward each zone, indexed by `ZoneId`.
    pub incoming:   Vec<u32>,
}

impl TurnScratch {
    pub fn snapshot<'a>(map: &ZoneMap, fleet: impl Iterator<Item = &'a DroneState>) -> Self {
        let mut scratch = Self {
            occupancy:  vec![0; map.zone_count()],
            link_usage: vec![0; map.connection_count()],
            incoming:   vec![0; map.zone_count()],
        };
        for state in fleet {
            match *state {
                DroneState::InZone(zone) => scratch.occupancy[zone.index()] += 1,
                DroneState::InTransit { to, .. } => scratch.incoming[to.index()] += 1,
            }
        }
        scratch
    }
}
