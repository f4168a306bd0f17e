//! Per-drone movement state.

use fly_core::ZoneId;

/// Where a drone is.
///
/// A drone is either **in a zone**, or **in transit** across a connection
/// toward a restricted zone it will land in next turn.  Delivered drones have
/// no state at all: they are removed from the fleet the moment they reach
/// the end zone.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DroneState {
    InZone(ZoneId),
    InTransit { from: ZoneId, to: ZoneId },
}

impl DroneState {
    /// The zone that positions the drone on its route: its current zone, or
    /// the zone it is flying into.
    #[inline]
    pub fn route_zone(&self) -> ZoneId {
        match *self {
            DroneState::InZone(zone) => zone,
            DroneState::InTransit { to, .. } => to,
        }
    }
}
