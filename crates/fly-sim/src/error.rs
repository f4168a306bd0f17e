use fly_core::{DroneId, FlyError, Turn};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(#[from] FlyError),

    #[error("no path from {start} to {end}")]
    NoRoute { start: String, end: String },

    #[error("no progress on {turn} with {remaining} drone(s) remaining; possible deadlock")]
    Deadlock { turn: Turn, remaining: usize },

    /// A drone's zone is missing from its own route, or the route ends before
    /// the end zone.  Routes come from the router, so this is a defect.
    #[error("{drone} in zone {zone} has no next hop on its assigned route")]
    RouteInconsistent { drone: DroneId, zone: String },

    #[error("simulation already finished; every drone was delivered")]
    Finished,
}

pub type SimResult<T> = Result<T, SimError>;
