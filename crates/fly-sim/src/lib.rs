//! `fly-sim`: turn loop scheduler for the fly-in drone router.
//!
//! # Setup (once)
//!
//! Routes are chosen by a [`Router`](fly_graph::Router): one shortest route
//! for small fleets, up to `max_routes` diverse routes for fleets at or above
//! `diverse_threshold`.  Drone `i` (1-based) follows route `(i - 1) mod k`.
//!
//! # Turn loop
//!
//! ```text
//! until every drone is delivered:
//!   ① Arrivals   drones in transit to a restricted zone land there
//!                (delivered at once if it is the end zone).
//!   ② Snapshot   fresh per-turn counters: zone occupancy, link usage,
//!                drones already en route to each zone.
//!   ③ Order      remaining drones, furthest along their route first,
//!                ties by ascending DroneId.
//!   ④ Moves      each drone tries one hop: link capacity, then zone
//!                capacity, then (restricted zones) a reserved arrival slot.
//!   ⑤ Record     every token emitted this turn, in processing order.
//!   ⑥ Check      a turn with no moves while drones remain is a deadlock.
//! ```
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use fly_graph::{parse_map, DijkstraRouter};
//! use fly_sim::{NoopObserver, SimBuilder};
//!
//! let map = parse_map(text)?;
//! let mut sim = SimBuilder::new(map, DijkstraRouter).build()?;
//! let report = sim.run(&mut NoopObserver)?;
//! for line in report.lines(sim.map()) {
//!     println!("{line}");
//! }
//! ```

pub mod builder;
pub mod error;
pub mod observer;
pub mod plan;
pub mod sim;
pub mod state;
pub mod turn;


pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use plan::RoutePlan;
pub use sim::{Sim, SimReport};
pub use state::DroneState;
pub use turn::{Move, TurnRecord};

use fly_core::SimConfig;
use fly_graph::{DijkstraRouter, ZoneMap};

/// Run a whole simulation with the default router and return the rendered
/// turn lines.  Nothing is returned if the run fails.
pub fn simulate(map: ZoneMap, config: SimConfig) -> SimResult<Vec<String>> {
    let mut sim = SimBuilder::new(map, DijkstraRouter).config(config).build()?;
    let report = sim.run(&mut NoopObserver)?;
    Ok(report.lines(sim.map()))
}
