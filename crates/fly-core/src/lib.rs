//! `fly-core`: foundational types for the `fly-in` drone routing simulator.
//!
//! This crate is a dependency of every other `fly-*` crate.  It intentionally
//! has no `fly-*` dependencies and minimal external ones (only `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module     | Contents                                              |
//! |------------|-------------------------------------------------------|
//! | [`ids`]    | `DroneId`, `ZoneId`, `ConnectionId`                   |
//! | [`time`]   | `Turn`                                                |
//! | [`config`] | `SimConfig` (route-selection tuning)                  |
//! | [`error`]  | `FlyError`, `FlyResult`                               |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::SimConfig;
pub use error::{FlyError, FlyResult};
pub use ids::{ConnectionId, DroneId, ZoneId};
pub use time::Turn;
