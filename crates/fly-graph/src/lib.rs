//! `fly-graph`: zone graph, map-file loading, and routing.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                    |
//! |-------------|-------------------------------------------------------------|
//! | [`zone`]    | `Zone`, `ZoneType`, `Connection`                            |
//! | [`network`] | `ZoneMap` (adjacency-indexed), `ZoneMapBuilder`             |
//! | [`router`]  | `Router` trait, `Route`, `EdgePenalties`, `DijkstraRouter`  |
//! | [`diverse`] | `diverse_paths`: penalty-spread alternative routes         |
//! | [`loader`]  | `load_map_file`, `load_map_reader`, `parse_map`             |
//! | [`error`]   | `MapError`, `MapResult<T>`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on public types.           |

pub mod diverse;
pub mod error;
pub mod loader;
pub mod network;
pub mod router;
pub mod zone;

#[cfg(test)]
mod tests;

pub use diverse::diverse_paths;
pub use error::{MapError, MapResult};
pub use loader::{load_map_file, load_map_reader, parse_map};
pub use network::{ZoneMap, ZoneMapBuilder};
pub use router::{DijkstraRouter, EdgePenalties, Route, Router};
pub use zone::{Connection, Zone, ZoneType};
