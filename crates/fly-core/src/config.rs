//! Route-selection tuning for the turn scheduler.
//!
//! The defaults are the values the scheduler has always used; changing them
//! changes the byte-level output of a run, so applications should only
//! override them deliberately (e.g. from a JSON file loaded by the CLI).

use crate::{FlyError, FlyResult};

/// Top-level simulation configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default, deny_unknown_fields))]
pub struct SimConfig {
    /// Fleets of at least this many drones are spread across several diverse
    /// routes; smaller fleets all share the single shortest route.
    pub diverse_threshold: u32,

    /// Upper bound on the number of diverse routes.  The scheduler requests
    /// `min(max_routes, nb_drones)`.
    pub max_routes: usize,

    /// Extra cost added to an edge for every previously accepted route that
    /// used it.  Cumulative: an edge used twice carries twice the penalty.
    pub edge_penalty: u32,
}

impl SimConfig {
    pub const DEFAULT_DIVERSE_THRESHOLD: u32 = 15;
    pub const DEFAULT_MAX_ROUTES: usize = 12;
    pub const DEFAULT_EDGE_PENALTY: u32 = 100;

    /// Number of routes to request for a fleet of `nb_drones`.
    ///
    /// Returns `1` below the diverse threshold.
    pub fn route_count(&self, nb_drones: u32) -> usize {
        if nb_drones >= self.diverse_threshold {
            self.max_routes.min(nb_drones as usize)
        } else {
            1
        }
    }

    /// Reject values that would make route selection meaningless.
    pub fn validate(&self) -> FlyResult<()> {
        if self.max_routes == 0 {
            return Err(FlyError::Config("max_routes must be at least 1".into()));
        }
        if self.edge_penalty == 0 {
            return Err(FlyError::Config("edge_penalty must be at least 1".into()));
        }
        Ok(())
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            diverse_threshold: Self::DEFAULT_DIVERSE_THRESHOLD,
            max_routes:        Self::DEFAULT_MAX_ROUTES,
            edge_penalty:      Self::DEFAULT_EDGE_PENALTY,
        }
    }
}
