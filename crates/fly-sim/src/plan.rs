//! Route selection and round-robin assignment.

use fly_core::{DroneId, SimConfig};
use fly_graph::{EdgePenalties, Route, Router, ZoneMap};

use crate::{SimError, SimResult};

/// The fixed set of routes for a run and the drone → route assignment.
///
/// Drone `i` (1-based) follows `routes[(i - 1) mod k]`.  Assignment never
/// changes during a run.
#[derive(Debug, Clone)]
pub struct RoutePlan {
    routes: Vec<Route>,
}

impl RoutePlan {
    /// Choose routes for `map`'s fleet.
    ///
    /// Fleets of at least `config.diverse_threshold` drones get up to
    /// `min(config.max_routes, nb_drones)` diverse routes; smaller fleets share
    /// the single shortest route.
    pub fn select<R: Router>(router: &R, map: &ZoneMap, config: &SimConfig) -> SimResult<Self> {
        let (start, end) = (map.start(), map.end());
        let nb_drones = map.nb_drones();

        let routes = if nb_drones >= config.diverse_threshold {
            router.diverse_paths(map, start, end, config.route_count(nb_drones), config.edge_penalty)
        } else {
            router
                .shortest_path(map, start, end, &EdgePenalties::new())
                .into_iter()
                .collect()
        };

        Self::from_routes(map, routes)
    }

    /// Build a plan from explicit routes.
    ///
    /// Returns [`SimError::NoRoute`] if `routes` is empty.  Routes are not
    /// checked against `map`; one that strays from the start-to-end path
    /// surfaces as [`SimError::RouteInconsistent`] during the run.
    pub fn from_routes(map: &ZoneMap, routes: Vec<Route>) -> SimResult<Self> {
        if routes.is_empty() {
            return Err(SimError::NoRoute {
                start: map.name(map.start()).to_owned(),
                end:   map.name(map.end()).to_owned(),
            });
        }

        for (i, route) in routes.iter().enumerate() {
            tracing::debug!(
                route = i,
                cost = route.cost,
                zones = %route.names(map).join(" -> "),
                "route selected"
            );
        }

        Ok(Self { routes })
    }

    pub fn routes(&self) -> &[Route] {
        &self.routes
    }

    /// Index into [`routes`](Self::routes) followed by `drone`.
    #[inline]
    pub fn route_index(&self, drone: DroneId) -> usize {
        drone.slot() % self.routes.len()
    }

    #[inline]
    pub fn route_for(&self, drone: DroneId) -> &Route {
        &self.routes[self.route_index(drone)]
    }
}
