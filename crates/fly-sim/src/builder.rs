//! Fluent builder for constructing a [`Sim`].

use fly_core::SimConfig;
use fly_graph::{Router, ZoneMap};

use crate::{RoutePlan, Sim, SimResult};

/// Fluent builder for [`Sim`].
///
/// # Required inputs
///
/// - [`ZoneMap`]: the validated zone graph, including the fleet size
/// - `R: Router`: the path finder (e.g. [`fly_graph::DijkstraRouter`])
///
/// # Optional inputs (have defaults)
///
/// | Method         | Default                                     |
/// |----------------|---------------------------------------------|
/// | `.config(c)`   | `SimConfig::default()`                      |
/// | `.plan(p)`     | Routes chosen by the router from the config |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(map, DijkstraRouter)
///     .config(SimConfig { max_routes: 4, ..SimConfig::default() })
///     .build()?;
/// sim.run(&mut NoopObserver)?;
/// ```
pub struct SimBuilder<R: Router> {
    map:    ZoneMap,
    router: R,
    config: SimConfig,
    plan:   Option<RoutePlan>,
}

impl<R: Router> SimBuilder<R> {
    /// Create a builder with all required inputs.
    pub fn new(map: ZoneMap, router: R) -> Self {
        Self { map, router, config: SimConfig::default(), plan: None }
    }

    pub fn config(mut self, config: SimConfig) -> Self {
        self.config = config;
        self
    }

    /// Use these routes instead of asking the router.
    ///
    /// Routes are trusted as given; a route that does not lead from the start
    /// zone to the end zone surfaces as
    /// [`SimError::RouteInconsistent`](crate::SimError::RouteInconsistent)
    /// once a drone runs off it.
    pub fn plan(mut self, plan: RoutePlan) -> Self {
        self.plan = Some(plan);
        self
    }

    /// Validate the config, choose routes, and place every drone in the start
    /// zone.
    pub fn build(self) -> SimResult<Sim> {
        self.config.validate()?;

        let plan = match self.plan {
            Some(plan) => plan,
            None => RoutePlan::select(&self.router, &self.map, &self.config)?,
        };

        tracing::info!(
            drones = self.map.nb_drones(),
            zones = self.map.zone_count(),
            connections = self.map.connection_count(),
            routes = plan.routes().len(),
            "simulation ready"
        );

        Ok(Sim::new(self.config, self.map, plan))
    }
}
