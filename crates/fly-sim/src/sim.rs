//! The `Sim` struct and its turn loop.

use std::collections::BTreeMap;

use fly_core::{DroneId, SimConfig, Turn, ZoneId};
use fly_graph::{Route, ZoneMap, ZoneType};

use crate::turn::TurnScratch;
use crate::{DroneState, Move, RoutePlan, SimError, SimObserver, SimResult, TurnRecord};

// ── SimReport ─────────────────────────────────────────────────────────────────

/// Result of a completed run.
#[derive(Debug, Clone)]
pub struct SimReport {
    /// One record per simulated turn; the last is the turn the last drone
    /// reached the end zone.
    pub turns:  Vec<TurnRecord>,
    /// Routes the fleet was spread across.
    pub routes: Vec<Route>,
}

impl SimReport {
    /// Every turn rendered in the wire format, one line per turn.
    pub fn lines(&self, map: &ZoneMap) -> Vec<String> {
        self.turns.iter().map(|t| t.render(map)).collect()
    }

    pub fn turn_count(&self) -> usize {
        self.turns.len()
    }
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// Holds the immutable map, the route plan, and the only state that persists
/// across turns: the `DroneId → DroneState` fleet.  Delivered drones are
/// removed from the fleet.  `BTreeMap` keeps iteration in ascending
/// `DroneId` order, which every ordering rule falls back on.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim {
    config: SimConfig,
    map:    ZoneMap,
    plan:   RoutePlan,
    fleet:  BTreeMap<DroneId, DroneState>,
    turn:   Turn,
}

impl Sim {
    pub(crate) fn new(config: SimConfig, map: ZoneMap, plan: RoutePlan) -> Self {
        let start = map.start();
        let fleet = DroneId::fleet(map.nb_drones())
            .map(|id| (id, DroneState::InZone(start)))
            .collect();
        Self { config, map, plan, fleet, turn: Turn::ZERO }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    pub fn map(&self) -> &ZoneMap {
        &self.map
    }

    pub fn plan(&self) -> &RoutePlan {
        &self.plan
    }

    /// The last completed turn (`Turn::ZERO` before the first step).
    pub fn turn(&self) -> Turn {
        self.turn
    }

    /// Undelivered drones in ascending id order.
    pub fn drones(&self) -> impl Iterator<Item = (DroneId, &DroneState)> + '_ {
        self.fleet.iter().map(|(&id, state)| (id, state))
    }

    pub fn drone(&self, id: DroneId) -> Option<&DroneState> {
        self.fleet.get(&id)
    }

    pub fn remaining(&self) -> usize {
        self.fleet.len()
    }

    pub fn is_finished(&self) -> bool {
        self.fleet.is_empty()
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Run until every drone is delivered.
    ///
    /// Observers see each turn as it completes.  The returned report is
    /// all-or-nothing: on a deadlock the error is returned and the turns
    /// produced so far are discarded.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<SimReport> {
        observer.on_setup(&self.map, self.plan.routes());

        let mut turns = Vec::new();
        while !self.is_finished() {
            observer.on_turn_start(self.turn.next());
            let record = self.step()?;
            observer.on_turn_end(&record, &self.map);
            turns.push(record);
        }

        observer.on_sim_end(self.turn);
        tracing::debug!(turns = turns.len(), "all drones delivered");
        Ok(SimReport { turns, routes: self.plan.routes().to_vec() })
    }

    /// Run exactly one turn.
    ///
    /// Returns [`SimError::Deadlock`] if the turn commits no move while
    /// drones remain, and [`SimError::Finished`] if there is nothing left to
    /// simulate.
    pub fn step(&mut self) -> SimResult<TurnRecord> {
        if self.is_finished() {
            return Err(SimError::Finished);
        }
        let turn = self.turn.next();
        self.turn = turn;

        let mut moves = Vec::new();
        let mut delivered = 0;
        let mut acted = vec![false; self.map.nb_drones() as usize];

        // ── ① Arrivals ────────────────────────────────────────────────────
        let arriving: Vec<(DroneId, ZoneId)> = self
            .fleet
            .iter()
            .filter_map(|(&id, state)| match *state {
                DroneState::InTransit { to, .. } => Some((id, to)),
                DroneState::InZone(_) => None,
            })
            .collect();
        for (drone, zone) in arriving {
            moves.push(Move::Enter { drone, zone });
            acted[drone.slot()] = true;
            if self.map.is_end(zone) {
                self.fleet.remove(&drone);
                delivered += 1;
            } else {
                self.fleet.insert(drone, DroneState::InZone(zone));
            }
        }

        // ── ② Snapshot ────────────────────────────────────────────────────
        let mut scratch = TurnScratch::snapshot(&self.map, self.fleet.values());

        // ── ③ Order: furthest along first, then ascending id ──────────────
        let mut order: Vec<(usize, DroneId)> = Vec::with_capacity(self.fleet.len());
        for (&id, state) in &self.fleet {
            if acted[id.slot()] {
                continue;
            }
            order.push((self.progress(id, state)?, id));
        }
        order.sort_by(|a, b| b.0.cmp(&a.0).then(a.1.cmp(&b.1)));

        // ── ④ Move attempts ───────────────────────────────────────────────
        for (_, drone) in order {
            if let Some(mv) = self.try_move(drone, &mut scratch)? {
                if matches!(mv, Move::Enter { zone, .. } if self.map.is_end(zone)) {
                    delivered += 1;
                }
                moves.push(mv);
            }
        }

        // ── ⑤ / ⑥ Record and progress check ───────────────────────────────
        let record = TurnRecord { turn, moves, delivered, remaining: self.fleet.len() };
        tracing::trace!(
            %turn,
            moves = record.moves.len(),
            delivered,
            remaining = record.remaining,
            "turn complete"
        );

        if record.is_empty() {
            tracing::warn!(%turn, remaining = record.remaining, "no drone could move");
            return Err(SimError::Deadlock { turn, remaining: record.remaining });
        }
        Ok(record)
    }

    // ── Turn internals ────────────────────────────────────────────────────

    /// Position of the drone's route zone on its own route.
    fn progress(&self, drone: DroneId, state: &DroneState) -> SimResult<usize> {
        let zone = state.route_zone();
        self.plan
            .route_for(drone)
            .position(zone)
            .ok_or_else(|| self.inconsistent(drone, zone))
    }

    /// Attempt one hop for `drone`, committing it to the fleet and `scratch`
    /// if every capacity check passes.
    fn try_move(&mut self, drone: DroneId, scratch: &mut TurnScratch) -> SimResult<Option<Move>> {
        let Some(&DroneState::InZone(current)) = self.fleet.get(&drone) else {
            return Ok(None);
        };

        let route = self.plan.route_for(drone);
        let next = route
            .position(current)
            .and_then(|idx| route.next_after(idx))
            .ok_or_else(|| self.inconsistent(drone, current))?;

        let map = &self.map;
        let target = map.zone(next);
        if !target.kind.is_traversable() {
            tracing::warn!(%drone, zone = %target.name, "next hop is blocked; holding");
            return Ok(None);
        }
        let Some(link) = map.connection_id(current, next) else {
            tracing::warn!(
                %drone,
                from = map.name(current),
                to = %target.name,
                "route hop has no connection; holding"
            );
            return Ok(None);
        };

        // Link throughput this turn.
        if scratch.link_usage[link.index()] >= map.connection(link).max_link_capacity {
            return Ok(None);
        }

        // Destination occupancy (the end zone is unconstrained).
        let capacity = map.capacity(next);
        if capacity.is_some_and(|cap| scratch.occupancy[next.index()] >= cap) {
            return Ok(None);
        }

        if target.kind == ZoneType::Restricted {
            // Reserve a slot for next turn's arrival, counting drones already
            // en route.
            let reserved = scratch.occupancy[next.index()] + scratch.incoming[next.index()];
            if capacity.is_some_and(|cap| reserved >= cap) {
                return Ok(None);
            }
            scratch.link_usage[link.index()] += 1;
            scratch.occupancy[current.index()] = scratch.occupancy[current.index()].saturating_sub(1);
            scratch.incoming[next.index()] += 1;
            self.fleet.insert(drone, DroneState::InTransit { from: current, to: next });
            return Ok(Some(Move::Depart { drone, from: current, to: next }));
        }

        scratch.link_usage[link.index()] += 1;
        scratch.occupancy[current.index()] = scratch.occupancy[current.index()].saturating_sub(1);
        scratch.occupancy[next.index()] += 1;
        if map.is_end(next) {
            self.fleet.remove(&drone);
        } else {
            self.fleet.insert(drone, DroneState::InZone(next));
        }
        Ok(Some(Move::Enter { drone, zone: next }))
    }

    fn inconsistent(&self, drone: DroneId, zone: ZoneId) -> SimError {
        SimError::RouteInconsistent { drone, zone: self.map.name(zone).to_owned() }
    }
}
