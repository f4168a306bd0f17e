//! Routing trait and default Dijkstra implementation.
//!
//! # Pluggability
//!
//! `fly-sim` calls routing via the [`Router`] trait, so applications can swap
//! in custom implementations without touching the scheduler.  The default
//! [`DijkstraRouter`] reproduces the reference route choices exactly.
//!
//! # Cost model
//!
//! Moving from `u` to `v` costs `movement_cost(v)` (1 for Normal/Priority,
//! 2 for Restricted) plus any extra [`EdgePenalties`] on the `u`–`v`
//! connection.  The origin's type never matters.  Blocked zones are never
//! neighbors and so never relaxed.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use rustc_hash::FxHashMap;

use fly_core::{ConnectionId, ZoneId};

use crate::network::ZoneMap;

// ── Route ─────────────────────────────────────────────────────────────────────

/// A non-empty ordered sequence of zones from a start to an end zone, plus the
/// search cost it was found at (penalties included).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Route {
    /// Zones to visit in order, source first, destination last.
    pub zones: Vec<ZoneId>,
    /// Accumulated search cost.
    pub cost: u32,
}

impl Route {
    pub fn first(&self) -> ZoneId {
        self.zones[0]
    }

    pub fn last(&self) -> ZoneId {
        self.zones[self.zones.len() - 1]
    }

    /// Number of zones on the route (hops + 1).
    pub fn len(&self) -> usize {
        self.zones.len()
    }

    /// Always `false`: a `Route` holds at least its source zone.
    pub fn is_empty(&self) -> bool {
        self.zones.is_empty()
    }

    /// `true` if the source and destination are the same zone.
    pub fn is_trivial(&self) -> bool {
        self.zones.len() == 1
    }

    /// Position of `zone` on the route (first occurrence).
    #[inline]
    pub fn position(&self, zone: ZoneId) -> Option<usize> {
        self.zones.iter().position(|&z| z == zone)
    }

    /// The zone following position `idx`, if any.
    #[inline]
    pub fn next_after(&self, idx: usize) -> Option<ZoneId> {
        self.zones.get(idx + 1).copied()
    }

    /// Connections traversed by the route, in order.  Hops with no
    /// connection in `map` are skipped.
    pub fn connections<'a>(&'a self, map: &'a ZoneMap) -> impl Iterator<Item = ConnectionId> + 'a {
        self.zones
            .windows(2)
            .filter_map(|w| map.connection_id(w[0], w[1]))
    }

    /// Zone names along the route.
    pub fn names<'a>(&self, map: &'a ZoneMap) -> Vec<&'a str> {
        self.zones.iter().map(|&z| map.name(z)).collect()
    }
}

// ── EdgePenalties ─────────────────────────────────────────────────────────────

/// Extra per-connection cost used to steer the search away from edges that
/// earlier routes already use.
///
/// Keyed by `ConnectionId`, which identifies the canonical (unordered) zone
/// pair, so a penalty applies in both directions.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EdgePenalties {
    inner: FxHashMap<ConnectionId, u32>,
}

impl EdgePenalties {
    pub fn new() -> Self {
        Self::default()
    }

    /// Penalty on `conn` (0 if none).
    #[inline]
    pub fn get(&self, conn: ConnectionId) -> u32 {
        self.inner.get(&conn).copied().unwrap_or(0)
    }

    /// Add `amount` to the penalty on `conn`.
    pub fn add(&mut self, conn: ConnectionId, amount: u32) {
        let slot = self.inner.entry(conn).or_insert(0);
        *slot = slot.saturating_add(amount);
    }

    /// Add `unit` once to every distinct connection used by `route`.
    pub fn penalize_route(&mut self, route: &Route, map: &ZoneMap, unit: u32) {
        let mut used: Vec<ConnectionId> = route.connections(map).collect();
        used.sort_unstable();
        used.dedup();
        for conn in used {
            self.add(conn, unit);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── Router trait ──────────────────────────────────────────────────────────────

/// Pluggable routing engine.
pub trait Router {
    /// Compute the cheapest route from `from` to `to` under `penalties`.
    ///
    /// Returns `None` if no traversable path exists.  `from == to` yields the
    /// single-zone route `[from]` rather than `None`.
    fn shortest_path(
        &self,
        map:       &ZoneMap,
        from:      ZoneId,
        to:        ZoneId,
        penalties: &EdgePenalties,
    ) -> Option<Route>;

    /// Up to `k` load-spreading routes; see [`diverse_paths`](crate::diverse_paths).
    fn diverse_paths(
        &self,
        map:          &ZoneMap,
        from:         ZoneId,
        to:           ZoneId,
        k:            usize,
        penalty_unit: u32,
    ) -> Vec<Route> {
        crate::diverse::diverse_paths(self, map, from, to, k, penalty_unit)
    }
}

// ── DijkstraRouter ────────────────────────────────────────────────────────────

/// Standard Dijkstra's algorithm over the zone graph.
///
/// Frontier entries with equal accumulated cost are expanded in ascending
/// zone-name order (zone ids follow name order), and a neighbor's parent is
/// only replaced on a strictly cheaper path.  Together these make the chosen
/// route a pure function of the map.
#[derive(Debug, Clone, Copy, Default)]
pub struct DijkstraRouter;

impl Router for DijkstraRouter {
    fn shortest_path(
        &self,
        map:       &ZoneMap,
        from:      ZoneId,
        to:        ZoneId,
        penalties: &EdgePenalties,
    ) -> Option<Route> {
        dijkstra(map, from, to, penalties)
    }
}

// ── Dijkstra internals ────────────────────────────────────────────────────────

fn dijkstra(
    map:       &ZoneMap,
    from:      ZoneId,
    to:        ZoneId,
    penalties: &EdgePenalties,
) -> Option<Route> {
    if !map.contains(from) || !map.contains(to) {
        return None;
    }
    if from == to {
        return Some(Route { zones: vec![from], cost: 0 });
    }

    let n = map.zone_count();
    // dist[v] = best known cost to reach v.
    let mut dist = vec![u32::MAX; n];
    // parent[v] = zone that reached v; None for unreached nodes and `from`.
    let mut parent: Vec<Option<ZoneId>> = vec![None; n];

    dist[from.index()] = 0;

    // Min-heap: (cost, zone). Reverse makes BinaryHeap (max) behave as min-heap.
    // Secondary key ZoneId gives the lexicographic tie-break.
    let mut heap: BinaryHeap<Reverse<(u32, ZoneId)>> = BinaryHeap::new();
    heap.push(Reverse((0, from)));

    while let Some(Reverse((cost, zone))) = heap.pop() {
        if zone == to {
            return Some(reconstruct(&parent, to, cost));
        }

        // Skip stale heap entries.
        if cost > dist[zone.index()] {
            continue;
        }

        for (neighbor, conn) in map.links(zone) {
            let Some(step) = map.movement_cost(neighbor) else {
                continue;
            };
            let new_cost = cost
                .saturating_add(step)
                .saturating_add(penalties.get(conn));

            if new_cost < dist[neighbor.index()] {
                dist[neighbor.index()] = new_cost;
                parent[neighbor.index()] = Some(zone);
                heap.push(Reverse((new_cost, neighbor)));
            }
        }
    }

    None
}

fn reconstruct(parent: &[Option<ZoneId>], to: ZoneId, cost: u32) -> Route {
    let mut zones = vec![to];
    let mut cur = to;
    while let Some(prev) = parent[cur.index()] {
        zones.push(prev);
        cur = prev;
    }
    zones.reverse();
    Route { zones, cost }
}
