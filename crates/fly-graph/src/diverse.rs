//! Load-spreading alternative routes.
//!
//! Route 1 is the plain shortest path.  Every accepted route then adds a
//! fixed penalty unit to each connection it uses, and the next route is the
//! shortest path under the accumulated penalties.  An edge used by two
//! earlier routes therefore carries twice the unit.
//!
//! Generation stops early when the search finds nothing or returns the same
//! route as the previous round.  This is a greedy heuristic: routes are
//! *encouraged* to be disjoint, not guaranteed to be.

use fly_core::ZoneId;

use crate::network::ZoneMap;
use crate::router::{EdgePenalties, Route, Router};

/// Find up to `k` diverse routes from `from` to `to`.
///
/// The returned list is in acceptance order and never longer than `k`.
/// An empty list means `from` and `to` are disconnected (or `k == 0`).
pub fn diverse_paths<R: Router + ?Sized>(
    router:       &R,
    map:          &ZoneMap,
    from:         ZoneId,
    to:           ZoneId,
    k:            usize,
    penalty_unit: u32,
) -> Vec<Route> {
    let mut routes: Vec<Route> = Vec::with_capacity(k);
    let mut penalties = EdgePenalties::new();

    for round in 0..k {
        let Some(route) = router.shortest_path(map, from, to, &penalties) else {
            break;
        };
        // Compare zone sequences only: the cost grows with penalties even
        // when the search settles on the same corridor.
        if routes.last().is_some_and(|prev| prev.zones == route.zones) {
            tracing::debug!(round, "diverse search repeated previous route; stopping");
            break;
        }
        penalties.penalize_route(&route, map, penalty_unit);
        routes.push(route);
    }

    routes
}
