//! Unit tests for fly-graph.
//!
//! All tests use hand-crafted maps so they run without any map file on disk.

#[cfg(test)]
mod helpers {
    use crate::{Zone, ZoneMap, ZoneMapBuilder, ZoneType};

    /// `A - B - C`, all normal, start A, end C.
    pub fn chain(middle: ZoneType, nb_drones: u32) -> ZoneMap {
        let mut b = ZoneMapBuilder::new(nb_drones);
        b.add_zone(Zone::start("A", 0, 0));
        b.add_zone(Zone::hub("B", 1, 0).with_kind(middle));
        b.add_zone(Zone::end("C", 2, 0));
        b.add_connection("A", "B", 1);
        b.add_connection("B", "C", 1);
        b.build().unwrap()
    }

    /// Diamond with two equal-cost branches:
    ///
    /// ```text
    ///       B
    ///     /   \
    ///   A       D
    ///     \   /
    ///       C
    /// ```
    ///
    /// `C` is declared before `B` so that declaration order and name order
    /// disagree.
    pub fn diamond() -> ZoneMap {
        let mut b = ZoneMapBuilder::new(1);
        b.add_zone(Zone::start("A", 0, 0));
        b.add_zone(Zone::hub("C", 1, -1));
        b.add_zone(Zone::hub("B", 1, 1));
        b.add_zone(Zone::end("D", 2, 0));
        b.add_connection("A", "C", 1);
        b.add_connection("C", "D", 1);
        b.add_connection("A", "B", 1);
        b.add_connection("B", "D", 1);
        b.build().unwrap()
    }

    pub fn names(map: &ZoneMap, route: &crate::Route) -> Vec<String> {
        route.names(map).into_iter().map(str::to_owned).collect()
    }
}

// ── Builder & map structure ───────────────────────────────────────────────────

#[cfg(test)]
mod builder {
    use fly_core::ZoneId;

    use crate::{MapError, Zone, ZoneMapBuilder, ZoneType};

    fn base() -> ZoneMapBuilder {
        let mut b = ZoneMapBuilder::new(3);
        b.add_zone(Zone::start("start", 0, 0));
        b.add_zone(Zone::end("goal", 5, 0));
        b
    }

    #[test]
    fn ids_follow_name_order() {
        let map = super::helpers::diamond();
        let names: Vec<_> = map.zones().map(|(_, z)| z.name.as_str()).collect();
        assert_eq!(names, ["A", "B", "C", "D"]);
        assert_eq!(map.zone_id("B"), Some(ZoneId(1)));
        assert_eq!(map.zone_id("nope"), None);
    }

    #[test]
    fn start_end_and_counts() {
        let map = super::helpers::chain(ZoneType::Normal, 2);
        assert_eq!(map.nb_drones(), 2);
        assert_eq!(map.name(map.start()), "A");
        assert_eq!(map.name(map.end()), "C");
        assert_eq!(map.zone_count(), 3);
        assert_eq!(map.connection_count(), 2);
    }

    #[test]
    fn connection_lookup_ignores_argument_order() {
        let map = super::helpers::chain(ZoneType::Normal, 1);
        let a = map.zone_id("A").unwrap();
        let b = map.zone_id("B").unwrap();
        let c = map.zone_id("C").unwrap();
        assert_eq!(map.connection_id(a, b), map.connection_id(b, a));
        assert!(map.connection_between(a, b).is_some());
        assert!(map.connection_between(a, c).is_none());

        let conn = map.connection_between(b, a).unwrap();
        assert_eq!(conn.pair(), (a, b));
        assert_eq!(conn.other(a), Some(b));
        assert_eq!(conn.other(c), None);
    }

    #[test]
    fn blocked_zone_never_a_neighbor() {
        let map = super::helpers::chain(ZoneType::Blocked, 1);
        let a = map.zone_id("A").unwrap();
        let b = map.zone_id("B").unwrap();
        let c = map.zone_id("C").unwrap();
        assert_eq!(map.neighbors(a).count(), 0);
        assert_eq!(map.neighbors(c).count(), 0);
        // The blocked zone itself still sees its traversable neighbors.
        assert_eq!(map.neighbors(b).collect::<Vec<_>>(), [a, c]);
    }

    #[test]
    fn movement_costs_follow_zone_type() {
        for (kind, cost) in [
            (ZoneType::Normal, Some(1)),
            (ZoneType::Priority, Some(1)),
            (ZoneType::Restricted, Some(2)),
            (ZoneType::Blocked, None),
        ] {
            let map = super::helpers::chain(kind, 1);
            assert_eq!(map.movement_cost(map.zone_id("B").unwrap()), cost, "{kind}");
        }
    }

    #[test]
    fn end_zone_capacity_is_unconstrained() {
        let mut b = ZoneMapBuilder::new(1);
        b.add_zone(Zone::start("A", 0, 0).with_max_drones(4));
        b.add_zone(Zone::end("Z", 1, 0).with_max_drones(1));
        b.add_connection("A", "Z", 1);
        let map = b.build().unwrap();
        assert_eq!(map.capacity(map.start()), Some(4));
        assert_eq!(map.capacity(map.end()), None);
    }

    #[test]
    fn zero_drones_rejected() {
        let mut b = ZoneMapBuilder::new(0);
        b.add_zone(Zone::start("A", 0, 0));
        b.add_zone(Zone::end("B", 0, 0));
        assert!(matches!(b.build(), Err(MapError::NoDrones)));
    }

    #[test]
    fn missing_and_duplicate_roles() {
        let mut b = ZoneMapBuilder::new(1);
        b.add_zone(Zone::end("goal", 0, 0));
        assert!(matches!(b.build(), Err(MapError::MissingStart)));

        let mut b = ZoneMapBuilder::new(1);
        b.add_zone(Zone::start("s", 0, 0));
        assert!(matches!(b.build(), Err(MapError::MissingEnd)));

        let mut b = base();
        b.add_zone(Zone::start("other", 1, 1));
        assert!(matches!(b.build(), Err(MapError::DuplicateStart(_))));

        let mut b = base();
        b.add_zone(Zone::end("other", 1, 1));
        assert!(matches!(b.build(), Err(MapError::DuplicateEnd(_))));

        let mut b = ZoneMapBuilder::new(1);
        b.add_zone(Zone { is_end: true, ..Zone::start("both", 0, 0) });
        assert!(matches!(b.build(), Err(MapError::StartIsEnd(_))));
    }

    #[test]
    fn duplicate_zone_name_rejected() {
        let mut b = base();
        b.add_zone(Zone::hub("goal", 1, 1));
        assert!(matches!(b.build(), Err(MapError::DuplicateZone(n)) if n == "goal"));
    }

    #[test]
    fn invalid_names_and_capacities_rejected() {
        let mut b = base();
        b.add_zone(Zone::hub("a-b", 1, 1));
        assert!(matches!(b.build(), Err(MapError::InvalidZoneName(_))));

        let mut b = base();
        b.add_zone(Zone::hub("x", 1, 1).with_max_drones(0));
        assert!(matches!(b.build(), Err(MapError::ZeroZoneCapacity(_))));

        let mut b = base();
        b.add_connection("start", "goal", 0);
        assert!(matches!(b.build(), Err(MapError::ZeroLinkCapacity { .. })));
    }

    #[test]
    fn bad_connections_rejected() {
        let mut b = base();
        b.add_connection("start", "missing", 1);
        assert!(matches!(b.build(), Err(MapError::UnknownZone(n)) if n == "missing"));

        let mut b = base();
        b.add_connection("start", "start", 1);
        assert!(matches!(b.build(), Err(MapError::SelfConnection(_))));

        let mut b = base();
        b.add_connection("start", "goal", 1);
        b.add_connection("goal", "start", 3);
        assert!(matches!(b.build(), Err(MapError::DuplicateConnection { .. })));
    }
}

// ── Routing ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod routing {
    use crate::{DijkstraRouter, EdgePenalties, Router, Zone, ZoneMapBuilder, ZoneType};

    use super::helpers::{chain, diamond, names};

    #[test]
    fn straight_chain() {
        let map = chain(ZoneType::Normal, 1);
        let route = DijkstraRouter
            .shortest_path(&map, map.start(), map.end(), &EdgePenalties::new())
            .unwrap();
        assert_eq!(names(&map, &route), ["A", "B", "C"]);
        assert_eq!(route.cost, 2);
        assert_eq!(route.first(), map.start());
        assert_eq!(route.last(), map.end());
    }

    #[test]
    fn restricted_entry_costs_two() {
        let map = chain(ZoneType::Restricted, 1);
        let route = DijkstraRouter
            .shortest_path(&map, map.start(), map.end(), &EdgePenalties::new())
            .unwrap();
        assert_eq!(route.cost, 3);
    }

    #[test]
    fn same_start_and_end_is_single_zone() {
        let map = chain(ZoneType::Normal, 1);
        let b = map.zone_id("B").unwrap();
        let route = DijkstraRouter.shortest_path(&map, b, b, &EdgePenalties::new()).unwrap();
        assert_eq!(route.zones, [b]);
        assert!(route.is_trivial());
        assert_eq!(route.cost, 0);
    }

    #[test]
    fn blocked_zone_disconnects() {
        let map = chain(ZoneType::Blocked, 1);
        let route = DijkstraRouter.shortest_path(&map, map.start(), map.end(), &EdgePenalties::new());
        assert!(route.is_none());
    }

    #[test]
    fn equal_costs_break_ties_by_name() {
        let map = diamond();
        let route = DijkstraRouter
            .shortest_path(&map, map.start(), map.end(), &EdgePenalties::new())
            .unwrap();
        assert_eq!(names(&map, &route), ["A", "B", "D"]);
    }

    #[test]
    fn restricted_branch_avoided() {
        // Two branches; the lexicographically smaller one is restricted.
        let mut b = ZoneMapBuilder::new(1);
        b.add_zone(Zone::start("A", 0, 0));
        b.add_zone(Zone::hub("B", 1, 1).with_kind(ZoneType::Restricted));
        b.add_zone(Zone::hub("C", 1, -1).with_kind(ZoneType::Priority));
        b.add_zone(Zone::end("D", 2, 0));
        b.add_connection("A", "B", 1);
        b.add_connection("B", "D", 1);
        b.add_connection("A", "C", 1);
        b.add_connection("C", "D", 1);
        let map = b.build().unwrap();

        let route = DijkstraRouter
            .shortest_path(&map, map.start(), map.end(), &EdgePenalties::new())
            .unwrap();
        assert_eq!(names(&map, &route), ["A", "C", "D"]);
    }

    #[test]
    fn penalties_steer_the_search() {
        let map = diamond();
        let a = map.zone_id("A").unwrap();
        let b = map.zone_id("B").unwrap();

        let mut penalties = EdgePenalties::new();
        penalties.add(map.connection_id(b, a).unwrap(), 5);
        let route = DijkstraRouter.shortest_path(&map, map.start(), map.end(), &penalties).unwrap();
        assert_eq!(names(&map, &route), ["A", "C", "D"]);
        assert_eq!(route.cost, 2);
    }

    #[test]
    fn penalties_accumulate_per_route() {
        let map = diamond();
        let route = DijkstraRouter
            .shortest_path(&map, map.start(), map.end(), &EdgePenalties::new())
            .unwrap();

        let mut penalties = EdgePenalties::new();
        penalties.penalize_route(&route, &map, 100);
        penalties.penalize_route(&route, &map, 100);
        for conn in route.connections(&map) {
            assert_eq!(penalties.get(conn), 200);
        }
        let a = map.zone_id("A").unwrap();
        let c = map.zone_id("C").unwrap();
        assert_eq!(penalties.get(map.connection_id(a, c).unwrap()), 0);
    }
}

// ── Diverse paths ─────────────────────────────────────────────────────────────

#[cfg(test)]
mod diverse {
    use crate::{diverse_paths, DijkstraRouter, EdgePenalties, Router, ZoneType};

    use super::helpers::{chain, diamond, names};

    #[test]
    fn first_route_is_shortest() {
        let map = diamond();
        let routes = DijkstraRouter.diverse_paths(&map, map.start(), map.end(), 3, 100);
        let shortest = DijkstraRouter
            .shortest_path(&map, map.start(), map.end(), &EdgePenalties::new())
            .unwrap();
        assert_eq!(routes[0].zones, shortest.zones);
    }

    #[test]
    fn alternates_between_branches() {
        // Only a duplicate of the *previous* route stops generation, so the
        // two diamond branches alternate.
        let map = diamond();
        let routes = diverse_paths(&DijkstraRouter, &map, map.start(), map.end(), 4, 100);
        let got: Vec<_> = routes.iter().map(|r| names(&map, r).join("-")).collect();
        assert_eq!(got, ["A-B-D", "A-C-D", "A-B-D", "A-C-D"]);
    }

    #[test]
    fn single_corridor_stops_after_one() {
        let map = chain(ZoneType::Normal, 20);
        let routes = diverse_paths(&DijkstraRouter, &map, map.start(), map.end(), 12, 100);
        assert_eq!(routes.len(), 1);
    }

    #[test]
    fn disconnected_yields_nothing() {
        let map = chain(ZoneType::Blocked, 20);
        assert!(diverse_paths(&DijkstraRouter, &map, map.start(), map.end(), 12, 100).is_empty());
    }

    #[test]
    fn never_more_than_k() {
        let map = diamond();
        assert!(diverse_paths(&DijkstraRouter, &map, map.start(), map.end(), 0, 100).is_empty());
        assert_eq!(diverse_paths(&DijkstraRouter, &map, map.start(), map.end(), 1, 100).len(), 1);
        assert_eq!(diverse_paths(&DijkstraRouter, &map, map.start(), map.end(), 3, 100).len(), 3);
    }
}

// ── Loader ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod loader {
    use std::io::Write;

    use crate::{load_map_file, parse_map, MapError, ZoneType};

    const SAMPLE: &str = "\
# sample map
nb_drones: 3

start_hub: base 0 0 [color=green max_drones=3]
hub: gate 1 0 [zone=Restricted max_drones=2]
hub: wall 1 1 [zone=blocked]
end_hub: goal 2 0
connection: base-gate [max_link_capacity=2]
connection: gate-goal
connection: base-wall
";

    fn err_of(text: &str) -> MapError {
        parse_map(text).expect_err("map should be rejected")
    }

    fn assert_line(text: &str, line: usize, needle: &str) {
        match err_of(text) {
            MapError::Syntax { line: Some(l), cause } => {
                assert_eq!(l, line, "wrong line for {cause:?}");
                assert!(cause.contains(needle), "{cause:?} should mention {needle:?}");
            }
            other => panic!("expected syntax error, got {other:?}"),
        }
    }

    #[test]
    fn parses_sample() {
        let map = parse_map(SAMPLE).unwrap();
        assert_eq!(map.nb_drones(), 3);
        assert_eq!(map.zone_count(), 4);
        assert_eq!(map.connection_count(), 3);

        let base = map.zone(map.start());
        assert_eq!(base.name, "base");
        assert_eq!(base.color.as_deref(), Some("green"));
        assert_eq!(base.max_drones, 3);

        let gate = map.zone(map.zone_id("gate").unwrap());
        assert_eq!(gate.kind, ZoneType::Restricted);
        assert_eq!(gate.max_drones, 2);
        assert_eq!((gate.x, gate.y), (1, 0));

        let base_id = map.start();
        let gate_id = map.zone_id("gate").unwrap();
        assert_eq!(map.connection_between(gate_id, base_id).unwrap().max_link_capacity, 2);
        assert_eq!(map.name(map.end()), "goal");
    }

    #[test]
    fn loads_from_file() {
        let mut file = tempfile::NamedTempFile::new().expect("create temp file");
        file.write_all(SAMPLE.as_bytes()).unwrap();
        let map = load_map_file(file.path()).unwrap();
        assert_eq!(map.zone_count(), 4);
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let err = load_map_file(&dir.path().join("absent.txt")).unwrap_err();
        assert!(matches!(err, MapError::Io(_)));
    }

    #[test]
    fn header_must_come_first() {
        assert_line("# c\nhub: a 0 0\n", 2, "nb_drones");
        assert_line("nb_drones: 0\n", 1, "positive integer");
        assert_line("nb_drones: lots\n", 1, "must be an integer");
    }

    #[test]
    fn zone_line_errors() {
        assert_line("nb_drones: 1\nstart_hub: a 0\n", 2, "two integer coordinates");
        assert_line("nb_drones: 1\nhub: a-b 0 0\n", 2, "dashes");
        assert_line("nb_drones: 1\nhub: a x 0\n", 2, "integers");
        assert_line("nb_drones: 1\nhub: a 0 0 extra\n", 2, "Extra tokens");
        assert_line("nb_drones: 1\nhub: a 0 0 [zone=lava]\n", 2, "Invalid zone type");
        assert_line("nb_drones: 1\nhub: a 0 0 [speed=3]\n", 2, "Unknown metadata key");
        assert_line("nb_drones: 1\nhub: a 0 0 [max_drones]\n", 2, "Invalid metadata token");
        assert_line("nb_drones: 1\nhub: a 0 0 [max_drones=0]\n", 2, "max_drones");
        assert_line("nb_drones: 1\nhub: a 0 0 [color=red\n", 2, "Unclosed");
        assert_line("nb_drones: 1\nportal: a 0 0\n", 2, "Expected start_hub:");
    }

    #[test]
    fn duplicate_zones_rejected_at_line() {
        assert_line("nb_drones: 1\nstart_hub: a 0 0\nstart_hub: b 0 0\n", 3, "Duplicate start_hub");
        assert_line("nb_drones: 1\nend_hub: a 0 0\nend_hub: b 0 0\n", 3, "Duplicate end_hub");
        assert_line("nb_drones: 1\nhub: a 0 0\nhub: a 1 1\n", 3, "Duplicate zone name");
    }

    #[test]
    fn connection_line_errors() {
        let zones = "nb_drones: 1\nstart_hub: a 0 0\nend_hub: b 1 0\n";
        assert_line(&format!("{zones}connection: ab\n"), 4, "exactly one dash");
        assert_line(&format!("{zones}connection: a-\n"), 4, "non-empty");
        assert_line(&format!("{zones}connection: a-c\n"), 4, "undefined zone");
        assert_line(&format!("{zones}connection: a-a\n"), 4, "itself");
        assert_line(&format!("{zones}connection: a-b\nconnection: b-a\n"), 5, "Duplicate connection");
        assert_line(&format!("{zones}connection: a-b [zone=normal]\n"), 4, "Unknown metadata key");
        assert_line(&format!("{zones}connection: a-b [max_link_capacity=-1]\n"), 4, "positive");
        assert_line(&format!("{zones}connection:\n"), 4, "Missing zone1-zone2");
    }

    #[test]
    fn zones_not_allowed_after_connections() {
        let text = "nb_drones: 1\nstart_hub: a 0 0\nend_hub: b 1 0\nconnection: a-b\nhub: c 2 2\n";
        assert_line(text, 5, "Expected connection:");
    }

    #[test]
    fn whole_file_checks_have_no_line() {
        for (text, needle) in [
            ("# nothing\n", "nb_drones"),
            ("nb_drones: 2\nend_hub: b 0 0\n", "start_hub"),
            ("nb_drones: 2\nstart_hub: a 0 0\n", "end_hub"),
        ] {
            match err_of(text) {
                MapError::Syntax { line: None, cause } => assert!(cause.contains(needle), "{cause}"),
                other => panic!("expected file-level error, got {other:?}"),
            }
        }
    }

    #[test]
    fn error_display_includes_line() {
        let err = err_of("nb_drones: 1\nhub: a 0 0 extra\n");
        assert_eq!(err.line(), Some(2));
        assert!(err.to_string().starts_with("line 2: "));
    }
}

// ── Properties ────────────────────────────────────────────────────────────────

#[cfg(test)]
mod properties {
    use proptest::prelude::*;

    use crate::{DijkstraRouter, EdgePenalties, Router, Zone, ZoneMap, ZoneMapBuilder, ZoneType};

    const KINDS: [ZoneType; 4] =
        [ZoneType::Normal, ZoneType::Blocked, ZoneType::Restricted, ZoneType::Priority];

    /// Random maps of 2–7 zones named `z0..z6`; start is `z0`, end is the last.
    fn arb_map() -> impl Strategy<Value = ZoneMap> {
        (2usize..8)
            .prop_flat_map(|n| {
                (
                    Just(n),
                    prop::collection::vec(0usize..4, n),
                    prop::collection::vec((0..n, 0..n), 0..16),
                )
            })
            .prop_map(|(n, kinds, edges)| {
                let mut b = ZoneMapBuilder::new(1);
                for (i, &k) in kinds.iter().enumerate() {
                    let zone = match i {
                        0 => Zone::start(format!("z{i}"), 0, 0),
                        i if i == n - 1 => Zone::end(format!("z{i}"), 0, 0),
                        _ => Zone::hub(format!("z{i}"), 0, 0),
                    };
                    b.add_zone(zone.with_kind(KINDS[k]));
                }
                let mut seen = std::collections::BTreeSet::new();
                for (x, y) in edges {
                    if x != y && seen.insert((x.min(y), x.max(y))) {
                        b.add_connection(&format!("z{x}"), &format!("z{y}"), 1);
                    }
                }
                b.build().unwrap()
            })
    }

    /// Bellman–Ford reference distances under the same cost model.
    fn reference_dist(map: &ZoneMap) -> Vec<Option<u32>> {
        let mut dist = vec![None; map.zone_count()];
        dist[map.start().index()] = Some(0u32);
        for _ in 0..map.zone_count() {
            for (_, conn) in map.connections() {
                for (u, v) in [(conn.a, conn.b), (conn.b, conn.a)] {
                    let (Some(du), Some(step)) = (dist[u.index()], map.movement_cost(v)) else {
                        continue;
                    };
                    if dist[v.index()].is_none_or(|dv| du + step < dv) {
                        dist[v.index()] = Some(du + step);
                    }
                }
            }
        }
        dist
    }

    proptest! {
        #[test]
        fn neighbors_never_blocked(map in arb_map()) {
            for (id, _) in map.zones() {
                for n in map.neighbors(id) {
                    prop_assert_ne!(map.zone(n).kind, ZoneType::Blocked);
                }
            }
        }

        #[test]
        fn self_route_is_single_zone(map in arb_map()) {
            for (id, _) in map.zones() {
                let route = DijkstraRouter.shortest_path(&map, id, id, &EdgePenalties::new());
                prop_assert_eq!(route.map(|r| r.zones), Some(vec![id]));
            }
        }

        #[test]
        fn shortest_path_is_optimal_and_valid(map in arb_map()) {
            let expected = reference_dist(&map)[map.end().index()];
            let route = DijkstraRouter.shortest_path(&map, map.start(), map.end(), &EdgePenalties::new());
            prop_assert_eq!(route.as_ref().map(|r| r.cost), expected);

            if let Some(route) = route {
                prop_assert_eq!(route.first(), map.start());
                prop_assert_eq!(route.last(), map.end());
                let mut total = 0;
                for hop in route.zones.windows(2) {
                    prop_assert!(map.connection_between(hop[0], hop[1]).is_some());
                    total += map.movement_cost(hop[1]).expect("route enters a blocked zone");
                }
                prop_assert_eq!(total, route.cost);
            }
        }

        #[test]
        fn diverse_routes_bounded_and_start_shortest(map in arb_map(), k in 0usize..6) {
            let routes = DijkstraRouter.diverse_paths(&map, map.start(), map.end(), k, 100);
            prop_assert!(routes.len() <= k);
            let shortest = DijkstraRouter.shortest_path(&map, map.start(), map.end(), &EdgePenalties::new());
            if k > 0 {
                prop_assert_eq!(routes.first().map(|r| r.zones.clone()), shortest.map(|r| r.zones));
            }
            for pair in routes.windows(2) {
                prop_assert_ne!(&pair[0].zones, &pair[1].zones);
            }
        }
    }
}
