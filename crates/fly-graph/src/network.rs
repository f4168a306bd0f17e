//! Zone graph representation and builder.
//!
//! # Data layout
//!
//! Zones live in a `Vec<Zone>` indexed by `ZoneId`, connections in a
//! `Vec<Connection>` indexed by `ConnectionId`.  [`ZoneMapBuilder::build`]
//! sorts zones by name before assigning ids, so `ZoneId` order *is* name
//! order, and the router relies on this for its deterministic tie-break.
//!
//! Adjacency is precomputed once: `adjacency[z]` lists every
//! `(neighbor, connection)` pair of zone `z`, sorted by neighbor id.  A
//! canonical-pair index answers `connection_id(a, b)` in O(1) regardless of
//! argument order.
//!
//! The map is immutable after `build()`; the router and the scheduler only
//! ever read it.

use rustc_hash::FxHashMap;

use fly_core::{ConnectionId, ZoneId};

use crate::zone::{canonical, is_valid_zone_name, Connection, Zone};
use crate::{MapError, MapResult};

// ── ZoneMap ───────────────────────────────────────────────────────────────────

/// Validated, immutable zone graph plus the fleet size.
///
/// Do not construct directly; use [`ZoneMapBuilder`] or the
/// [loader](crate::loader).
#[derive(Debug, Clone)]
pub struct ZoneMap {
    nb_drones:   u32,
    start:       ZoneId,
    end:         ZoneId,
    zones:       Vec<Zone>,
    connections: Vec<Connection>,
    by_name:     FxHashMap<String, ZoneId>,
    by_pair:     FxHashMap<(ZoneId, ZoneId), ConnectionId>,
    adjacency:   Vec<Vec<(ZoneId, ConnectionId)>>,
}

impl ZoneMap {
    // ── Dimensions ────────────────────────────────────────────────────────

    /// Number of drones to route from start to end.
    pub fn nb_drones(&self) -> u32 {
        self.nb_drones
    }

    pub fn zone_count(&self) -> usize {
        self.zones.len()
    }

    pub fn connection_count(&self) -> usize {
        self.connections.len()
    }

    pub fn start(&self) -> ZoneId {
        self.start
    }

    pub fn end(&self) -> ZoneId {
        self.end
    }

    // ── Zone lookups ──────────────────────────────────────────────────────

    /// # Panics
    /// Panics if `id` did not come from this map.
    #[inline]
    pub fn zone(&self, id: ZoneId) -> &Zone {
        &self.zones[id.index()]
    }

    #[inline]
    pub fn name(&self, id: ZoneId) -> &str {
        &self.zones[id.index()].name
    }

    pub fn zone_id(&self, name: &str) -> Option<ZoneId> {
        self.by_name.get(name).copied()
    }

    /// All zones in id (= name) order.
    pub fn zones(&self) -> impl Iterator<Item = (ZoneId, &Zone)> + '_ {
        self.zones.iter().enumerate().map(|(i, z)| (ZoneId(i as u32), z))
    }

    #[inline]
    pub fn contains(&self, id: ZoneId) -> bool {
        id.index() < self.zones.len()
    }

    #[inline]
    pub fn is_end(&self, id: ZoneId) -> bool {
        id == self.end
    }

    /// Turns needed to enter `id` (1 or 2), or `None` if it is Blocked.
    #[inline]
    pub fn movement_cost(&self, id: ZoneId) -> Option<u32> {
        self.zones[id.index()].kind.movement_cost()
    }

    /// Occupancy limit of `id`; `None` for the end zone, which is unconstrained
    /// regardless of its declared `max_drones`.
    #[inline]
    pub fn capacity(&self, id: ZoneId) -> Option<u32> {
        if self.is_end(id) {
            None
        } else {
            Some(self.zones[id.index()].max_drones)
        }
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Traversable neighbors of `zone` with the connecting link, in id order.
    ///
    /// Blocked zones never appear, whichever side of the link they are on.
    #[inline]
    pub fn links(&self, zone: ZoneId) -> impl Iterator<Item = (ZoneId, ConnectionId)> + '_ {
        self.adjacency[zone.index()]
            .iter()
            .copied()
            .filter(|&(n, _)| self.zones[n.index()].kind.is_traversable())
    }

    /// Traversable neighbors of `zone`, in id order.
    pub fn neighbors(&self, zone: ZoneId) -> impl Iterator<Item = ZoneId> + '_ {
        self.links(zone).map(|(n, _)| n)
    }

    // ── Connection lookups ────────────────────────────────────────────────

    #[inline]
    pub fn connection(&self, id: ConnectionId) -> &Connection {
        &self.connections[id.index()]
    }

    pub fn connections(&self) -> impl Iterator<Item = (ConnectionId, &Connection)> + '_ {
        self.connections
            .iter()
            .enumerate()
            .map(|(i, c)| (ConnectionId(i as u32), c))
    }

    /// Id of the connection joining `a` and `b`, independent of argument order.
    #[inline]
    pub fn connection_id(&self, a: ZoneId, b: ZoneId) -> Option<ConnectionId> {
        self.by_pair.get(&canonical(a, b)).copied()
    }

    /// The connection joining `a` and `b`, independent of argument order.
    pub fn connection_between(&self, a: ZoneId, b: ZoneId) -> Option<&Connection> {
        self.connection_id(a, b).map(|id| self.connection(id))
    }
}

// ── ZoneMapBuilder ────────────────────────────────────────────────────────────

/// Construct a [`ZoneMap`] incrementally, then call [`build`](Self::build).
///
/// Zones and connections may be added in any order; connections refer to
/// zones by name.  All structural invariants are checked in `build()`.
///
/// # Example
///
/// ```
/// use fly_graph::{Zone, ZoneMapBuilder, ZoneType};
///
/// let mut b = ZoneMapBuilder::new(2);
/// b.add_zone(Zone::start("A", 0, 0));
/// b.add_zone(Zone::hub("R", 1, 0).with_kind(ZoneType::Restricted));
/// b.add_zone(Zone::end("C", 2, 0));
/// b.add_connection("A", "R", 1);
/// b.add_connection("R", "C", 1);
/// let map = b.build().unwrap();
/// assert_eq!(map.zone_count(), 3);
/// assert_eq!(map.connection_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct ZoneMapBuilder {
    nb_drones:   u32,
    zones:       Vec<Zone>,
    raw_links:   Vec<RawLink>,
}

#[derive(Debug, Clone)]
struct RawLink {
    a:        String,
    b:        String,
    capacity: u32,
}

impl ZoneMapBuilder {
    pub fn new(nb_drones: u32) -> Self {
        Self { nb_drones, zones: Vec::new(), raw_links: Vec::new() }
    }

    /// Add a zone.  Its `is_start` / `is_end` flags decide its role.
    pub fn add_zone(&mut self, zone: Zone) -> &mut Self {
        self.zones.push(zone);
        self
    }

    /// Add an undirected connection between two zones, by name.
    pub fn add_connection(&mut self, a: &str, b: &str, max_link_capacity: u32) -> &mut Self {
        self.raw_links.push(RawLink {
            a:        a.to_owned(),
            b:        b.to_owned(),
            capacity: max_link_capacity,
        });
        self
    }

    pub fn zone_count(&self) -> usize { self.zones.len() }
    pub fn connection_count(&self) -> usize { self.raw_links.len() }

    /// Validate and consume the builder.
    ///
    /// Zones are sorted by name and ids assigned in that order; adjacency
    /// lists and the canonical-pair index are built in one pass over the
    /// connections.
    pub fn build(self) -> MapResult<ZoneMap> {
        if self.nb_drones == 0 {
            return Err(MapError::NoDrones);
        }

        // ── Zones ─────────────────────────────────────────────────────────
        let mut zones = self.zones;
        for z in &zones {
            if !is_valid_zone_name(&z.name) {
                return Err(MapError::InvalidZoneName(z.name.clone()));
            }
            if z.max_drones == 0 {
                return Err(MapError::ZeroZoneCapacity(z.name.clone()));
            }
        }

        // Stable sort keeps declaration order among duplicates so the
        // reported duplicate is the later declaration.
        zones.sort_by(|x, y| x.name.cmp(&y.name));
        if let Some(dup) = zones.windows(2).find(|w| w[0].name == w[1].name) {
            return Err(MapError::DuplicateZone(dup[1].name.clone()));
        }

        let mut start = None;
        let mut end = None;
        for (i, z) in zones.iter().enumerate() {
            let id = ZoneId(i as u32);
            if z.is_start && start.replace(id).is_some() {
                return Err(MapError::DuplicateStart(z.name.clone()));
            }
            if z.is_end && end.replace(id).is_some() {
                return Err(MapError::DuplicateEnd(z.name.clone()));
            }
        }
        let start = start.ok_or(MapError::MissingStart)?;
        let end = end.ok_or(MapError::MissingEnd)?;
        if start == end {
            return Err(MapError::StartIsEnd(zones[start.index()].name.clone()));
        }

        let by_name: FxHashMap<String, ZoneId> = zones
            .iter()
            .enumerate()
            .map(|(i, z)| (z.name.clone(), ZoneId(i as u32)))
            .collect();

        // ── Connections ───────────────────────────────────────────────────
        let mut connections = Vec::with_capacity(self.raw_links.len());
        let mut by_pair = FxHashMap::default();
        let mut adjacency = vec![Vec::new(); zones.len()];

        for link in self.raw_links {
            let resolve = |name: &str| {
                by_name
                    .get(name)
                    .copied()
                    .ok_or_else(|| MapError::UnknownZone(name.to_owned()))
            };
            let x = resolve(&link.a)?;
            let y = resolve(&link.b)?;
            if x == y {
                return Err(MapError::SelfConnection(link.a));
            }
            if link.capacity == 0 {
                return Err(MapError::ZeroLinkCapacity { a: link.a, b: link.b });
            }
            let (a, b) = canonical(x, y);
            if by_pair.contains_key(&(a, b)) {
                return Err(MapError::DuplicateConnection { a: link.a, b: link.b });
            }

            let id = ConnectionId(connections.len() as u32);
            connections.push(Connection { a, b, max_link_capacity: link.capacity });
            by_pair.insert((a, b), id);
            adjacency[a.index()].push((b, id));
            adjacency[b.index()].push((a, id));
        }

        for list in &mut adjacency {
            list.sort_unstable_by_key(|&(n, _)| n);
        }

        tracing::debug!(
            zones = zones.len(),
            connections = connections.len(),
            nb_drones = self.nb_drones,
            "zone map built"
        );

        Ok(ZoneMap {
            nb_drones: self.nb_drones,
            start,
            end,
            zones,
            connections,
            by_name,
            by_pair,
            adjacency,
        })
    }
}
