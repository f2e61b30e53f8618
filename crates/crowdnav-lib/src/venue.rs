//! Venue model and the process-wide active venue store.
//!
//! A [`Venue`] is an immutable snapshot of zone coordinates plus the routing
//! graph built over them. [`VenueStore`] holds exactly one active venue and
//! replaces it wholesale: readers take an `Arc` snapshot, so a plan computed
//! during a reconfiguration sees either the old venue or the new one, never a
//! mixture of both.

use std::collections::BTreeSet;
use std::sync::Arc;

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

use crate::graph::VenueGraph;
use crate::zone::{Coordinate, Zone};

/// Minimum Jaro-Winkler similarity for a zone name to be offered as a suggestion.
const SUGGESTION_THRESHOLD: f64 = 0.8;

/// Coordinates and routing graph for one venue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Venue {
    zones: Vec<Zone>,
    graph: VenueGraph,
}

impl Venue {
    pub fn new(zones: Vec<Zone>, graph: VenueGraph) -> Self {
        Self { zones, graph }
    }

    /// Zones in configuration order.
    pub fn zones(&self) -> &[Zone] {
        &self.zones
    }

    pub fn graph(&self) -> &VenueGraph {
        &self.graph
    }

    /// Typed coordinate lookup; `None` when the zone has no recorded position.
    pub fn coordinate(&self, name: &str) -> Option<Coordinate> {
        self.zones
            .iter()
            .find(|zone| zone.name == name)
            .map(|zone| zone.coordinate)
    }

    /// Lenient lookup: unknown zones resolve to [`Coordinate::ORIGIN`].
    pub fn coordinate_or_origin(&self, name: &str) -> Coordinate {
        self.coordinate(name).unwrap_or(Coordinate::ORIGIN)
    }

    /// Whether the zone is known either as a positioned zone or as a graph node.
    pub fn contains_zone(&self, name: &str) -> bool {
        self.graph.contains_zone(name) || self.zones.iter().any(|zone| zone.name == name)
    }

    /// Up to `limit` known zone names resembling `name`, best match first.
    pub fn fuzzy_zone_matches(&self, name: &str, limit: usize) -> Vec<String> {
        let needle = name.to_lowercase();
        let candidates: BTreeSet<&str> = self
            .zones
            .iter()
            .map(|zone| zone.name.as_str())
            .chain(self.graph.zones())
            .collect();

        let mut scored: Vec<(f64, &str)> = candidates
            .into_iter()
            .map(|candidate| {
                let score = strsim::jaro_winkler(&needle, &candidate.to_lowercase());
                (score, candidate)
            })
            .filter(|(score, _)| *score >= SUGGESTION_THRESHOLD)
            .collect();

        scored.sort_by(|a, b| b.0.total_cmp(&a.0).then_with(|| a.1.cmp(b.1)));
        scored
            .into_iter()
            .take(limit)
            .map(|(_, candidate)| candidate.to_string())
            .collect()
    }
}

impl Default for Venue {
    fn default() -> Self {
        default_venue()
    }
}

/// Built-in festival layout used until an event is configured.
pub fn default_venue() -> Venue {
    let zones = vec![
        Zone::new("Entrance", 12.9716, 77.5946),
        Zone::new("Security Gate", 12.9750, 77.5970),
        Zone::new("Main Stage", 12.9850, 77.6050),
        Zone::new("Food Court", 12.9780, 77.5980),
        Zone::new("Parking", 12.9650, 77.5900),
        Zone::new("Medical Bay", 12.9800, 77.6000),
        Zone::new("Backstage", 12.9920, 77.6100),
        Zone::new("VIP Area", 12.9880, 77.6070),
        Zone::new("Control Room", 12.9950, 77.6120),
    ];

    const EDGES: &[(&str, &str, f64)] = &[
        ("Entrance", "Security Gate", 3.0),
        ("Entrance", "Parking", 2.0),
        ("Security Gate", "Main Stage", 4.0),
        ("Security Gate", "Food Court", 2.0),
        ("Main Stage", "Medical Bay", 3.0),
        ("Main Stage", "VIP Area", 2.0),
        ("Food Court", "Medical Bay", 2.0),
        ("Food Court", "Parking", 4.0),
        ("Medical Bay", "Backstage", 3.0),
        ("Backstage", "VIP Area", 2.0),
        ("Backstage", "Control Room", 2.0),
    ];

    let mut graph = VenueGraph::new();
    for &(a, b, weight) in EDGES {
        graph
            .insert_undirected_edge(a, b, weight)
            .unwrap_or_else(|err| unreachable!("static venue edge rejected: {err}"));
    }

    Venue::new(zones, graph)
}

/// Holder of the single active venue.
#[derive(Debug)]
pub struct VenueStore {
    active: RwLock<Arc<Venue>>,
}

impl VenueStore {
    pub fn new(venue: Venue) -> Self {
        Self {
            active: RwLock::new(Arc::new(venue)),
        }
    }

    /// Snapshot of the active venue; stays valid across later swaps.
    pub fn snapshot(&self) -> Arc<Venue> {
        Arc::clone(&self.active.read())
    }

    /// Atomically replace coordinates and graph, returning the previous venue.
    pub fn set_active(&self, venue: Venue) -> Arc<Venue> {
        let zones = venue.zones().len();
        let previous = std::mem::replace(&mut *self.active.write(), Arc::new(venue));
        tracing::debug!(zones, "active venue replaced");
        previous
    }

    /// Lenient coordinate lookup against the current venue.
    pub fn lookup_coordinate(&self, name: &str) -> Coordinate {
        self.active.read().coordinate_or_origin(name)
    }
}

impl Default for VenueStore {
    fn default() -> Self {
        Self::new(default_venue())
    }
}
