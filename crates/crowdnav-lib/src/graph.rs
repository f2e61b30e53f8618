use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Weighted adjacency between zones, keyed by zone name.
///
/// Edges are directed; symmetric venues insert both directions. Ordered maps
/// keep neighbour iteration stable so planning is reproducible.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct VenueGraph {
    adjacency: BTreeMap<String, BTreeMap<String, f64>>,
}

impl VenueGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a zone with no outgoing edges (no-op if already present).
    pub fn insert_zone(&mut self, name: impl Into<String>) {
        self.adjacency.entry(name.into()).or_default();
    }

    /// Insert or overwrite the directed edge `from -> to`.
    pub fn insert_edge(&mut self, from: &str, to: &str, weight: f64) -> Result<()> {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(Error::invalid_config(format!(
                "edge {from} -> {to} must have a positive finite weight, got {weight}"
            )));
        }
        self.adjacency
            .entry(from.to_string())
            .or_default()
            .insert(to.to_string(), weight);
        Ok(())
    }

    /// Insert both `a -> b` and `b -> a` with the same weight.
    pub fn insert_undirected_edge(&mut self, a: &str, b: &str, weight: f64) -> Result<()> {
        self.insert_edge(a, b, weight)?;
        self.insert_edge(b, a, weight)
    }

    /// Build a graph where every distinct ordered pair is connected by `weight`.
    pub fn fully_connected<'a, I>(names: I, weight: f64) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let names: Vec<&str> = names.into_iter().collect();
        let mut graph = Self::new();
        for &from in &names {
            graph.insert_zone(from);
            for &to in &names {
                if from != to {
                    graph.insert_edge(from, to, weight)?;
                }
            }
        }
        Ok(graph)
    }

    /// Outgoing edges of `zone` as `(neighbour, weight)`; empty for unknown zones.
    pub fn neighbours<'a>(&'a self, zone: &str) -> impl Iterator<Item = (&'a str, f64)> + 'a {
        self.adjacency
            .get(zone)
            .into_iter()
            .flat_map(|edges| edges.iter().map(|(name, weight)| (name.as_str(), *weight)))
    }

    pub fn weight(&self, from: &str, to: &str) -> Option<f64> {
        self.adjacency.get(from)?.get(to).copied()
    }

    /// True when the zone has an adjacency entry or is the target of any edge.
    pub fn contains_zone(&self, zone: &str) -> bool {
        self.adjacency.contains_key(zone)
            || self
                .adjacency
                .values()
                .any(|edges| edges.contains_key(zone))
    }

    /// Zones that own an adjacency entry, in name order.
    pub fn zones(&self) -> impl Iterator<Item = &str> {
        self.adjacency.keys().map(String::as_str)
    }

    pub fn zone_count(&self) -> usize {
        self.adjacency.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.adjacency.values().map(BTreeMap::len).sum()
    }
}
