use std::cmp::Ordering;
use std::collections::{BinaryHeap, HashSet};

use crate::graph::VenueGraph;

/// Multiplier applied to the weight of any edge entering an avoided zone.
pub const AVOID_PENALTY_FACTOR: f64 = 5.0;

/// Find the cheapest route between `start` and `end` without avoided zones.
pub fn find_route(graph: &VenueGraph, start: &str, end: &str) -> Option<Vec<String>> {
    find_route_penalized(graph, start, end, &HashSet::new()).map(|(steps, _)| steps)
}

/// Run Dijkstra's algorithm where entering an avoided zone costs
/// [`AVOID_PENALTY_FACTOR`] times the edge weight.
///
/// Each frontier entry carries the path that reached it. A zone may sit in
/// the frontier several times; only its first (cheapest) pop is expanded.
/// Entries of equal cost pop in ascending zone-name order, then ascending
/// carried-path order, so results are reproducible.
///
/// Returns the zone sequence from `start` to `end` inclusive together with
/// its total effective cost, or `None` when `end` is unreachable.
pub fn find_route_penalized(
    graph: &VenueGraph,
    start: &str,
    end: &str,
    avoid: &HashSet<String>,
) -> Option<(Vec<String>, f64)> {
    let mut visited: HashSet<String> = HashSet::new();
    let mut queue = BinaryHeap::new();
    queue.push(FrontierEntry::new(0.0, start.to_string(), Vec::new()));

    while let Some(FrontierEntry {
        cost,
        node,
        mut path,
    }) = queue.pop()
    {
        if !visited.insert(node.clone()) {
            continue;
        }

        path.push(node.clone());
        if node == end {
            return Some((path, cost.0));
        }

        for (neighbour, weight) in graph.neighbours(&node) {
            if visited.contains(neighbour) {
                continue;
            }
            let effective = if avoid.contains(neighbour) {
                weight * AVOID_PENALTY_FACTOR
            } else {
                weight
            };
            queue.push(FrontierEntry::new(
                cost.0 + effective,
                neighbour.to_string(),
                path.clone(),
            ));
        }
    }

    None
}

#[derive(Copy, Clone, Debug, Default)]
struct FloatOrd(f64);

impl PartialEq for FloatOrd {
    fn eq(&self, other: &Self) -> bool {
        self.0.eq(&other.0)
    }
}

impl Eq for FloatOrd {}

impl PartialOrd for FloatOrd {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FloatOrd {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct FrontierEntry {
    cost: FloatOrd,
    node: String,
    path: Vec<String>,
}

impl FrontierEntry {
    fn new(cost: f64, node: String, path: Vec<String>) -> Self {
        Self {
            cost: FloatOrd(cost),
            node,
            path,
        }
    }
}

impl Ord for FrontierEntry {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reverse ordering so BinaryHeap becomes a min-heap by cost.
        other
            .cost
            .cmp(&self.cost)
            .then_with(|| other.node.cmp(&self.node))
            .then_with(|| other.path.cmp(&self.path))
    }
}

impl PartialOrd for FrontierEntry {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}
