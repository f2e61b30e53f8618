#![allow(dead_code)]

use crowdnav_lib::{Venue, VenueGraph, Zone};

/// Diamond venue: A-B-D costs 2, A-C-D costs 5.
pub fn diamond_venue() -> Venue {
    let mut graph = VenueGraph::new();
    for (from, to, weight) in [("A", "B", 1.0), ("B", "D", 1.0), ("A", "C", 4.0), ("C", "D", 1.0)] {
        graph
            .insert_undirected_edge(from, to, weight)
            .expect("valid edge");
    }
    let zones = vec![
        Zone::new("A", 10.0, 10.0),
        Zone::new("B", 10.1, 10.0),
        Zone::new("C", 10.0, 10.1),
        Zone::new("D", 10.1, 10.1),
    ];
    Venue::new(zones, graph)
}

/// Two islands with no edge between them.
pub fn split_venue() -> Venue {
    let mut graph = VenueGraph::new();
    graph.insert_undirected_edge("A", "B", 1.0).expect("valid edge");
    graph.insert_undirected_edge("X", "Y", 1.0).expect("valid edge");
    let zones = ["A", "B", "X", "Y"]
        .into_iter()
        .map(|name| Zone::new(name, 1.0, 1.0))
        .collect();
    Venue::new(zones, graph)
}
