//! CrowdNav library entry points.
//!
//! This crate models a venue as a weighted graph of named zones, derives
//! venues from a centre point (auto-zoning) or a caller-supplied zone list,
//! keeps the single active venue behind an atomic swap, and plans
//! crowd-aware routes with turn-by-turn guidance. It also holds the
//! per-zone analyzer records and the responder message board.
//! Higher-level consumers (the HTTP service) should only depend on the
//! functions exported here instead of reimplementing behavior.
//!

#![deny(warnings)]

pub mod analysis;
pub mod error;
pub mod event;
pub mod graph;
pub mod message;
pub mod navigation;
pub mod path;
pub mod routing;
pub mod venue;
pub mod zone;
pub mod zoning;

pub use analysis::{
    ActiveAnomaly, Anomaly, DensityLevel, ZoneAnalysis, ZoneAnalysisStore, ZoneDensity,
};
pub use error::{Error, Result};
pub use event::{ConfiguredEvent, Event, EventRegistry, NewEvent, DEFAULT_EVENT_ID};
pub use graph::VenueGraph;
pub use message::{Message, MessageBoard};
pub use navigation::{NavigationSummary, METERS_PER_HOP, WALKING_SPEED_METERS_PER_MINUTE};
pub use path::{find_route_penalized, AVOID_PENALTY_FACTOR};
pub use routing::{plan_route, RoutePlan, RouteRequest};
pub use venue::{default_venue, Venue, VenueStore};
pub use zone::{slugify, Coordinate, Zone};
pub use zoning::{
    build_venue, calculate_auto_zones, fully_connected_graph, ZoneLayout, DEFAULT_RADIUS_METERS,
    FULLY_CONNECTED_WEIGHT,
};
