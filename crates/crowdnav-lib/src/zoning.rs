//! Venue construction from a centre point or an explicit zone list.
//!
//! Auto-zoning lays out nine zones around a centre: the centre itself, four
//! cardinal zones one `offset` away and four diagonal sectors `offset / 1.5`
//! away on each axis, where `offset = (radius_m / 1000) / 111` degrees. The
//! conversion assumes 111 km per degree on both axes and ignores longitude
//! scaling, so layouts are approximate.
//!
//! Whatever the source of the zones, the graph is fully connected with a
//! uniform weight of [`FULLY_CONNECTED_WEIGHT`].

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::graph::VenueGraph;
use crate::venue::Venue;
use crate::zone::{Coordinate, Zone};

/// Radius used when a configuration omits one.
pub const DEFAULT_RADIUS_METERS: f64 = 500.0;

/// Weight of every edge in a generated venue graph.
pub const FULLY_CONNECTED_WEIGHT: f64 = 2.0;

const KILOMETERS_PER_DEGREE: f64 = 111.0;
const DIAGONAL_DIVISOR: f64 = 1.5;

/// Where a venue's zones come from.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ZoneLayout {
    /// Nine generated zones around `center`.
    Auto { center: Coordinate, radius_m: f64 },
    /// Zones supplied verbatim by the caller.
    Custom(Vec<Zone>),
}

impl ZoneLayout {
    /// Metric label for the layout kind.
    pub fn kind(&self) -> &'static str {
        match self {
            ZoneLayout::Auto { .. } => "auto",
            ZoneLayout::Custom(_) => "custom",
        }
    }
}

/// Generate the nine-zone layout around `center`.
pub fn calculate_auto_zones(center: Coordinate, radius_m: f64) -> Result<Vec<Zone>> {
    if !radius_m.is_finite() || radius_m <= 0.0 {
        return Err(Error::invalid_config(format!(
            "radius must be a positive number of meters, got {radius_m}"
        )));
    }
    if !center.is_valid() {
        return Err(Error::invalid_config(format!(
            "location ({}, {}) is not a valid latitude/longitude",
            center.lat, center.lng
        )));
    }

    let offset = (radius_m / 1000.0) / KILOMETERS_PER_DEGREE;
    let diagonal = offset / DIAGONAL_DIVISOR;

    let layout = [
        ("Event Center", 0.0, 0.0),
        ("North Zone", offset, 0.0),
        ("South Zone", -offset, 0.0),
        ("East Zone", 0.0, offset),
        ("West Zone", 0.0, -offset),
        ("North East Sector", diagonal, diagonal),
        ("North West Sector", diagonal, -diagonal),
        ("South East Sector", -diagonal, diagonal),
        ("South West Sector", -diagonal, -diagonal),
    ];

    Ok(layout
        .into_iter()
        .map(|(name, d_lat, d_lng)| Zone {
            name: name.to_string(),
            coordinate: center.offset(d_lat, d_lng),
        })
        .collect())
}

/// Connect every zone to every other zone with `weight`.
pub fn fully_connected_graph(zones: &[Zone], weight: f64) -> Result<VenueGraph> {
    VenueGraph::fully_connected(zones.iter().map(|zone| zone.name.as_str()), weight)
}

fn validate_custom_zones(zones: &[Zone]) -> Result<()> {
    if zones.is_empty() {
        return Err(Error::invalid_config("custom zone list is empty"));
    }

    let mut seen = HashSet::new();
    for zone in zones {
        if zone.name.trim().is_empty() {
            return Err(Error::invalid_config("zone names cannot be empty"));
        }
        if !zone.coordinate.is_valid() {
            return Err(Error::invalid_config(format!(
                "zone '{}' has an invalid coordinate",
                zone.name
            )));
        }
        if !seen.insert(zone.name.as_str()) {
            return Err(Error::invalid_config(format!(
                "duplicate zone name '{}'",
                zone.name
            )));
        }
    }
    Ok(())
}

/// Build a fully connected venue from `layout`.
///
/// All validation happens here, before anything can reach a [`VenueStore`](crate::VenueStore).
pub fn build_venue(layout: &ZoneLayout) -> Result<Venue> {
    let zones = match layout {
        ZoneLayout::Auto { center, radius_m } => calculate_auto_zones(*center, *radius_m)?,
        ZoneLayout::Custom(zones) => {
            validate_custom_zones(zones)?;
            zones.clone()
        }
    };

    let graph = fully_connected_graph(&zones, FULLY_CONNECTED_WEIGHT)?;
    Ok(Venue::new(zones, graph))
}
