//! Route planning over the active venue.
//!
//! This module provides:
//! - [`RouteRequest`] - Start/end zones plus the zones to steer around
//! - [`RoutePlan`] - Planned route result
//! - [`plan_route`] - Main entry point for computing routes
//!
//! Avoided zones are penalised rather than excluded: a route still passes
//! through one when no alternative exists, paying
//! [`AVOID_PENALTY_FACTOR`](crate::path::AVOID_PENALTY_FACTOR) times the
//! entering edge weight.
//!
//! # Example
//!
//! ```
//! use crowdnav_lib::{default_venue, plan_route, RouteRequest};
//!
//! let venue = default_venue();
//! let request = RouteRequest::new("Entrance", "Main Stage").avoiding(["Food Court"]);
//! let plan = plan_route(&venue, &request)?;
//! assert_eq!(plan.steps.first().map(String::as_str), Some("Entrance"));
//! # Ok::<(), crowdnav_lib::Error>(())
//! ```

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::path::find_route_penalized;
use crate::venue::Venue;

/// Number of fuzzy suggestions attached to unknown-zone errors.
const MAX_SUGGESTIONS: usize = 3;

/// High-level route planning request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RouteRequest {
    pub start: String,
    pub end: String,
    pub avoid: Vec<String>,
}

impl RouteRequest {
    pub fn new(start: impl Into<String>, end: impl Into<String>) -> Self {
        Self {
            start: start.into(),
            end: end.into(),
            avoid: Vec::new(),
        }
    }

    /// Add zones to penalise while planning.
    pub fn avoiding<I, S>(mut self, zones: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.avoid.extend(zones.into_iter().map(Into::into));
        self
    }
}

/// Planned route returned by the library.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RoutePlan {
    pub start: String,
    pub end: String,
    /// Zones from `start` to `end`, both inclusive.
    pub steps: Vec<String>,
    /// Total effective weight including avoid penalties.
    pub cost: f64,
    /// Avoid list as supplied by the caller.
    pub avoided: Vec<String>,
}

impl RoutePlan {
    /// Number of hops in the route.
    pub fn hop_count(&self) -> usize {
        self.steps.len().saturating_sub(1)
    }
}

fn resolve_zone(venue: &Venue, name: &str) -> Result<()> {
    if venue.contains_zone(name) {
        return Ok(());
    }
    Err(Error::UnknownZone {
        name: name.to_string(),
        suggestions: venue.fuzzy_zone_matches(name, MAX_SUGGESTIONS),
    })
}

/// Keep the avoid entries the venue knows about; the rest cannot affect the search.
fn resolve_avoided_zones(venue: &Venue, avoid: &[String]) -> HashSet<String> {
    avoid
        .iter()
        .filter(|name| {
            let known = venue.contains_zone(name);
            if !known {
                tracing::debug!(zone = %name, "ignoring unknown avoid zone");
            }
            known
        })
        .cloned()
        .collect()
}

/// Compute the cheapest route for `request` over `venue`.
///
/// Unknown start or end zones yield [`Error::UnknownZone`]; known zones with
/// no connecting route yield [`Error::RouteNotFound`]. The venue is only
/// read, so concurrent calls may share one snapshot.
pub fn plan_route(venue: &Venue, request: &RouteRequest) -> Result<RoutePlan> {
    resolve_zone(venue, &request.start)?;
    resolve_zone(venue, &request.end)?;

    let avoided = resolve_avoided_zones(venue, &request.avoid);

    let (steps, cost) =
        find_route_penalized(venue.graph(), &request.start, &request.end, &avoided).ok_or_else(
            || Error::RouteNotFound {
                start: request.start.clone(),
                end: request.end.clone(),
            },
        )?;

    tracing::debug!(
        start = %request.start,
        end = %request.end,
        hops = steps.len().saturating_sub(1),
        cost,
        "route planned"
    );

    Ok(RoutePlan {
        start: request.start.clone(),
        end: request.end.clone(),
        steps,
        cost,
        avoided: request.avoid.clone(),
    })
}
