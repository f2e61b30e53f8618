use std::fmt::Write;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::routing::RoutePlan;
use crate::venue::Venue;

/// Flat per-zone distance used for estimates; not derived from coordinates.
pub const METERS_PER_HOP: u32 = 400;

/// Walking pace of roughly 5 km/h.
pub const WALKING_SPEED_METERS_PER_MINUTE: f64 = 83.0;

/// Caller-facing guidance derived from a [`RoutePlan`].
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct NavigationSummary {
    pub path_nodes: Vec<String>,
    pub path_coordinates: Vec<[f64; 2]>,
    pub avoid_zones: Vec<String>,
    pub instructions: Vec<String>,
    pub voice_instructions: Vec<String>,
    pub total_distance_meters: u32,
    pub estimated_time_minutes: u32,
}

impl NavigationSummary {
    /// Build guidance for `plan`, resolving coordinates leniently against `venue`.
    ///
    /// Zones missing from the venue are placed at the origin rather than
    /// failing the response.
    pub fn from_plan(venue: &Venue, plan: &RoutePlan) -> Result<Self> {
        if plan.steps.is_empty() {
            return Err(Error::EmptyRoutePlan);
        }

        let path_coordinates = plan
            .steps
            .iter()
            .map(|zone| venue.coordinate_or_origin(zone).as_pair())
            .collect();

        let voice_instructions = voice_instructions(&plan.steps, &plan.end);
        let instructions = voice_instructions
            .iter()
            .enumerate()
            .map(|(index, text)| format!("Step {}: {}", index + 1, text))
            .collect();

        let total_distance_meters = total_distance_meters(plan.steps.len());

        Ok(Self {
            path_nodes: plan.steps.clone(),
            path_coordinates,
            avoid_zones: plan.avoided.clone(),
            instructions,
            voice_instructions,
            total_distance_meters,
            estimated_time_minutes: estimated_time_minutes(total_distance_meters),
        })
    }

    /// Number of hops between the first and last zone.
    pub fn hops(&self) -> usize {
        self.path_nodes.len().saturating_sub(1)
    }

    /// Multi-line text rendering, mostly for logs and debugging.
    pub fn render_plain(&self) -> String {
        let mut buffer = String::new();
        let _ = writeln!(
            buffer,
            "Route: {} -> {} ({} hops, ~{} m, ~{} min)",
            self.path_nodes.first().map(String::as_str).unwrap_or("<unknown>"),
            self.path_nodes.last().map(String::as_str).unwrap_or("<unknown>"),
            self.hops(),
            self.total_distance_meters,
            self.estimated_time_minutes
        );
        if !self.avoid_zones.is_empty() {
            let _ = writeln!(buffer, "Avoiding: {}", self.avoid_zones.join(", "));
        }
        for line in &self.instructions {
            let _ = writeln!(buffer, "  {line}");
        }
        buffer
    }
}

fn voice_instructions(steps: &[String], end: &str) -> Vec<String> {
    let last = steps.len() - 1;
    steps
        .iter()
        .enumerate()
        .map(|(index, zone)| {
            if index == 0 {
                format!("Starting navigation from {zone}. Total {last} steps to {end}.")
            } else if index == last {
                format!("Arriving at your destination, {zone}. Navigation complete.")
            } else {
                format!("Continue to {zone}. Step {index} of {last}.")
            }
        })
        .collect()
}

/// Coarse estimate counting every zone on the path, endpoints included.
pub fn total_distance_meters(zone_count: usize) -> u32 {
    u32::try_from(zone_count)
        .unwrap_or(u32::MAX)
        .saturating_mul(METERS_PER_HOP)
}

/// Minutes at walking pace, rounded to the nearest whole minute.
pub fn estimated_time_minutes(distance_meters: u32) -> u32 {
    (f64::from(distance_meters) / WALKING_SPEED_METERS_PER_MINUTE).round() as u32
}
