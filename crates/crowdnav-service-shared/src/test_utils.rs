//! Test utilities for handler testing.
//!
//! Every call to [`test_state`] returns an independent in-memory state, so
//! tests that reconfigure the venue don't leak into each other.

use std::sync::atomic::{AtomicU64, Ordering};

use crowdnav_lib::{Coordinate, Zone};

use crate::state::AppState;

/// Fresh state with the default venue active and only the default event registered.
pub fn test_state() -> AppState {
    AppState::new()
}

/// Zone names of the default venue.
pub mod fixture_zones {
    pub const ENTRANCE: &str = "Entrance";
    pub const SECURITY_GATE: &str = "Security Gate";
    pub const MAIN_STAGE: &str = "Main Stage";
    pub const FOOD_COURT: &str = "Food Court";
    pub const MEDICAL_BAY: &str = "Medical Bay";
    pub const CONTROL_ROOM: &str = "Control Room";
}

/// Centre of the default venue.
pub const FIXTURE_CENTER: Coordinate = Coordinate::new(12.9716, 77.5946);

/// Three custom zones a few dozen meters apart.
pub fn custom_zones() -> Vec<Zone> {
    vec![
        Zone::new("Gate A", 51.5007, -0.1246),
        Zone::new("Plaza", 51.5010, -0.1240),
        Zone::new("Gate B", 51.5013, -0.1234),
    ]
}

static REQUEST_COUNTER: AtomicU64 = AtomicU64::new(0);

/// Unique request ID for tests.
pub fn test_request_id() -> String {
    format!("test-{}", REQUEST_COUNTER.fetch_add(1, Ordering::Relaxed))
}
