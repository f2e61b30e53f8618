//! Application state for the HTTP service.
//!
//! Handlers share one [`AppState`]: the active venue store, the event
//! registry, the zone analysis store and the message board. Each guards
//! itself, so the state needs no outer lock.

use std::sync::Arc;

use crowdnav_lib::{Error as LibError, EventRegistry, MessageBoard, VenueStore, ZoneAnalysisStore};

use crate::config::ServiceConfig;

/// Error during application state initialization.
#[derive(Debug)]
pub enum AppStateError {
    /// The event snapshot file exists but could not be loaded.
    EventRegistry(LibError),
}

impl std::fmt::Display for AppStateError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EventRegistry(e) => write!(f, "failed to load event registry: {}", e),
        }
    }
}

impl std::error::Error for AppStateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::EventRegistry(e) => Some(e),
        }
    }
}

impl From<LibError> for AppStateError {
    fn from(err: LibError) -> Self {
        Self::EventRegistry(err)
    }
}

/// Shared application state for all axum handlers.
///
/// Cheaply cloneable (an `Arc` internally); share it via axum's `State`
/// extractor.
///
/// # Example
///
/// ```ignore
/// use axum::{extract::State, routing::get, Router};
/// use crowdnav_service_shared::AppState;
///
/// async fn handler(State(state): State<AppState>) {
///     let venue = state.venues().snapshot();
///     // ... plan against `venue`
/// }
///
/// let app = Router::new()
///     .route("/api/venue", get(handler))
///     .with_state(AppState::new());
/// ```
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    venues: VenueStore,
    events: EventRegistry,
    analyses: ZoneAnalysisStore,
    messages: MessageBoard,
}

impl AppState {
    /// In-memory state: default venue active, registry holding the default event.
    pub fn new() -> Self {
        Self::from_components(VenueStore::default(), EventRegistry::new())
    }

    /// Build state from `config`.
    ///
    /// With `events_path` set the registry is loaded from (and later written
    /// to) that file. The default venue is active at startup either way.
    pub fn from_config(config: &ServiceConfig) -> Result<Self, AppStateError> {
        let events = match &config.events_path {
            Some(path) => {
                tracing::info!(path = %path.display(), "opening event registry");
                EventRegistry::open(path)?
            }
            None => EventRegistry::new(),
        }
        .with_default_radius(config.default_radius_m);

        tracing::info!(
            events = events.len(),
            default_radius_m = events.default_radius(),
            "event registry ready"
        );

        Ok(Self::from_components(VenueStore::default(), events))
    }

    pub fn from_components(venues: VenueStore, events: EventRegistry) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                venues,
                events,
                analyses: ZoneAnalysisStore::new(),
                messages: MessageBoard::new(),
            }),
        }
    }

    pub fn venues(&self) -> &VenueStore {
        &self.inner.venues
    }

    pub fn events(&self) -> &EventRegistry {
        &self.inner.events
    }

    pub fn analyses(&self) -> &ZoneAnalysisStore {
        &self.inner.analyses
    }

    pub fn messages(&self) -> &MessageBoard {
        &self.inner.messages
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for AppState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppState")
            .field("zone_count", &self.inner.venues.snapshot().zones().len())
            .field("event_count", &self.inner.events.len())
            .field("analysed_zones", &self.inner.analyses.len())
            .field("message_count", &self.inner.messages.len())
            .finish()
    }
}
