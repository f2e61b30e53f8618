//! Event registry: the append-only list of configured events.
//!
//! Configuring an event builds a fresh venue, records it on the event and
//! makes it the active venue. Selecting an event later swaps its stored
//! venue snapshot back in. The registry can optionally mirror itself to a
//! JSON file so events survive restarts.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tempfile::NamedTempFile;

use crate::error::{Error, Result};
use crate::venue::{default_venue, Venue, VenueStore};
use crate::zone::{slugify, Coordinate, Zone};
use crate::zoning::{build_venue, calculate_auto_zones, ZoneLayout, DEFAULT_RADIUS_METERS};

/// Identifier of the event seeded into every fresh registry.
pub const DEFAULT_EVENT_ID: &str = "evt_default";

/// A configured event together with its venue snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<Coordinate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub event_type: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organizer: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    pub venue: Venue,
}

impl Event {
    fn seeded_default() -> Self {
        Self {
            id: DEFAULT_EVENT_ID.to_string(),
            name: "Summer Music Festival 2025".to_string(),
            location: Some(Coordinate::new(12.9716, 77.5946)),
            date: None,
            event_type: None,
            description: None,
            organizer: None,
            contact: None,
            venue: default_venue(),
        }
    }
}

/// Input for [`EventRegistry::configure`].
///
/// Non-empty `zones` are used verbatim; otherwise zones are generated around
/// `location` with `radius_m` (or the registry default).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct NewEvent {
    pub name: String,
    pub location: Option<Coordinate>,
    pub radius_m: Option<f64>,
    pub zones: Option<Vec<Zone>>,
    pub date: Option<String>,
    pub event_type: Option<String>,
    pub description: Option<String>,
    pub organizer: Option<String>,
    pub contact: Option<String>,
}

impl NewEvent {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Resolve where the venue's zones come from.
    pub fn layout(&self, default_radius_m: f64) -> Result<ZoneLayout> {
        match &self.zones {
            Some(zones) if !zones.is_empty() => Ok(ZoneLayout::Custom(zones.clone())),
            _ => {
                let center = self.location.ok_or_else(|| {
                    Error::invalid_config("a location is required when no zones are supplied")
                })?;
                Ok(ZoneLayout::Auto {
                    center,
                    radius_m: self.radius_m.unwrap_or(default_radius_m),
                })
            }
        }
    }
}

/// Outcome of [`EventRegistry::configure`].
#[derive(Debug, Clone, PartialEq)]
pub struct ConfiguredEvent {
    pub event: Event,
    /// Metric label of the layout the venue was built from, see [`ZoneLayout::kind`].
    pub layout: &'static str,
}

/// Append-only event list, optionally persisted to a JSON file.
#[derive(Debug)]
pub struct EventRegistry {
    events: RwLock<Vec<Event>>,
    snapshot_path: Option<PathBuf>,
    default_radius_m: f64,
}

impl EventRegistry {
    /// In-memory registry seeded with the default event.
    pub fn new() -> Self {
        Self {
            events: RwLock::new(vec![Event::seeded_default()]),
            snapshot_path: None,
            default_radius_m: DEFAULT_RADIUS_METERS,
        }
    }

    /// Registry mirrored to `path`.
    ///
    /// An existing file is loaded as-is; a missing one starts from the default
    /// event and is written on the first append.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let events = if path.exists() {
            let raw = fs::read_to_string(path)?;
            let events: Vec<Event> = serde_json::from_str(&raw)?;
            tracing::info!(path = %path.display(), events = events.len(), "loaded event snapshot");
            events
        } else {
            tracing::info!(path = %path.display(), "no event snapshot yet, starting from default");
            vec![Event::seeded_default()]
        };

        Ok(Self {
            events: RwLock::new(events),
            snapshot_path: Some(path.to_path_buf()),
            default_radius_m: DEFAULT_RADIUS_METERS,
        })
    }

    /// Override the radius used when a configuration omits one.
    pub fn with_default_radius(mut self, radius_m: f64) -> Self {
        self.default_radius_m = radius_m;
        self
    }

    pub fn default_radius(&self) -> f64 {
        self.default_radius_m
    }

    /// Auto-zone around `center` without registering anything.
    pub fn preview(&self, center: Coordinate, radius_m: Option<f64>) -> Result<Vec<Zone>> {
        calculate_auto_zones(center, radius_m.unwrap_or(self.default_radius_m))
    }

    /// Validate `new_event`, register it and make its venue active.
    ///
    /// Nothing is mutated unless every step before the swap succeeds,
    /// including writing the snapshot file.
    pub fn configure(&self, store: &VenueStore, new_event: NewEvent) -> Result<ConfiguredEvent> {
        if new_event.name.trim().is_empty() {
            return Err(Error::invalid_config("event name cannot be empty"));
        }

        let layout = new_event.layout(self.default_radius_m)?;
        let venue = build_venue(&layout)?;

        let mut events = self.events.write();
        let event = Event {
            id: unique_event_id(&events, &new_event.name),
            name: new_event.name,
            location: new_event.location,
            date: new_event.date,
            event_type: new_event.event_type,
            description: new_event.description,
            organizer: new_event.organizer,
            contact: new_event.contact,
            venue,
        };

        events.push(event.clone());
        if let Err(err) = self.write_snapshot(&events) {
            events.pop();
            return Err(err);
        }

        store.set_active(event.venue.clone());
        tracing::info!(
            event_id = %event.id,
            layout = layout.kind(),
            zones = event.venue.zones().len(),
            "event configured"
        );
        Ok(ConfiguredEvent {
            event,
            layout: layout.kind(),
        })
    }

    /// Make the venue stored on event `id` the active one.
    pub fn select(&self, store: &VenueStore, id: &str) -> Result<Event> {
        let events = self.events.read();
        let event = events
            .iter()
            .find(|event| event.id == id)
            .ok_or_else(|| Error::UnknownEvent { id: id.to_string() })?;

        store.set_active(event.venue.clone());
        tracing::info!(event_id = %event.id, "event selected");
        Ok(event.clone())
    }

    pub fn get(&self, id: &str) -> Option<Event> {
        self.events.read().iter().find(|event| event.id == id).cloned()
    }

    /// All events in registration order.
    pub fn list(&self) -> Vec<Event> {
        self.events.read().clone()
    }

    pub fn len(&self) -> usize {
        self.events.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.read().is_empty()
    }

    fn write_snapshot(&self, events: &[Event]) -> Result<()> {
        let Some(path) = &self.snapshot_path else {
            return Ok(());
        };

        let parent = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(parent)?;

        let mut tmp = NamedTempFile::new_in(parent)?;
        serde_json::to_writer_pretty(tmp.as_file_mut(), events)?;
        tmp.flush()?;
        tmp.persist(path).map_err(|err| err.error)?;
        Ok(())
    }
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

fn unique_event_id(events: &[Event], name: &str) -> String {
    let slug = slugify(name);
    let base = if slug.is_empty() {
        "evt_event".to_string()
    } else {
        format!("evt_{slug}")
    };

    let taken = |candidate: &str| events.iter().any(|event| event.id == candidate);
    if !taken(&base) {
        return base;
    }

    let mut n = 2;
    loop {
        let candidate = format!("{base}_{n}");
        if !taken(&candidate) {
            return candidate;
        }
        n += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_registry_holds_default_event() {
        let registry = EventRegistry::new();
        assert_eq!(registry.len(), 1);
        let event = registry.get(DEFAULT_EVENT_ID).unwrap();
        assert_eq!(event.venue, default_venue());
    }

    #[test]
    fn duplicate_names_get_suffixed_ids() {
        let registry = EventRegistry::new();
        let store = VenueStore::default();
        let mut new_event = NewEvent::new("City Marathon");
        new_event.location = Some(Coordinate::new(40.0, -74.0));

        let first = registry.configure(&store, new_event.clone()).unwrap();
        let second = registry.configure(&store, new_event.clone()).unwrap();
        let third = registry.configure(&store, new_event).unwrap();

        assert_eq!(first.event.id, "evt_city_marathon");
        assert_eq!(second.event.id, "evt_city_marathon_2");
        assert_eq!(third.event.id, "evt_city_marathon_3");
        assert_eq!(first.layout, "auto");
    }

    #[test]
    fn unsluggable_names_fall_back() {
        assert_eq!(unique_event_id(&[], "!!!"), "evt_event");
    }

    #[test]
    fn layout_prefers_custom_zones() {
        let mut new_event = NewEvent::new("Expo");
        new_event.location = Some(Coordinate::new(1.0, 1.0));
        new_event.zones = Some(vec![Zone::new("Hall A", 1.0, 1.0)]);
        assert!(matches!(
            new_event.layout(500.0).unwrap(),
            ZoneLayout::Custom(_)
        ));

        new_event.zones = Some(vec![]);
        assert_eq!(
            new_event.layout(250.0).unwrap(),
            ZoneLayout::Auto {
                center: Coordinate::new(1.0, 1.0),
                radius_m: 250.0
            }
        );
    }
}
