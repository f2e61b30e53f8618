use serde::{Deserialize, Serialize};

/// Geographic position in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub lat: f64,
    pub lng: f64,
}

impl Coordinate {
    /// Sentinel returned by lenient lookups for zones without a position.
    pub const ORIGIN: Coordinate = Coordinate { lat: 0.0, lng: 0.0 };

    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }

    /// Whether both components are finite and inside the WGS84 ranges.
    pub fn is_valid(&self) -> bool {
        self.lat.is_finite()
            && self.lng.is_finite()
            && (-90.0..=90.0).contains(&self.lat)
            && (-180.0..=180.0).contains(&self.lng)
    }

    /// `[lat, lng]` pair as used by map widgets.
    pub fn as_pair(&self) -> [f64; 2] {
        [self.lat, self.lng]
    }

    /// Shift by a number of degrees in each axis.
    pub fn offset(&self, d_lat: f64, d_lng: f64) -> Self {
        Self {
            lat: self.lat + d_lat,
            lng: self.lng + d_lng,
        }
    }
}

/// Named location inside a venue; the name doubles as the graph node key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub name: String,
    #[serde(flatten)]
    pub coordinate: Coordinate,
}

impl Zone {
    pub fn new(name: impl Into<String>, lat: f64, lng: f64) -> Self {
        Self {
            name: name.into(),
            coordinate: Coordinate::new(lat, lng),
        }
    }

    /// URL-safe identifier derived from the zone name.
    pub fn id(&self) -> String {
        slugify(&self.name)
    }
}

/// Turn a display name into a URL-safe, lower-case identifier.
///
/// Path separators and whitespace runs collapse into a single `_`, anything
/// outside `[A-Za-z0-9_.-]` is dropped (non-ASCII included) and leading or
/// trailing `.`/`_` are trimmed.
pub fn slugify(name: &str) -> String {
    let spaced: String = name
        .chars()
        .map(|c| if c == '/' || c == '\\' { ' ' } else { c })
        .collect();

    let joined = spaced.split_whitespace().collect::<Vec<_>>().join("_");

    joined
        .chars()
        .filter(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '.' | '-'))
        .collect::<String>()
        .trim_matches(|c| c == '.' || c == '_')
        .to_lowercase()
}
