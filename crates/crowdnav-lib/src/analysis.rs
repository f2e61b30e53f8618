//! Per-zone crowd analysis records.
//!
//! The analyzer that produces these records lives outside this crate; the
//! store only keeps the latest record per zone and derives display views.
//! Routing never reads from here.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};

/// Coarse crowd density reported by the analyzer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DensityLevel {
    #[default]
    Low,
    Medium,
    High,
    Critical,
    /// Any label the analyzer emits outside the four known levels.
    #[serde(other)]
    Unknown,
}

impl DensityLevel {
    /// Numeric density in `0.0..=1.0` for dashboards.
    pub fn density(self) -> f64 {
        match self {
            DensityLevel::Low => 0.2,
            DensityLevel::Medium => 0.5,
            DensityLevel::High => 0.8,
            DensityLevel::Critical => 1.0,
            DensityLevel::Unknown => 0.1,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            DensityLevel::Low => "Low",
            DensityLevel::Medium => "Medium",
            DensityLevel::High => "High",
            DensityLevel::Critical => "Critical",
            DensityLevel::Unknown => "Unknown",
        }
    }
}

const DEFAULT_ANOMALY_KIND: &str = "other";
const DEFAULT_CONFIDENCE: u8 = 80;

/// One anomaly spotted in a zone's footage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(from = "AnomalyRepr")]
pub struct Anomaly {
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    /// Position in the footage, `MM:SS`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
    pub confidence: u8,
}

impl Anomaly {
    /// One-line summary, `"{type}: {description} at {timestamp}"`.
    pub fn summary(&self) -> String {
        format!(
            "{}: {} at {}",
            self.kind,
            self.description,
            self.timestamp.as_deref().unwrap_or_default()
        )
    }
}

/// Analyzers emit either structured anomalies or bare strings.
#[derive(Deserialize)]
#[serde(untagged)]
enum AnomalyRepr {
    Detailed {
        #[serde(rename = "type", default)]
        kind: Option<String>,
        #[serde(default)]
        description: String,
        #[serde(default)]
        timestamp: Option<String>,
        #[serde(default)]
        confidence: Option<f64>,
    },
    Note(String),
}

/// Clamp an analyzer confidence into a whole percentage.
fn percent(raw: f64) -> u8 {
    if raw.is_finite() {
        raw.clamp(0.0, 100.0).round() as u8
    } else {
        DEFAULT_CONFIDENCE
    }
}

impl From<AnomalyRepr> for Anomaly {
    fn from(repr: AnomalyRepr) -> Self {
        match repr {
            AnomalyRepr::Detailed {
                kind,
                description,
                timestamp,
                confidence,
            } => Anomaly {
                kind: kind.unwrap_or_else(|| DEFAULT_ANOMALY_KIND.to_string()),
                description,
                timestamp,
                confidence: confidence.map_or(DEFAULT_CONFIDENCE, percent),
            },
            AnomalyRepr::Note(description) => Anomaly {
                kind: DEFAULT_ANOMALY_KIND.to_string(),
                description,
                timestamp: None,
                confidence: DEFAULT_CONFIDENCE,
            },
        }
    }
}

/// Latest analyzer output for a zone.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ZoneAnalysis {
    #[serde(default)]
    pub crowd_count: u32,
    #[serde(default)]
    pub density_level: DensityLevel,
    #[serde(default)]
    pub anomalies: Vec<Anomaly>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub sentiment: String,
    #[serde(default = "Utc::now")]
    pub timestamp: DateTime<Utc>,
}

/// Dashboard view of a zone's density.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ZoneDensity {
    pub zone_id: String,
    pub density: f64,
    pub people_count: u32,
    pub density_level: DensityLevel,
    pub anomalies: Vec<String>,
    pub detailed_anomalies: Vec<Anomaly>,
    pub description: String,
    pub sentiment: String,
    pub timestamp: DateTime<Utc>,
}

/// An anomaly flattened across zones for the responder feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActiveAnomaly {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub description: String,
    pub location: String,
    pub timestamp: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_timestamp: Option<String>,
    pub confidence: u8,
    pub status: &'static str,
}

/// Latest analysis per zone id.
#[derive(Debug, Default)]
pub struct ZoneAnalysisStore {
    by_zone: RwLock<BTreeMap<String, ZoneAnalysis>>,
}

impl ZoneAnalysisStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `analysis` for `zone_id`, replacing any earlier record.
    pub fn record(&self, zone_id: impl Into<String>, analysis: ZoneAnalysis) {
        let zone_id = zone_id.into();
        tracing::debug!(
            zone_id = %zone_id,
            crowd_count = analysis.crowd_count,
            density = analysis.density_level.as_str(),
            anomalies = analysis.anomalies.len(),
            "zone analysis recorded"
        );
        self.by_zone.write().insert(zone_id, analysis);
    }

    pub fn get(&self, zone_id: &str) -> Option<ZoneAnalysis> {
        self.by_zone.read().get(zone_id).cloned()
    }

    pub fn density(&self, zone_id: &str) -> Option<ZoneDensity> {
        let by_zone = self.by_zone.read();
        let analysis = by_zone.get(zone_id)?;
        Some(ZoneDensity {
            zone_id: zone_id.to_string(),
            density: analysis.density_level.density(),
            people_count: analysis.crowd_count,
            density_level: analysis.density_level,
            anomalies: analysis.anomalies.iter().map(Anomaly::summary).collect(),
            detailed_anomalies: analysis.anomalies.clone(),
            description: analysis.description.clone(),
            sentiment: analysis.sentiment.clone(),
            timestamp: analysis.timestamp,
        })
    }

    /// Every recorded anomaly, grouped by zone id in ascending order.
    pub fn active_anomalies(&self) -> Vec<ActiveAnomaly> {
        self.by_zone
            .read()
            .iter()
            .flat_map(|(zone_id, analysis)| {
                analysis
                    .anomalies
                    .iter()
                    .enumerate()
                    .map(move |(index, anomaly)| ActiveAnomaly {
                        id: format!(
                            "{}_{}_{}",
                            zone_id,
                            anomaly.timestamp.as_deref().unwrap_or("0000"),
                            index
                        ),
                        kind: anomaly.kind.clone(),
                        description: anomaly.description.clone(),
                        location: zone_id.clone(),
                        timestamp: analysis.timestamp,
                        video_timestamp: anomaly.timestamp.clone(),
                        confidence: anomaly.confidence,
                        status: "active",
                    })
            })
            .collect()
    }

    pub fn len(&self) -> usize {
        self.by_zone.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_zone.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn analysis(value: serde_json::Value) -> ZoneAnalysis {
        serde_json::from_value(value).expect("valid analysis")
    }

    #[test]
    fn density_levels_map_to_numbers() {
        assert_eq!(DensityLevel::Low.density(), 0.2);
        assert_eq!(DensityLevel::Medium.density(), 0.5);
        assert_eq!(DensityLevel::High.density(), 0.8);
        assert_eq!(DensityLevel::Critical.density(), 1.0);
    }

    #[test]
    fn bare_string_anomalies_are_normalised() {
        let record = analysis(json!({
            "crowd_count": 120,
            "density_level": "High",
            "anomalies": [
                "Crowd surge near barrier",
                {"type": "gathering", "description": "Group forming", "timestamp": "01:30", "confidence": 91}
            ]
        }));

        assert_eq!(record.anomalies[0].kind, "other");
        assert_eq!(record.anomalies[0].confidence, 80);
        assert_eq!(record.anomalies[1].kind, "gathering");
        assert_eq!(record.anomalies[1].summary(), "gathering: Group forming at 01:30");
    }

    #[test]
    fn unusual_confidence_values_are_clamped() {
        let record = analysis(json!({
            "anomalies": [
                {"type": "fight", "description": "Scuffle", "confidence": 85.5},
                {"type": "fire", "description": "Smoke", "confidence": 300},
                {"type": "fall", "description": "Person down", "confidence": -4}
            ]
        }));

        let confidences: Vec<u8> = record.anomalies.iter().map(|a| a.confidence).collect();
        assert_eq!(confidences, vec![86, 100, 0]);
    }

    #[test]
    fn unknown_density_label_is_kept_as_low_signal() {
        let record = analysis(json!({"crowd_count": 7, "density_level": "Very High"}));
        assert_eq!(record.density_level, DensityLevel::Unknown);
        assert_eq!(record.density_level.density(), 0.1);
        assert_eq!(record.density_level.as_str(), "Unknown");
    }

    #[test]
    fn density_view_for_recorded_zone() {
        let store = ZoneAnalysisStore::new();
        assert!(store.density("food_court").is_none());

        store.record(
            "food_court",
            analysis(json!({"crowd_count": 40, "density_level": "Medium", "sentiment": "Calm"})),
        );

        let view = store.density("food_court").unwrap();
        assert_eq!(view.density, 0.5);
        assert_eq!(view.people_count, 40);
        assert_eq!(view.sentiment, "Calm");
        assert!(view.anomalies.is_empty());
    }

    #[test]
    fn active_anomalies_are_sorted_by_zone() {
        let store = ZoneAnalysisStore::new();
        store.record(
            "parking",
            analysis(json!({"anomalies": [{"type": "abandoned_object", "description": "Bag"}]})),
        );
        store.record(
            "entrance",
            analysis(json!({"anomalies": ["Pushing", "Shouting"]})),
        );

        let active = store.active_anomalies();
        let ids: Vec<&str> = active.iter().map(|a| a.id.as_str()).collect();
        assert_eq!(
            ids,
            vec!["entrance_0000_0", "entrance_0000_1", "parking_0000_0"]
        );
        assert!(active.iter().all(|a| a.status == "active"));
    }
}
