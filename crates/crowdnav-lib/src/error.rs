use thiserror::Error;

/// Convenient result alias for the CrowdNav library.
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level library error type.
#[derive(Debug, Error)]
pub enum Error {
    /// Raised when a zone name is not part of the active venue.
    #[error("unknown zone name: {name}{}", format_suggestions(.suggestions))]
    UnknownZone {
        name: String,
        suggestions: Vec<String>,
    },

    /// Raised when both zones exist but no route connects them.
    #[error("no route found between {start} and {end}")]
    RouteNotFound { start: String, end: String },

    /// Raised when selecting an event id that was never registered.
    #[error("unknown event id: {id}")]
    UnknownEvent { id: String },

    /// Raised when venue configuration input is rejected before any mutation.
    #[error("invalid venue configuration: {message}")]
    InvalidVenueConfig { message: String },

    /// Raised when a computed route plan lacks any zones.
    #[error("route plan was empty")]
    EmptyRoutePlan,

    /// Wrapper for IO errors.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Wrapper for JSON (de)serialisation errors in the event snapshot file.
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn invalid_config(message: impl Into<String>) -> Self {
        Error::InvalidVenueConfig {
            message: message.into(),
        }
    }
}

fn format_suggestions(suggestions: &[String]) -> String {
    if suggestions.is_empty() {
        String::new()
    } else if suggestions.len() == 1 {
        format!(". Did you mean '{}'?", suggestions[0])
    } else {
        format!(
            ". Did you mean one of: {}?",
            suggestions
                .iter()
                .map(|s| format!("'{}'", s))
                .collect::<Vec<_>>()
                .join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_zone_without_suggestions() {
        let err = Error::UnknownZone {
            name: "Stage".to_string(),
            suggestions: vec![],
        };
        assert_eq!(err.to_string(), "unknown zone name: Stage");
    }

    #[test]
    fn unknown_zone_lists_suggestions() {
        let err = Error::UnknownZone {
            name: "Main Stag".to_string(),
            suggestions: vec!["Main Stage".to_string(), "Backstage".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "unknown zone name: Main Stag. Did you mean one of: 'Main Stage', 'Backstage'?"
        );
    }
}
