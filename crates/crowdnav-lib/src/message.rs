//! Responder message board.
//!
//! Dashboards post free-form messages (sender, text, incident reference, ...)
//! and poll the full list. The board stamps each message with an id and a
//! receive time and otherwise keeps the payload as sent.

use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

/// Payload keys owned by the board; client values for them are replaced.
const RESERVED_KEYS: [&str; 2] = ["id", "timestamp"];

/// A posted message with the fields the board assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub timestamp: DateTime<Utc>,
    #[serde(flatten)]
    pub body: Map<String, Value>,
}

impl Message {
    /// `text` field of the payload, when it is a string.
    pub fn text(&self) -> Option<&str> {
        self.body.get("text").and_then(Value::as_str)
    }
}

/// Append-only, in-memory list of messages in posting order.
#[derive(Debug, Default)]
pub struct MessageBoard {
    messages: RwLock<Vec<Message>>,
}

impl MessageBoard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp `body` with a fresh id and the current time and append it.
    pub fn post(&self, mut body: Map<String, Value>) -> Message {
        for key in RESERVED_KEYS {
            body.remove(key);
        }

        let message = Message {
            id: Uuid::now_v7().to_string(),
            timestamp: Utc::now(),
            body,
        };
        self.messages.write().push(message.clone());

        tracing::debug!(message_id = %message.id, "message posted");
        message
    }

    pub fn list(&self) -> Vec<Message> {
        self.messages.read().clone()
    }

    pub fn len(&self) -> usize {
        self.messages.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.read().is_empty()
    }
}
