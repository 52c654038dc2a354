//! Inbound turn events

use serde::Deserialize;
use serde_json::{Map, Value};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum EventError {
    #[error("Event is not a valid turn event: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// One user utterance as classified by the platform
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnEvent {
    pub session_state: SessionState,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub input_transcript: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SessionState {
    pub intent: Intent,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Intent {
    pub name: String,
    /// Kept untyped so that malformed slots do not reject the whole turn.
    /// Only intents that read a slot validate the map, on read.
    #[serde(default)]
    pub slots: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
struct Slot {
    #[serde(default)]
    value: Option<SlotValue>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SlotValue {
    #[serde(default)]
    original_value: Option<String>,
    #[serde(default)]
    interpreted_value: Option<String>,
    #[serde(default)]
    #[allow(dead_code)] // Accepted so the platform's full slot shape validates
    resolved_values: Vec<String>,
}

/// Outcome of reading a single slot
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotRead {
    Filled(String),
    Missing,
    /// The slot is present but does not have the expected shape
    Malformed(String),
}

impl TurnEvent {
    pub fn from_value(value: Value) -> Result<Self, EventError> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn intent_name(&self) -> &str {
        &self.session_state.intent.name
    }

    /// The slot map, if the platform sent one that is an object
    pub fn slots(&self) -> Option<&Map<String, Value>> {
        self.session_state
            .intent
            .slots
            .as_ref()
            .and_then(Value::as_object)
    }

    /// Read a slot's text, preferring what the user typed over the
    /// platform's interpretation of it.
    pub fn read_slot(&self, name: &str) -> SlotRead {
        let slots = match &self.session_state.intent.slots {
            None | Some(Value::Null) => return SlotRead::Missing,
            Some(Value::Object(slots)) => slots,
            Some(other) => return SlotRead::Malformed(format!("slots is not a map: {other}")),
        };
        let Some(raw) = slots.get(name) else {
            return SlotRead::Missing;
        };
        if raw.is_null() {
            return SlotRead::Missing;
        }

        let slot: Slot = match serde_json::from_value(raw.clone()) {
            Ok(slot) => slot,
            Err(e) => return SlotRead::Malformed(format!("slot {name}: {e}")),
        };

        slot.value
            .and_then(|v| {
                v.original_value
                    .filter(|original| !original.trim().is_empty())
                    .or(v.interpreted_value)
            })
            .map_or(SlotRead::Missing, SlotRead::Filled)
    }
}
