//! Effects produced by state transitions

use crate::lex::{Fulfillment, Message, ResponseEnvelope};

/// Effects to be executed after state transition
#[derive(Debug, Clone)]
pub enum Effect {
    /// Read one order from the store
    LookupOrder { tracking_id: String },

    /// Send this envelope back to the platform
    Respond(ResponseEnvelope),
}

impl Effect {
    pub fn close(intent_name: &str, outcome: Fulfillment, messages: Vec<Message>) -> Self {
        Effect::Respond(ResponseEnvelope::close(Some(intent_name), outcome, messages))
    }

    pub fn close_with_text(intent_name: &str, outcome: Fulfillment, text: &str) -> Self {
        Self::close(intent_name, outcome, vec![Message::plain_text(text)])
    }

    pub fn lookup_order(tracking_id: impl Into<String>) -> Self {
        Effect::LookupOrder {
            tracking_id: tracking_id.into(),
        }
    }
}
