//! Turn executor

use super::traits::OrderStore;
use crate::lex::{Fulfillment, Message, ResponseEnvelope, TurnEvent};
use crate::state_machine::{
    transition, DialogPolicy, Effect, Event, TurnContext, TurnState, INTERNAL_ERROR,
    UNREADABLE_EVENT,
};
use serde_json::Value;
use std::collections::VecDeque;
use tracing::Instrument;

/// Runs turns to completion against any order store.
///
/// Never fails: decoding problems, store errors and invalid transitions all
/// end in a Close response the platform can show to the user.
pub struct FulfillmentRuntime<S: OrderStore> {
    store: S,
    policy: DialogPolicy,
}

impl<S: OrderStore> FulfillmentRuntime<S> {
    pub fn new(store: S, policy: DialogPolicy) -> Self {
        Self { store, policy }
    }

    pub fn policy(&self) -> DialogPolicy {
        self.policy
    }

    /// Handle a raw platform event
    pub async fn handle_value(&self, raw: Value) -> ResponseEnvelope {
        tracing::debug!(event = %raw, "Received turn event");

        match TurnEvent::from_value(raw) {
            Ok(turn) => self.handle_turn(turn).await,
            Err(e) => {
                tracing::warn!(error = %e, "Rejected unreadable turn event");
                ResponseEnvelope::close(
                    None,
                    Fulfillment::Failed,
                    vec![Message::plain_text(UNREADABLE_EVENT)],
                )
            }
        }
    }

    /// Handle an already decoded turn
    pub async fn handle_turn(&self, turn: TurnEvent) -> ResponseEnvelope {
        let turn_id = uuid::Uuid::new_v4().to_string();
        let span = tracing::info_span!(
            "turn",
            turn_id = %turn_id,
            intent = %turn.intent_name(),
            session_id = turn.session_id.as_deref().unwrap_or_default(),
        );
        let context = TurnContext::new(turn_id, self.policy);
        if let Some(transcript) = &turn.input_transcript {
            span.in_scope(|| tracing::debug!(transcript = %transcript, "User said"));
        }

        self.run(&context, turn).instrument(span).await
    }

    async fn run(&self, context: &TurnContext, turn: TurnEvent) -> ResponseEnvelope {
        let intent_name = turn.intent_name().to_string();
        let mut state = TurnState::Idle;
        let mut pending = VecDeque::from([Event::TurnReceived(turn)]);
        let mut response = None;

        while let Some(event) = pending.pop_front() {
            let result = match transition(&state, context, event) {
                Ok(result) => result,
                Err(e) => {
                    tracing::error!(
                        turn_id = %context.turn_id,
                        error = %e,
                        state = ?state,
                        "Transition failed"
                    );
                    return internal_error(&intent_name);
                }
            };

            for effect in result.effects {
                match effect {
                    Effect::LookupOrder { tracking_id } => {
                        pending.push_back(self.lookup(&tracking_id).await);
                    }
                    Effect::Respond(envelope) => response = Some(envelope),
                }
            }
            state = result.new_state;
        }

        match response {
            Some(envelope) => {
                tracing::info!(
                    dialog_action = ?envelope.dialog_action(),
                    intent_state = ?envelope.intent_state(),
                    "Turn completed"
                );
                envelope
            }
            None => {
                tracing::error!(state = ?state, "Turn ended without a response");
                internal_error(&intent_name)
            }
        }
    }

    async fn lookup(&self, tracking_id: &str) -> Event {
        match self.store.get_order(tracking_id).await {
            Ok(Some(order)) => Event::OrderFound(order),
            Ok(None) => Event::OrderNotFound,
            Err(e) => {
                // The store adapter already logged the failure
                tracing::debug!(tracking_id, error = %e, "Error fetching order");
                Event::StoreFailed
            }
        }
    }
}

fn internal_error(intent_name: &str) -> ResponseEnvelope {
    ResponseEnvelope::close(
        Some(intent_name),
        Fulfillment::Failed,
        vec![Message::plain_text(INTERNAL_ERROR)],
    )
}
