//! Pure state transition function
//!
//! Given the same state, context and event this always produces the same
//! result. All I/O (the order lookup, replying to the platform) is expressed
//! as effects for the runtime to carry out.

use super::replies;
use super::state::{KnownIntent, MissingSlotPolicy, TRACKING_ID_SLOT};
use super::{Effect, Event, TurnContext, TurnState};
use crate::lex::{Fulfillment, Message, ResponseEnvelope, SlotRead, TurnEvent};
use crate::orders::{normalize_tracking_id, order_summary, OrderRecord};
use thiserror::Error;

/// Result of a state transition
#[derive(Debug)]
pub struct TransitionResult {
    pub new_state: TurnState,
    pub effects: Vec<Effect>,
}

impl TransitionResult {
    pub fn new(state: TurnState) -> Self {
        Self {
            new_state: state,
            effects: vec![],
        }
    }

    pub fn with_effect(mut self, effect: Effect) -> Self {
        self.effects.push(effect);
        self
    }

    /// Final transition of a turn: reply and stop
    fn respond(effect: Effect) -> Self {
        Self::new(TurnState::Responded).with_effect(effect)
    }
}

/// Errors that can occur during transition
#[derive(Debug, Error)]
pub enum TransitionError {
    #[error("Turn has already been answered")]
    AlreadyResponded,
    #[error("Store result arrived with no lookup in flight")]
    NoLookupPending,
    #[error("Invalid transition: {0}")]
    InvalidTransition(String),
}

pub fn transition(
    state: &TurnState,
    context: &TurnContext,
    event: Event,
) -> Result<TransitionResult, TransitionError> {
    match (state, event) {
        // ============================================================
        // Intent dispatch
        // ============================================================
        (TurnState::Idle, Event::TurnReceived(turn)) => Ok(dispatch(context, &turn)),

        // ============================================================
        // Order lookup outcomes
        // ============================================================
        (TurnState::AwaitingOrder { tracking_id, .. }, Event::OrderFound(order))
            if order.tracking_id != *tracking_id =>
        {
            Err(TransitionError::InvalidTransition(format!(
                "Asked for order {tracking_id} but the store returned {}",
                order.tracking_id
            )))
        }

        (TurnState::AwaitingOrder { intent_name, .. }, Event::OrderFound(order)) => Ok(
            TransitionResult::respond(order_found(intent_name, context, &order)),
        ),

        (TurnState::AwaitingOrder { intent_name, .. }, Event::OrderNotFound) => {
            Ok(TransitionResult::respond(Effect::close_with_text(
                intent_name,
                Fulfillment::Fulfilled,
                replies::ORDER_NOT_FOUND,
            )))
        }

        // Store errors are answered like any other outcome
        (TurnState::AwaitingOrder { intent_name, .. }, Event::StoreFailed) => {
            Ok(TransitionResult::respond(Effect::close_with_text(
                intent_name,
                Fulfillment::Fulfilled,
                replies::STORE_UNAVAILABLE,
            )))
        }

        // ============================================================
        // Invalid Transitions
        // ============================================================
        (TurnState::Responded, _) => Err(TransitionError::AlreadyResponded),

        (
            TurnState::Idle,
            Event::OrderFound(_) | Event::OrderNotFound | Event::StoreFailed,
        ) => Err(TransitionError::NoLookupPending),

        (TurnState::AwaitingOrder { .. }, Event::TurnReceived(turn)) => {
            Err(TransitionError::InvalidTransition(format!(
                "No transition from {state:?} with a new turn for {}",
                turn.intent_name()
            )))
        }
    }
}

fn dispatch(context: &TurnContext, turn: &TurnEvent) -> TransitionResult {
    let intent_name = turn.intent_name();

    match KnownIntent::from_name(intent_name) {
        Some(KnownIntent::Welcome) => TransitionResult::respond(Effect::close(
            intent_name,
            Fulfillment::Fulfilled,
            vec![replies::welcome_card()],
        )),
        Some(KnownIntent::GetOrderStatus) => order_status_request(context, turn),
        Some(KnownIntent::EndConversation) => TransitionResult::respond(Effect::close_with_text(
            intent_name,
            Fulfillment::Fulfilled,
            replies::GOODBYE,
        )),
        None => TransitionResult::respond(Effect::Respond(ResponseEnvelope::delegate(
            intent_name,
            vec![Message::plain_text(replies::NOT_SURE)],
        ))),
    }
}

fn order_status_request(context: &TurnContext, turn: &TurnEvent) -> TransitionResult {
    let intent_name = turn.intent_name();

    let tracking_id = match turn.read_slot(TRACKING_ID_SLOT) {
        SlotRead::Filled(raw) => normalize_tracking_id(&raw),
        SlotRead::Missing => None,
        SlotRead::Malformed(_) => {
            return TransitionResult::respond(Effect::close_with_text(
                intent_name,
                Fulfillment::Failed,
                replies::SLOT_READ_ERROR,
            ));
        }
    };

    match tracking_id {
        Some(tracking_id) => TransitionResult::new(TurnState::AwaitingOrder {
            intent_name: intent_name.to_string(),
            tracking_id: tracking_id.clone(),
        })
        .with_effect(Effect::lookup_order(tracking_id)),
        None => missing_tracking_id(context, turn),
    }
}

fn missing_tracking_id(context: &TurnContext, turn: &TurnEvent) -> TransitionResult {
    let intent_name = turn.intent_name();

    match context.policy.missing_slot {
        MissingSlotPolicy::Elicit => {
            TransitionResult::respond(Effect::Respond(ResponseEnvelope::elicit_slot(
                intent_name,
                TRACKING_ID_SLOT,
                turn.slots().cloned(),
                vec![Message::plain_text(replies::TRACKING_ID_PROMPT)],
            )))
        }
        MissingSlotPolicy::Error => TransitionResult::respond(Effect::close_with_text(
            intent_name,
            Fulfillment::Failed,
            replies::SLOT_READ_ERROR,
        )),
    }
}

fn order_found(intent_name: &str, context: &TurnContext, order: &OrderRecord) -> Effect {
    let mut messages = vec![Message::plain_text(order_summary(
        order,
        context.policy.include_order_items,
    ))];
    if context.policy.follow_up_card {
        messages.push(replies::follow_up_card());
    }
    Effect::close(intent_name, Fulfillment::Fulfilled, messages)
}
