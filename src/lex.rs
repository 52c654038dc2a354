//! Chatbot platform envelope
//!
//! Typed views of the turn event the platform sends for every utterance and
//! of the dialog response it expects back.

mod event;
mod response;

#[allow(unused_imports)] // Public API re-exports
pub use event::{EventError, SlotRead, TurnEvent};
#[allow(unused_imports)] // Public API re-exports
pub use response::{
    DialogActionType, Fulfillment, ImageResponseCard, IntentState, Message, ResponseEnvelope,
};
