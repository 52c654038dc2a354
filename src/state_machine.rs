//! Intent dispatch state machine
//!
//! Implements the Elm Architecture pattern with pure state transitions.
//! One turn starts `Idle`, may pass through `AwaitingOrder` while the store
//! is consulted, and always ends `Responded` with exactly one reply.

mod effect;
pub mod event;
mod replies;
pub mod state;
pub(crate) mod transition;

#[cfg(test)]
mod proptests;

pub use effect::Effect;
pub use event::Event;
pub(crate) use replies::{INTERNAL_ERROR, UNREADABLE_EVENT};
pub use state::{DialogPolicy, MissingSlotPolicy, TurnContext, TurnState};
pub use transition::transition;
