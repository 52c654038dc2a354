//! Events that drive a turn

use crate::lex::TurnEvent;
use crate::orders::OrderRecord;

/// Events that trigger state transitions
#[derive(Debug, Clone)]
pub enum Event {
    /// The platform delivered a user turn
    TurnReceived(TurnEvent),

    // Store outcomes
    OrderFound(OrderRecord),
    OrderNotFound,
    StoreFailed,
}
