//! Turn state and dialog context

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Slot carrying the tracking number for `GetOrderStatus`
pub const TRACKING_ID_SLOT: &str = "TrackingID";

/// Intents with a dedicated handler. Anything else is delegated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KnownIntent {
    Welcome,
    GetOrderStatus,
    EndConversation,
}

impl KnownIntent {
    pub const ALL: [KnownIntent; 3] = [
        KnownIntent::Welcome,
        KnownIntent::GetOrderStatus,
        KnownIntent::EndConversation,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|intent| intent.name() == name)
    }

    pub fn name(self) -> &'static str {
        match self {
            KnownIntent::Welcome => "WelcomeIntent",
            KnownIntent::GetOrderStatus => "GetOrderStatus",
            KnownIntent::EndConversation => "EndConversationIntent",
        }
    }
}

/// Where a single turn is in its lifecycle
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum TurnState {
    #[default]
    Idle,
    /// Waiting on the store for `tracking_id`
    AwaitingOrder {
        intent_name: String,
        tracking_id: String,
    },
    /// A response has been produced; the turn is over
    Responded,
}

impl TurnState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, TurnState::Responded)
    }
}

/// What to do when `GetOrderStatus` arrives without a tracking number
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissingSlotPolicy {
    /// Ask the user for it
    #[default]
    Elicit,
    /// Close the conversation with an error message
    Error,
}

impl FromStr for MissingSlotPolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "elicit" => Ok(MissingSlotPolicy::Elicit),
            "error" => Ok(MissingSlotPolicy::Error),
            other => Err(format!("expected 'elicit' or 'error', got '{other}'")),
        }
    }
}

impl fmt::Display for MissingSlotPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MissingSlotPolicy::Elicit => write!(f, "elicit"),
            MissingSlotPolicy::Error => write!(f, "error"),
        }
    }
}

/// Response-shaping choices fixed for the lifetime of the service
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DialogPolicy {
    pub missing_slot: MissingSlotPolicy,
    /// Append the item list and order date to order summaries
    pub include_order_items: bool,
    /// Follow an order summary with an "anything else?" card
    pub follow_up_card: bool,
}

impl Default for DialogPolicy {
    fn default() -> Self {
        Self {
            missing_slot: MissingSlotPolicy::Elicit,
            include_order_items: true,
            follow_up_card: true,
        }
    }
}

/// Immutable context for one turn
#[derive(Debug, Clone)]
pub struct TurnContext {
    pub turn_id: String,
    pub policy: DialogPolicy,
}

impl TurnContext {
    pub fn new(turn_id: impl Into<String>, policy: DialogPolicy) -> Self {
        Self {
            turn_id: turn_id.into(),
            policy,
        }
    }
}
