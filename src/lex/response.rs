//! Dialog responses returned to the platform
//!
//! `ResponseEnvelope` can only be built through constructors that keep the
//! dialog action and the intent state consistent:
//! Close carries Fulfilled or Failed, `ElicitSlot` carries `InProgress`,
//! Delegate leaves the state to the platform.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialogActionType {
    Close,
    ElicitSlot,
    Delegate,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntentState {
    Fulfilled,
    Failed,
    InProgress,
}

/// How a closed conversation ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fulfillment {
    Fulfilled,
    Failed,
}

impl From<Fulfillment> for IntentState {
    fn from(value: Fulfillment) -> Self {
        match value {
            Fulfillment::Fulfilled => IntentState::Fulfilled,
            Fulfillment::Failed => IntentState::Failed,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogAction {
    #[serde(rename = "type")]
    pub kind: DialogActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slot_to_elicit: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntentOutcome {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<IntentState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slots: Option<Map<String, Value>>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseSessionState {
    pub dialog_action: DialogAction,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<IntentOutcome>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Button {
    pub text: String,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageResponseCard {
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtitle: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(default)]
    pub buttons: Vec<Button>,
}

impl ImageResponseCard {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            subtitle: None,
            image_url: None,
            buttons: vec![],
        }
    }

    pub fn with_subtitle(mut self, subtitle: impl Into<String>) -> Self {
        self.subtitle = Some(subtitle.into());
        self
    }

    pub fn with_button(mut self, text: impl Into<String>, value: impl Into<String>) -> Self {
        self.buttons.push(Button {
            text: text.into(),
            value: value.into(),
        });
        self
    }
}

/// A message block shown to the user
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "contentType")]
pub enum Message {
    PlainText {
        content: String,
    },
    ImageResponseCard {
        #[serde(rename = "imageResponseCard")]
        image_response_card: ImageResponseCard,
    },
}

impl Message {
    pub fn plain_text(content: impl Into<String>) -> Self {
        Message::PlainText {
            content: content.into(),
        }
    }

    pub fn card(card: ImageResponseCard) -> Self {
        Message::ImageResponseCard {
            image_response_card: card,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    session_state: ResponseSessionState,
    messages: Vec<Message>,
}

impl ResponseEnvelope {
    /// End the conversation. `intent_name` is `None` only when the event was
    /// too broken to name an intent.
    pub fn close(intent_name: Option<&str>, outcome: Fulfillment, messages: Vec<Message>) -> Self {
        Self {
            session_state: ResponseSessionState {
                dialog_action: DialogAction {
                    kind: DialogActionType::Close,
                    slot_to_elicit: None,
                },
                intent: intent_name.map(|name| IntentOutcome {
                    name: name.to_string(),
                    state: Some(outcome.into()),
                    slots: None,
                }),
            },
            messages,
        }
    }

    /// Ask the user for `slot`, echoing back the slots gathered so far
    pub fn elicit_slot(
        intent_name: &str,
        slot: &str,
        slots: Option<Map<String, Value>>,
        messages: Vec<Message>,
    ) -> Self {
        Self {
            session_state: ResponseSessionState {
                dialog_action: DialogAction {
                    kind: DialogActionType::ElicitSlot,
                    slot_to_elicit: Some(slot.to_string()),
                },
                intent: Some(IntentOutcome {
                    name: intent_name.to_string(),
                    state: Some(IntentState::InProgress),
                    slots,
                }),
            },
            messages,
        }
    }

    /// Hand the turn back to the platform
    pub fn delegate(intent_name: &str, messages: Vec<Message>) -> Self {
        Self {
            session_state: ResponseSessionState {
                dialog_action: DialogAction {
                    kind: DialogActionType::Delegate,
                    slot_to_elicit: None,
                },
                intent: Some(IntentOutcome {
                    name: intent_name.to_string(),
                    state: None,
                    slots: None,
                }),
            },
            messages,
        }
    }

    pub fn dialog_action(&self) -> DialogActionType {
        self.session_state.dialog_action.kind
    }

    pub fn slot_to_elicit(&self) -> Option<&str> {
        self.session_state.dialog_action.slot_to_elicit.as_deref()
    }

    pub fn intent_name(&self) -> Option<&str> {
        self.session_state.intent.as_ref().map(|i| i.name.as_str())
    }

    pub fn intent_state(&self) -> Option<IntentState> {
        self.session_state.intent.as_ref().and_then(|i| i.state)
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// All plain-text content joined by newlines
    pub fn text(&self) -> String {
        self.messages
            .iter()
            .filter_map(|m| match m {
                Message::PlainText { content } => Some(content.as_str()),
                Message::ImageResponseCard { .. } => None,
            })
            .collect::<Vec<_>>()
            .join("\n")
    }

    /// Whether the dialog action agrees with the intent state
    pub fn is_consistent(&self) -> bool {
        let has_intent = self.session_state.intent.is_some();
        match (self.dialog_action(), self.intent_state()) {
            (DialogActionType::Close, Some(IntentState::Fulfilled | IntentState::Failed)) => true,
            (DialogActionType::Close, None) => !has_intent,
            (DialogActionType::ElicitSlot, Some(IntentState::InProgress)) => {
                self.slot_to_elicit().is_some()
            }
            (DialogActionType::Delegate, None) => true,
            _ => false,
        }
    }
}
