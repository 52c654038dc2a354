//! Canned dialog content

use crate::lex::{ImageResponseCard, Message};

pub const TRACKING_ID_PROMPT: &str =
    "Sure, I can help with that. What is your tracking number? It looks like SWL-001.";
pub const SLOT_READ_ERROR: &str = "I encountered an error reading the tracking number.";
pub const STORE_UNAVAILABLE: &str =
    "I'm having trouble accessing the order database right now. Please try again later.";
pub const ORDER_NOT_FOUND: &str =
    "I couldn't find an order with that tracking ID. Please check the number and try again.";
pub const GOODBYE: &str = "Thank you for contacting SwiftLine Support. Have a great day!";
pub const NOT_SURE: &str = "I'm not sure how to help with that.";
pub const UNREADABLE_EVENT: &str = "Sorry, I couldn't process that request.";
pub const INTERNAL_ERROR: &str = "Sorry, something went wrong while handling your request.";

pub fn welcome_card() -> Message {
    Message::card(
        ImageResponseCard::new("Welcome to SwiftLine Support")
            .with_subtitle("How can we help you today?")
            .with_button("Track my Order", "Track my order"),
    )
}

pub fn follow_up_card() -> Message {
    Message::card(
        ImageResponseCard::new("Is there anything else I can help you with?")
            .with_button("Yes", "Track another order")
            .with_button("No", "No, that's all"),
    )
}
