//! Human-readable order summaries

use super::{OrderItem, OrderRecord};
use chrono::NaiveDate;
use std::fmt::Write;

const UNKNOWN: &str = "Unknown";
const DEFAULT_CUSTOMER: &str = "Valued Customer";

/// Render the status reply for a found order.
///
/// With `include_items` the item list and the order date are appended when
/// the record has them.
pub fn order_summary(order: &OrderRecord, include_items: bool) -> String {
    let customer = order.customer.name.as_deref().unwrap_or(DEFAULT_CUSTOMER);
    let status = order.delivery.status.as_deref().unwrap_or(UNKNOWN);
    let carrier = order.delivery.carrier.as_deref().unwrap_or(UNKNOWN);
    let estimated = order
        .delivery
        .estimated_date
        .as_deref()
        .map_or_else(|| UNKNOWN.to_string(), render_date);

    let mut text = format!(
        "Hello {customer}. Order {} is currently **{status}** via {carrier}. \
         It is estimated to arrive by {estimated}.",
        order.tracking_id
    );

    if include_items {
        let items = &order.order_details.items;
        if !items.is_empty() {
            text.push_str("\n\nItems in this order:");
            for item in items {
                let _ = write!(text, "\n- {}", describe_item(item));
            }
        }
        if let Some(date) = order.order_date.as_deref() {
            let _ = write!(text, "\n\nOrder placed on {}.", render_date(date));
        }
    }

    text
}

fn describe_item(item: &OrderItem) -> String {
    let mut line = match item.quantity {
        Some(quantity) => format!("{quantity} x {}", item.name),
        None => item.name.clone(),
    };
    if let Some(vendor) = item.vendor.as_deref() {
        let _ = write!(line, " ({vendor})");
    }
    line
}

/// ISO dates become `March 5, 2025`; anything else is shown verbatim
fn render_date(raw: &str) -> String {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_or_else(|_| raw.to_string(), |date| date.format("%B %-d, %Y").to_string())
}
