//! Mock implementations for testing
//!
//! These mocks enable runtime and API tests without a real database.

use super::traits::{OrderStore, StoreError};
use crate::orders::{Customer, Delivery, OrderDetails, OrderItem, OrderRecord};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// A fully populated order for fixtures
pub fn sample_order(tracking_id: &str) -> OrderRecord {
    OrderRecord {
        tracking_id: tracking_id.to_string(),
        customer: Customer {
            name: Some("Ada Lovelace".to_string()),
            email: Some("ada@example.com".to_string()),
            phone: Some("+1-555-0100".to_string()),
        },
        delivery: Delivery {
            status: Some("In Transit".to_string()),
            carrier: Some("FedEx".to_string()),
            estimated_date: Some("2025-03-05".to_string()),
        },
        order_details: OrderDetails {
            items: vec![
                OrderItem {
                    name: "Desk Lamp".to_string(),
                    quantity: Some(1),
                    vendor: Some("Lumen Co".to_string()),
                },
                OrderItem {
                    name: "LED Bulb".to_string(),
                    quantity: Some(4),
                    vendor: None,
                },
            ],
        },
        order_date: Some("2025-02-28".to_string()),
    }
}

// ============================================================================
// Mock Order Store
// ============================================================================

/// In-memory order store that records every lookup
#[derive(Default)]
pub struct MockOrderStore {
    orders: HashMap<String, OrderRecord>,
    lookups: Mutex<Vec<String>>,
}

impl MockOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order(mut self, order: OrderRecord) -> Self {
        self.orders.insert(order.tracking_id.clone(), order);
        self
    }

    /// Tracking ids exactly as they were queried
    pub fn recorded_lookups(&self) -> Vec<String> {
        self.lookups.lock().unwrap().clone()
    }
}

#[async_trait]
impl OrderStore for MockOrderStore {
    async fn get_order(&self, tracking_id: &str) -> Result<Option<OrderRecord>, StoreError> {
        self.lookups.lock().unwrap().push(tracking_id.to_string());
        Ok(self.orders.get(tracking_id).cloned())
    }
}

// ============================================================================
// Failing Order Store
// ============================================================================

/// Store whose every read fails
pub struct FailingOrderStore {
    message: String,
}

impl FailingOrderStore {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

#[async_trait]
impl OrderStore for FailingOrderStore {
    async fn get_order(&self, _tracking_id: &str) -> Result<Option<OrderRecord>, StoreError> {
        Err(StoreError::Unavailable(self.message.clone()))
    }
}
