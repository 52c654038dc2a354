//! Trait abstractions for runtime I/O
//!
//! These traits enable testing the executor with mock implementations.

use crate::db::{Database, DbError};
use crate::orders::OrderRecord;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Instant;
use thiserror::Error;

/// Failure to reach or read the order store
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Order store unavailable: {0}")]
    Unavailable(String),
    #[error("Order {tracking_id} is unreadable: {reason}")]
    Corrupt { tracking_id: String, reason: String },
}

impl From<DbError> for StoreError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::CorruptRecord { tracking_id, reason } => {
                StoreError::Corrupt { tracking_id, reason }
            }
            other => StoreError::Unavailable(other.to_string()),
        }
    }
}

/// Read access to order records, keyed by tracking id
#[async_trait]
pub trait OrderStore: Send + Sync {
    /// Point read of one order. `Ok(None)` means no such order.
    async fn get_order(&self, tracking_id: &str) -> Result<Option<OrderRecord>, StoreError>;
}

#[async_trait]
impl<T: OrderStore + ?Sized> OrderStore for Arc<T> {
    async fn get_order(&self, tracking_id: &str) -> Result<Option<OrderRecord>, StoreError> {
        (**self).get_order(tracking_id).await
    }
}

// ============================================================================
// Production Adapters
// ============================================================================

/// Adapter to use Database as an order store
#[derive(Clone)]
pub struct DatabaseOrderStore {
    db: Database,
}

impl DatabaseOrderStore {
    pub fn new(db: Database) -> Self {
        Self { db }
    }
}

#[async_trait]
impl OrderStore for DatabaseOrderStore {
    async fn get_order(&self, tracking_id: &str) -> Result<Option<OrderRecord>, StoreError> {
        self.db.get_order(tracking_id).map_err(StoreError::from)
    }
}

/// Logging wrapper for order stores
pub struct LoggingOrderStore<S> {
    inner: S,
}

impl<S: OrderStore> LoggingOrderStore<S> {
    pub fn new(inner: S) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl<S: OrderStore> OrderStore for LoggingOrderStore<S> {
    async fn get_order(&self, tracking_id: &str) -> Result<Option<OrderRecord>, StoreError> {
        let start = Instant::now();
        let result = self.inner.get_order(tracking_id).await;
        let duration = start.elapsed();

        match &result {
            Ok(order) => {
                tracing::info!(
                    tracking_id,
                    found = order.is_some(),
                    duration_ms = %duration.as_millis(),
                    "Order lookup completed"
                );
            }
            Err(e) => {
                tracing::error!(
                    tracking_id,
                    duration_ms = %duration.as_millis(),
                    error = %e,
                    "Order lookup failed"
                );
            }
        }

        result
    }
}
