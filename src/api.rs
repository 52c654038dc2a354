//! HTTP API for SwiftLine fulfillment
//!
//! The chatbot platform posts one turn event per request and receives the
//! dialog response in the body.

mod handlers;
mod types;

pub use handlers::create_router;
#[allow(unused_imports)] // Public API re-exports
pub use types::*;

use crate::runtime::ProductionRuntime;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub runtime: Arc<ProductionRuntime>,
    pub orders_table: String,
}

impl AppState {
    pub fn new(runtime: ProductionRuntime, orders_table: impl Into<String>) -> Self {
        Self {
            runtime: Arc::new(runtime),
            orders_table: orders_table.into(),
        }
    }
}
