//! Runtime for executing turns
//!
//! Carries out the effects the state machine asks for against an injected
//! order store and hands the resulting envelope back to the caller.

mod executor;
pub mod traits;

#[cfg(test)]
pub mod testing;

pub use executor::FulfillmentRuntime;
pub use traits::*;

use std::sync::Arc;

/// Runtime over a type-erased store, as wired up by the server
pub type ProductionRuntime = FulfillmentRuntime<Arc<dyn OrderStore>>;
