//! SwiftLine fulfillment - order tracking for a chatbot dialog
//!
//! Receives one turn event per request, looks up the order when asked,
//! and answers with the next dialog action.

mod api;
mod config;
mod db;
mod lex;
mod orders;
mod runtime;
mod state_machine;

use api::{create_router, AppState};
use config::FulfillmentConfig;
use db::Database;
use runtime::{DatabaseOrderStore, FulfillmentRuntime, LoggingOrderStore, OrderStore};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "swiftline_fulfillment=info,tower_http=info".into()),
        )
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_current_span(true)
                .with_span_list(false),
        )
        .init();

    let config = FulfillmentConfig::from_env()?;

    // Ensure database directory exists
    if let Some(parent) = config.db_path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!(
        path = %config.db_path.display(),
        table = %config.orders_table,
        "Opening order database"
    );
    let db = Database::open(&config.db_path, &config.orders_table)?;

    if let Some(seed_file) = &config.seed_file {
        let loaded = db.load_seed_file(seed_file)?;
        tracing::info!(path = %seed_file.display(), loaded, "Seeded orders");
    }
    tracing::info!(
        table = db.table(),
        orders = db.order_count()?,
        "Order table ready"
    );

    let store: Arc<dyn OrderStore> = Arc::new(LoggingOrderStore::new(DatabaseOrderStore::new(db)));
    let runtime = FulfillmentRuntime::new(store, config.policy);
    tracing::info!(
        missing_slot = %config.policy.missing_slot,
        include_order_items = config.policy.include_order_items,
        follow_up_card = config.policy.follow_up_card,
        "Dialog policy"
    );

    let state = AppState::new(runtime, config.orders_table.clone());

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = create_router(state)
        .layer(cors)
        .layer(CompressionLayer::new().gzip(true))
        .layer(TraceLayer::new_for_http());

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!("SwiftLine fulfillment listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
