use std::sync::Arc;

use anyhow::Context;
use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

mod config;
mod error;
mod extract;
mod handlers;
mod models;
mod seed;
mod store;

use crate::config::Config;
use crate::store::Store;

/// Shared application state. The store is the only thing shared between
/// requests; the catalog itself is reloaded from disk every time.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<Store>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present (ignored in production where env vars are injected)
    dotenv::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,stock_service=debug".into()),
        )
        .with_target(false)
        .compact()
        .init();

    let config = Config::from_env()?;

    let store = Store::open(&config)
        .await
        .context("failed to prepare data directories")?;

    info!(
        version = handlers::SERVICE_VERSION,
        stock_file = %store.stock_file().display(),
        backup_dir = %store.backup_dir().display(),
        "Starting {}",
        handlers::SERVICE_NAME
    );

    let state = AppState {
        store: Arc::new(store),
    };

    let app = build_router(state);

    let addr = format!("{}:{}", config.host, config.port);
    info!("Listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn build_router(state: AppState) -> Router {
    Router::new()
        // ── Info / health ───────────────────────────────────────────────────
        .route("/", get(handlers::root))
        .route("/api/health", get(handlers::health))

        // ── Products ────────────────────────────────────────────────────────
        .route("/api/products", get(handlers::products::list_products))
        .route("/api/products/:id", get(handlers::products::get_product))

        // ── Categories ──────────────────────────────────────────────────────
        .route("/api/categories", get(handlers::categories::list_categories))
        .route(
            "/api/categories/:name",
            get(handlers::categories::get_category),
        )

        // ── Stock ───────────────────────────────────────────────────────────
        .route("/api/stock/:id", get(handlers::stock::get_stock))
        .route(
            "/api/stock/consume/:id",
            post(handlers::stock::consume_stock),
        )

        // ── Dashboard ───────────────────────────────────────────────────────
        .route("/api/dashboard", get(handlers::dashboard::get_dashboard))

        // ── Middleware ──────────────────────────────────────────────────────
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
