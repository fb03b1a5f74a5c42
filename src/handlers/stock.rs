use std::time::Instant;

use axum::{extract::State, Json};
use tracing::info;

use crate::{
    error::AppResult,
    extract::Path,
    models::{ConsumedStock, StockSummary},
    AppState,
};

// ── GET /api/stock/:id ────────────────────────────────────────────────────────

pub async fn get_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<StockSummary>> {
    let catalog = state.store.load().await?;
    let summary = catalog.stock_summary(id)?;

    info!(id, stock_count = summary.stock_count, "Fetched stock summary");

    Ok(Json(summary))
}

// ── POST /api/stock/consume/:id ───────────────────────────────────────────────

/// Load, pop, save. Nothing guards the whole cycle, so two purchases racing
/// on the same product can both hand out the same license.
pub async fn consume_stock(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ConsumedStock>> {
    let start = Instant::now();
    let mut catalog = state.store.load().await?;
    let consumed = catalog.consume(id)?;
    state.store.save(&catalog).await?;

    info!(
        id,
        category = %consumed.category,
        remaining = consumed.remaining_stock,
        elapsed_ms = start.elapsed().as_millis(),
        "Consumed stock item"
    );

    Ok(Json(consumed))
}
