use std::time::Instant;

use axum::{extract::State, Json};
use tracing::info;

use crate::{error::AppResult, extract::Path, models::Product, AppState};

// ── List ──────────────────────────────────────────────────────────────────────

pub async fn list_products(State(state): State<AppState>) -> AppResult<Json<Vec<Product>>> {
    let start = Instant::now();
    let catalog = state.store.load().await?;
    let products: Vec<Product> = catalog.products().cloned().collect();

    info!(
        count = products.len(),
        elapsed_ms = start.elapsed().as_millis(),
        "Listed products"
    );

    Ok(Json(products))
}

// ── Get by ID ─────────────────────────────────────────────────────────────────

pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<Product>> {
    let catalog = state.store.load().await?;
    let (category, product) = catalog.find_product(id)?;

    info!(id, category, "Fetched product");

    Ok(Json(product.clone()))
}
