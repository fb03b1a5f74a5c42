use axum::{extract::State, Json};
use serde_json::{json, Value};
use tracing::info;

use crate::{error::AppResult, extract::Path, AppState};

pub async fn list_categories(State(state): State<AppState>) -> AppResult<Json<Value>> {
    let catalog = state.store.load().await?;
    let categories = catalog.category_summaries();

    info!(count = categories.len(), "Listed categories");

    Ok(Json(json!({ "categories": categories })))
}

pub async fn get_category(
    State(state): State<AppState>,
    Path(name): Path<String>,
) -> AppResult<Json<Value>> {
    let catalog = state.store.load().await?;
    let products = catalog.category(&name)?;

    info!(category = %name, count = products.len(), "Fetched category");

    Ok(Json(json!({
        "category": name,
        "products": products,
    })))
}
