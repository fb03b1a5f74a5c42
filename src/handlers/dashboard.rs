use axum::{extract::State, Json};
use tracing::info;

use crate::{error::AppResult, models::DashboardStats, AppState};

pub async fn get_dashboard(State(state): State<AppState>) -> AppResult<Json<DashboardStats>> {
    let catalog = state.store.load().await?;
    let stats = catalog.dashboard();

    info!(
        products = stats.total_products,
        stock_items = stats.total_stock_items,
        low_stock = stats.low_stock_count,
        "Built dashboard"
    );

    Ok(Json(stats))
}
