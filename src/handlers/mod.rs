pub mod categories;
pub mod dashboard;
pub mod products;
pub mod stock;

use axum::{extract::State, http::StatusCode, Json};
use chrono::Utc;
use serde_json::{json, Value};
use tracing::warn;

use crate::AppState;

pub const SERVICE_NAME: &str = "Product Stock API";
pub const SERVICE_VERSION: &str = "1.0.0";

pub async fn root() -> Json<Value> {
    Json(json!({
        "message": SERVICE_NAME,
        "version": SERVICE_VERSION,
        "status": "running",
        "endpoints": {
            "GET /api/products": "Get all products",
            "GET /api/products/{product_id}": "Get specific product",
            "GET /api/categories": "Get all categories",
            "GET /api/categories/{category_name}": "Get products by category",
            "GET /api/stock/{product_id}": "Get stock count for product",
            "POST /api/stock/consume/{product_id}": "Consume one stock item",
            "GET /api/dashboard": "Get dashboard statistics",
            "GET /api/health": "Health check endpoint",
        },
    }))
}

/// Always 200: a failed load is reported in the body.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<Value>) {
    match state.store.load().await {
        Ok(_) => (
            StatusCode::OK,
            Json(json!({
                "status": "healthy",
                "timestamp": Utc::now().to_rfc3339(),
                "service": SERVICE_NAME,
            })),
        ),
        Err(e) => {
            warn!(error = %e, "Health check failed");
            (
                StatusCode::OK,
                Json(json!({ "status": "unhealthy", "error": e.to_string() })),
            )
        }
    }
}
