use axum::extract::FromRequestParts;

use crate::error::AppError;

/// `axum::extract::Path` whose rejection is rendered like every other error,
/// as a JSON `{"detail": ...}` body.
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(AppError))]
pub struct Path<T>(pub T);
