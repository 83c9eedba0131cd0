use axum::{extract::State, Json};
use serde_json::{json, Value};
use crate::app::AppState;
use crate::errors::ApiError;
use crate::models::AuthUser;

pub async fn list_users(State(state): State<AppState>) -> Result<Json<Vec<AuthUser>>, ApiError> {
    Ok(Json(state.auth.list_users().await?))
}

pub async fn health() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
