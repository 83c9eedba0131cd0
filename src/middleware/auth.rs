use axum::{
    middleware::Next,
    response::Response,
    extract::{Request, State},
};
use crate::app::AppState;
use crate::errors::ApiError;

/// Paths reachable without a session.
const PUBLIC_PATHS: [&str; 5] = [
    "/health",
    "/api/auth/login",
    "/api/auth/register",
    "/api/auth/logout",
    "/api/auth/events",
];

pub async fn require_auth(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let path = req.uri().path();

    if PUBLIC_PATHS.contains(&path) {
        return Ok(next.run(req).await);
    }

    if state.auth.is_authenticated().await? {
        Ok(next.run(req).await)
    } else {
        tracing::debug!("Rejected unauthenticated request to {}", path);
        Err(ApiError::Unauthorized)
    }
}

pub async fn require_admin(
    State(state): State<AppState>,
    req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    match state.auth.current_user().await? {
        Some(user) if user.is_admin() => Ok(next.run(req).await),
        Some(user) => {
            tracing::warn!("User {} denied admin route {}", user.email, req.uri().path());
            Err(ApiError::Forbidden)
        }
        None => Err(ApiError::Unauthorized),
    }
}
