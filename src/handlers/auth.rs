use axum::{
    extract::State,
    http::StatusCode,
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use futures::stream::{self, Stream};
use crate::app::AppState;
use crate::errors::ApiError;
use crate::models::{AuthResponse, AuthUser, LoginForm, RegisterForm};

pub async fn handle_login(
    State(state): State<AppState>,
    Json(login_form): Json<LoginForm>,
) -> Result<Json<AuthResponse>, ApiError> {
    tracing::info!("Login attempt for user: {}", login_form.email);
    let response = state
        .auth
        .login(&login_form.email, &login_form.password, login_form.remember)
        .await?;
    Ok(Json(response))
}

pub async fn handle_register(
    State(state): State<AppState>,
    Json(register_form): Json<RegisterForm>,
) -> Result<(StatusCode, Json<AuthResponse>), ApiError> {
    let response = state
        .auth
        .register(
            &register_form.name,
            &register_form.email,
            &register_form.password,
            register_form.terms_accepted,
        )
        .await?;
    Ok((StatusCode::CREATED, Json(response)))
}

pub async fn handle_logout(State(state): State<AppState>) -> Result<StatusCode, ApiError> {
    state.auth.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn current_user(State(state): State<AppState>) -> Result<Json<AuthUser>, ApiError> {
    state
        .auth
        .current_user()
        .await?
        .map(Json)
        .ok_or(ApiError::Unauthorized)
}

/// Server-sent events carrying the authentication state, latest first.
pub async fn auth_events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, axum::Error>>> {
    let events = stream::unfold(state.auth.subscribe(), |mut subscription| async move {
        let auth_state = subscription.recv().await?;
        let event = Event::default().event("auth").json_data(&auth_state);
        Some((event, subscription))
    });
    Sse::new(events).keep_alive(KeepAlive::default())
}
