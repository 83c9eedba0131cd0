use axum::{
    routing::{get, post},
    Router,
    extract::DefaultBodyLimit,
    middleware::from_fn_with_state,
};
use tower_http::{
    limit::RequestBodyLimitLayer,
    trace::TraceLayer,
};
use std::sync::Arc;
use crate::{
    config::{Config, ServerConfig, StorageBackend},
    errors::AuthResult,
    handlers,
    middleware,
    services::{AuthService, FileStore, KeyValueStore, MemoryStore, RedisStore},
};

// Application state shared between handlers
#[derive(Clone)]
pub struct AppState {
    pub auth: Arc<AuthService>,
}

impl AppState {
    pub fn new(auth: AuthService) -> Self {
        Self { auth: Arc::new(auth) }
    }
}

/// Opens the long-lived store chosen by configuration.
pub fn long_lived_store(config: &Config) -> Result<Arc<dyn KeyValueStore>, redis::RedisError> {
    let store: Arc<dyn KeyValueStore> = match config.storage.backend {
        StorageBackend::Memory => Arc::new(MemoryStore::new()),
        StorageBackend::File => Arc::new(FileStore::new(&config.storage.path)),
        StorageBackend::Redis => {
            let client = redis::Client::open(config.storage.redis_url.as_str())?;
            Arc::new(RedisStore::new(Arc::new(client), &config.storage.key_prefix))
        }
    };
    Ok(store)
}

/// Builds the auth service over the given long-lived store. The short-lived
/// store always lives in memory, so it ends with the process.
pub async fn build_service(long_lived: Arc<dyn KeyValueStore>, config: &Config) -> AuthResult<AuthService> {
    AuthService::init(long_lived, Arc::new(MemoryStore::new()), &config.auth).await
}

pub fn router(state: AppState, config: &ServerConfig) -> Router {
    let admin_routes = Router::new()
        .route("/api/users", get(handlers::list_users))
        .route_layer(from_fn_with_state(state.clone(), middleware::require_admin));

    Router::new()
        .route("/health", get(handlers::health))

        // Auth routes
        .route("/api/auth/login", post(handlers::handle_login))
        .route("/api/auth/register", post(handlers::handle_register))
        .route("/api/auth/logout", post(handlers::handle_logout))
        .route("/api/auth/me", get(handlers::current_user))
        .route("/api/auth/events", get(handlers::auth_events))

        .merge(admin_routes)

        .layer(from_fn_with_state(state.clone(), middleware::require_auth))
        .layer(TraceLayer::new_for_http())

        // Request size limits from config
        .layer(DefaultBodyLimit::disable())
        .layer(RequestBodyLimitLayer::new(config.max_body_size))

        .with_state(state)
}
