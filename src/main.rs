use anyhow::Context;
use booking_auth::{
    app::{self, AppState},
    config::Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize basic tracing subscriber
    tracing_subscriber::fmt::init();

    // Load configuration
    let config = Config::load().context("Failed to load configuration")?;
    tracing::info!("Using {:?} storage backend", config.storage.backend);

    let long_lived = app::long_lived_store(&config).context("Failed to open storage backend")?;
    let auth = app::build_service(long_lived, &config)
        .await
        .context("Failed to initialize auth service")?;

    let app = app::router(AppState::new(auth), &config.server);

    let listener = tokio::net::TcpListener::bind(
        format!("{}:{}", config.server.host, config.server.port)
    )
    .await
    .context("Failed to bind server")?;
    tracing::info!("Server running on {}", listener.local_addr()?);

    axum::serve(listener, app.into_make_service())
        .await
        .context("Server error")?;
    Ok(())
}
