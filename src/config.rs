use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    pub server: ServerConfig,
    pub storage: StorageConfig,
    pub auth: AuthConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub max_body_size: usize,  // bytes
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    Memory,
    File,
    Redis,
}

#[derive(Debug, Deserialize, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    pub path: PathBuf,
    pub redis_url: String,
    pub key_prefix: String,
}

#[derive(Debug, Deserialize, Clone)]
pub struct AuthConfig {
    pub latency_ms: u64,  // simulated round trip for login/register
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 3000,
            max_body_size: 64 * 1024,
        }
    }
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::File,
            path: PathBuf::from("data/local_storage.json"),
            redis_url: "redis://127.0.0.1/".to_string(),
            key_prefix: "booking".to_string(),
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self { latency_ms: 500 }
    }
}

impl AuthConfig {
    pub fn latency(&self) -> Duration {
        Duration::from_millis(self.latency_ms)
    }
}

impl Config {
    pub fn load() -> Result<Self, config::ConfigError> {
        let defaults = Config::default();
        let config = config::Config::builder()
            .set_default("server.host", defaults.server.host)?
            .set_default("server.port", defaults.server.port as i64)?
            .set_default("server.max_body_size", defaults.server.max_body_size as i64)?
            .set_default("storage.backend", "file")?
            .set_default("storage.path", defaults.storage.path.to_string_lossy().into_owned())?
            .set_default("storage.redis_url", defaults.storage.redis_url)?
            .set_default("storage.key_prefix", defaults.storage.key_prefix)?
            .set_default("auth.latency_ms", defaults.auth.latency_ms as i64)?
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(
                config::Environment::with_prefix("APP")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?;

        config.try_deserialize()
    }
}
