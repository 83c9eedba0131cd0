mod auth_service;
mod directory;
mod redis_service;
mod session_storage;
mod state_bus;
mod store;
pub mod token;

pub use auth_service::{AuthService, MIN_NAME_LEN, MIN_PASSWORD_LEN};
pub use directory::{UserDirectory, SEED_ACCOUNTS};
pub use redis_service::RedisStore;
pub use session_storage::{Persistence, SessionStorage};
pub use state_bus::{AuthState, StateBus, Subscription};
pub use store::{FileStore, KeyValueStore, MemoryStore, SESSION_KEY, USERS_KEY};
