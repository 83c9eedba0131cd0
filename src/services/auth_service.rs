use std::sync::Arc;
use std::time::Duration;
use chrono::Utc;
use tokio::sync::Mutex;
use tokio::time::sleep;
use crate::config::AuthConfig;
use crate::errors::{AuthError, AuthResult};
use crate::models::{AuthResponse, AuthUser, Role, UserRecord};
use super::directory::{next_id, timestamp_now, UserDirectory};
use super::session_storage::{Persistence, SessionStorage};
use super::state_bus::{StateBus, Subscription};
use super::store::KeyValueStore;
use super::token;

pub const MIN_NAME_LEN: usize = 3;
pub const MIN_PASSWORD_LEN: usize = 6;

/// Session and authentication state for one client context.
///
/// This is a local simulation, not a hardened auth system: passwords are kept
/// and compared in plaintext and tokens are an unsigned, reversible encoding
/// (see [`token`]).
pub struct AuthService {
    directory: UserDirectory,
    sessions: SessionStorage,
    bus: StateBus,
    // held across a session write and its publish, so the stores and the bus agree
    session_writer: Mutex<()>,
    latency: Duration,
}

impl AuthService {
    /// Seeds the directory in the long-lived store and restores whatever
    /// session was persisted last.
    pub async fn init(
        long_lived: Arc<dyn KeyValueStore>,
        short_lived: Arc<dyn KeyValueStore>,
        config: &AuthConfig,
    ) -> AuthResult<Self> {
        let directory = UserDirectory::new(long_lived.clone());
        directory.ensure_seeded().await?;

        let sessions = SessionStorage::new(long_lived, short_lived);
        let restored = sessions.load().await?;
        if let Some(user) = &restored {
            tracing::info!("Restored session for {}", user.email);
        }

        Ok(Self {
            directory,
            sessions,
            bus: StateBus::new(restored),
            session_writer: Mutex::new(()),
            latency: config.latency(),
        })
    }

    async fn simulate_latency(&self) {
        if !self.latency.is_zero() {
            sleep(self.latency).await;
        }
    }

    pub async fn login(&self, email: &str, password: &str, remember: bool) -> AuthResult<AuthResponse> {
        self.simulate_latency().await;

        let record = match self.directory.find(email).await? {
            Some(record) if record.password == password => record,
            _ => {
                tracing::warn!("Failed login attempt for {}", email);
                return Err(AuthError::InvalidCredentials);
            }
        };

        let user = record.public_view();
        {
            let _writer = self.session_writer.lock().await;
            self.sessions.persist(&user, Persistence::from_remember(remember)).await?;
            self.bus.publish(Some(user.clone()));
        }
        tracing::info!("User {} logged in (remember: {})", user.email, remember);

        Ok(AuthResponse {
            message: "Login successful".to_string(),
            token: token::issue(user.id, &user.email, Utc::now().timestamp_millis()),
            user,
        })
    }

    /// Adds a user to the directory. Does not sign the new user in.
    ///
    /// Checks run in a fixed order and the first failure wins: email taken,
    /// terms not accepted, name too short, password too short.
    pub async fn register(
        &self,
        name: &str,
        email: &str,
        password: &str,
        terms_accepted: bool,
    ) -> AuthResult<AuthResponse> {
        self.simulate_latency().await;

        let record = self
            .directory
            .update(|records| {
                if records.iter().any(|u| u.email == email) {
                    return Err(AuthError::EmailTaken);
                }
                if !terms_accepted {
                    return Err(AuthError::TermsNotAccepted);
                }
                if name.chars().count() < MIN_NAME_LEN {
                    return Err(AuthError::NameTooShort);
                }
                if password.chars().count() < MIN_PASSWORD_LEN {
                    return Err(AuthError::PasswordTooShort);
                }

                let record = UserRecord {
                    id: next_id(records),
                    name: name.to_string(),
                    email: email.to_string(),
                    password: password.to_string(),
                    role: Some(Role::User),
                    created_at: timestamp_now(),
                };
                records.push(record.clone());
                Ok(record)
            })
            .await
            .inspect_err(|e| tracing::debug!("Registration for {} rejected: {}", email, e))?;

        tracing::info!("Registered user {} with id {}", record.email, record.id);
        let user = record.public_view();
        Ok(AuthResponse {
            message: "Registration successful".to_string(),
            token: token::issue(user.id, &user.email, Utc::now().timestamp_millis()),
            user,
        })
    }

    pub async fn logout(&self) -> AuthResult<()> {
        {
            let _writer = self.session_writer.lock().await;
            self.sessions.clear().await?;
            self.bus.publish(None);
        }
        tracing::info!("Logged out");
        Ok(())
    }

    pub async fn current_user(&self) -> AuthResult<Option<AuthUser>> {
        Ok(self.sessions.load().await?)
    }

    pub async fn is_authenticated(&self) -> AuthResult<bool> {
        Ok(self.current_user().await?.is_some())
    }

    /// Admin role, or the seed admin email even when the role is missing.
    pub async fn is_admin(&self) -> AuthResult<bool> {
        Ok(self.current_user().await?.is_some_and(|u| u.is_admin()))
    }

    pub async fn list_users(&self) -> AuthResult<Vec<AuthUser>> {
        let records = self.directory.list().await?;
        Ok(records.iter().map(UserRecord::public_view).collect())
    }

    /// Stream of authentication state, starting with the current one.
    pub fn subscribe(&self) -> Subscription {
        self.bus.subscribe()
    }
}
