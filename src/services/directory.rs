use std::sync::Arc;
use chrono::{SecondsFormat, Utc};
use tokio::sync::Mutex;
use crate::errors::{AuthResult, StoreResult};
use crate::models::{Role, UserRecord, ADMIN_EMAIL, USER_EMAIL};
use super::store::{KeyValueStore, USERS_KEY};

/// Accounts present after every initialization: (name, email, password, role).
pub const SEED_ACCOUNTS: [(&str, &str, &str, Role); 2] = [
    ("Admin", ADMIN_EMAIL, "admin123", Role::Admin),
    ("User", USER_EMAIL, "user123", Role::User),
];

pub fn timestamp_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// The user directory, stored as one JSON array under `users`.
///
/// Every read-modify-write goes through `update`, which holds a single writer
/// lock for the whole cycle, so interleaved registrations cannot lose records.
pub struct UserDirectory {
    store: Arc<dyn KeyValueStore>,
    writer: Mutex<()>,
}

impl UserDirectory {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            writer: Mutex::new(()),
        }
    }

    async fn read(&self) -> StoreResult<Option<Vec<UserRecord>>> {
        match self.store.get(USERS_KEY).await? {
            Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
            None => Ok(None),
        }
    }

    async fn write(&self, records: &[UserRecord]) -> StoreResult<()> {
        self.store.set(USERS_KEY, serde_json::to_string(records)?).await
    }

    /// All records in insertion order.
    pub async fn list(&self) -> StoreResult<Vec<UserRecord>> {
        Ok(self.read().await?.unwrap_or_default())
    }

    pub async fn find(&self, email: &str) -> StoreResult<Option<UserRecord>> {
        Ok(self.list().await?.into_iter().find(|u| u.email == email))
    }

    /// Runs `f` over the full directory under the writer lock. The directory
    /// is written back only when `f` succeeds.
    pub async fn update<T, F>(&self, f: F) -> AuthResult<T>
    where
        F: FnOnce(&mut Vec<UserRecord>) -> AuthResult<T>,
    {
        let _guard = self.writer.lock().await;
        let mut records = self.read().await?.unwrap_or_default();
        let out = f(&mut records)?;
        self.write(&records).await?;
        Ok(out)
    }

    /// Creates the directory if missing and adds each seed account that is
    /// not already present. Safe to call any number of times.
    pub async fn ensure_seeded(&self) -> AuthResult<()> {
        let added = self
            .update(|records| {
                let mut added = 0;
                for (name, email, password, role) in SEED_ACCOUNTS {
                    if records.iter().any(|u| u.email == email) {
                        continue;
                    }
                    let id = next_id(records);
                    records.push(UserRecord {
                        id,
                        name: name.to_string(),
                        email: email.to_string(),
                        password: password.to_string(),
                        role: Some(role),
                        created_at: timestamp_now(),
                    });
                    added += 1;
                }
                Ok(added)
            })
            .await?;
        if added > 0 {
            tracing::info!("Seeded {} default account(s)", added);
        }
        Ok(())
    }
}

/// Next identifier: one past the highest assigned. Records are never removed,
/// so this matches `len + 1` for any directory this crate wrote.
pub fn next_id(records: &[UserRecord]) -> u64 {
    records.iter().map(|u| u.id).max().unwrap_or(0) + 1
}
