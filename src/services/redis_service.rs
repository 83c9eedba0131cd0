use async_trait::async_trait;
use redis::{Client, AsyncCommands};
use std::sync::Arc;
use crate::errors::StoreResult;
use super::store::KeyValueStore;

/// Long-lived store backed by Redis. Keys are namespaced as `<prefix>:<key>`.
pub struct RedisStore {
    client: Arc<Client>,
    prefix: String,
}

impl RedisStore {
    pub fn new(client: Arc<Client>, prefix: impl Into<String>) -> Self {
        Self {
            client,
            prefix: prefix.into(),
        }
    }

    fn key(&self, key: &str) -> String {
        format!("{}:{}", self.prefix, key)
    }
}

#[async_trait]
impl KeyValueStore for RedisStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        let mut conn = self.client.get_async_connection().await?;
        let value: Option<String> = conn.get(self.key(key)).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: String) -> StoreResult<()> {
        let mut conn = self.client.get_async_connection().await?;
        conn.set::<_, _, ()>(self.key(key), value).await?;
        Ok(())
    }

    async fn remove(&self, key: &str) -> StoreResult<()> {
        let mut conn = self.client.get_async_connection().await?;
        conn.del::<_, ()>(self.key(key)).await?;
        Ok(())
    }
}

impl Clone for RedisStore {
    fn clone(&self) -> Self {
        Self {
            client: self.client.clone(),
            prefix: self.prefix.clone(),
        }
    }
}
