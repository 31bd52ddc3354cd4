use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::Serialize;

pub mod keys;
pub mod memory;
pub mod redis;

pub use self::memory::InMemoryStore;
pub use self::redis::RedisStore;

#[derive(thiserror::Error, Debug)]
pub enum StoreError {
    #[error("The key-value store is unreachable: {0}")]
    Unavailable(String),
    #[error("The value stored under '{key}' could not be decoded")]
    Corrupted {
        key: String,
        #[source]
        source: serde_json::Error,
    },
}

/// Flat key-value persistence consumed as a black box. Values travel as
/// JSON documents; backends are not expected to interpret them.
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError>;
    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StoreError>;
}

pub async fn get_json<T: DeserializeOwned>(
    store: &dyn KvStore,
    key: &str,
) -> Result<Option<T>, StoreError> {
    match store.get(key).await? {
        Some(value) => {
            let decoded = serde_json::from_value(value).map_err(|source| StoreError::Corrupted {
                key: key.to_string(),
                source,
            })?;

            Ok(Some(decoded))
        }
        None => Ok(None),
    }
}

pub async fn set_json<T: Serialize>(
    store: &dyn KvStore,
    key: &str,
    value: &T,
) -> Result<(), StoreError> {
    let encoded = serde_json::to_value(value).map_err(|source| StoreError::Corrupted {
        key: key.to_string(),
        source,
    })?;

    store.set(key, encoded).await
}
