use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::Mutex;

use crate::store::{KvStore, StoreError};

/// Process-local backend used in development and in the test suite.
/// Every instance owns its own map, so parallel tests never share state.
#[derive(Default)]
pub struct InMemoryStore {
    values: Mutex<HashMap<String, serde_json::Value>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        Ok(self.values.lock().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StoreError> {
        self.values.lock().await.insert(key.to_string(), value);

        Ok(())
    }
}
