use async_trait::async_trait;

use crate::store::{KvStore, StoreError};

pub struct RedisStore {
    client: redis::Client,
}

impl RedisStore {
    pub fn new(connection_string: &str) -> Result<Self, redis::RedisError> {
        let client = redis::Client::open(connection_string)?;

        Ok(Self { client })
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> Result<Option<serde_json::Value>, StoreError> {
        let mut redis_conn = self
            .client
            .get_tokio_connection()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;

        let raw: Option<String> = redis::cmd("GET")
            .arg(key)
            .query_async(&mut redis_conn)
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;

        match raw {
            Some(raw) => {
                let value =
                    serde_json::from_str(&raw).map_err(|source| StoreError::Corrupted {
                        key: key.to_string(),
                        source,
                    })?;

                Ok(Some(value))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, key: &str, value: serde_json::Value) -> Result<(), StoreError> {
        let mut redis_conn = self
            .client
            .get_tokio_connection()
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))?;

        redis::cmd("SET")
            .arg(key)
            .arg(value.to_string())
            .query_async::<_, ()>(&mut redis_conn)
            .await
            .map_err(|err| StoreError::Unavailable(err.to_string()))
    }
}
