use std::collections::HashMap;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

struct CacheSlot {
    body: String,
    stored_at: Instant,
}

/// Endpoint-keyed cache of raw response bodies. A hit within the TTL is
/// replayed byte for byte without touching the network; entries are
/// only ever replaced wholesale.
pub struct ResponseCache {
    slots: Mutex<HashMap<String, CacheSlot>>,
    ttl: Duration,
}

impl ResponseCache {
    pub fn new(ttl: Duration) -> Self {
        Self {
            slots: Mutex::new(HashMap::new()),
            ttl,
        }
    }

    pub async fn get(&self, endpoint: &str) -> Option<String> {
        let slots = self.slots.lock().await;
        let slot = slots.get(endpoint)?;

        if slot.stored_at.elapsed() < self.ttl {
            Some(slot.body.clone())
        } else {
            None
        }
    }

    pub async fn store(&self, endpoint: &str, body: String) {
        self.slots.lock().await.insert(
            endpoint.to_string(),
            CacheSlot {
                body,
                stored_at: Instant::now(),
            },
        );
    }
}
