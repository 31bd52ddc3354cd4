use chrono::{DateTime, Utc};
use uuid::Uuid;

// Append-only audit entry; one list is kept per calendar day. The core
// never removes entries, a reporting job consumes them out of band.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailySignupEntry {
    pub subscriber_id: Uuid,
    pub email: String,
    pub timestamp: DateTime<Utc>,
    pub source: String,
}
