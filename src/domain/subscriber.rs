use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::new_signup::NewSignup;

// Written once at registration time, never mutated afterwards. The same
// record is stored under both the email key and the id key.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubscriberRecord {
    pub id: Uuid,
    pub email: String,
    pub registered_at: DateTime<Utc>,
    pub source: String,
    pub referrer: String,
    pub ip: String,
    pub user_agent: String,
}

impl SubscriberRecord {
    pub fn create(signup: &NewSignup, ip: String, user_agent: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            email: signup.email.as_ref().to_string(),
            registered_at: Utc::now(),
            source: signup.source.clone(),
            referrer: signup.referrer.clone(),
            ip,
            user_agent,
        }
    }
}
