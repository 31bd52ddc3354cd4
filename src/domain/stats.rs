use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AggregateStats {
    pub total_subscribers: u64,
    pub today_signups: u64,
    pub last_updated: DateTime<Utc>,
    pub country_stats: BTreeMap<String, u64>,
    pub growth_rate: f64,
    pub target_goal: u64,
}

impl AggregateStats {
    // Marketing-approved launch baseline, served until the first real
    // signup lands in the store.
    pub fn seed() -> Self {
        let mut country_stats = BTreeMap::new();
        country_stats.insert("TH".to_string(), 4521);
        country_stats.insert("US".to_string(), 3204);
        country_stats.insert("SG".to_string(), 1876);
        country_stats.insert("JP".to_string(), 1456);
        country_stats.insert("UK".to_string(), 987);
        country_stats.insert("Others".to_string(), 803);

        Self {
            total_subscribers: 12_847,
            today_signups: 247,
            last_updated: Utc::now(),
            country_stats,
            growth_rate: 12.5,
            target_goal: 15_000,
        }
    }

    pub fn record_signup(&mut self, country: &str, at: DateTime<Utc>) {
        self.total_subscribers += 1;
        self.today_signups += 1;
        self.last_updated = at;
        *self.country_stats.entry(country.to_string()).or_insert(0) += 1;
    }
}
