use serde_json::json;

use crate::helpers::TestApp;
use early_bird_api::domain::stats::AggregateStats;
use early_bird_api::store::{self, keys};

#[tokio::test]
async fn stats_serve_the_seeded_baseline_when_the_store_is_empty() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.get_endpoint("/early-bird/stats").await;

    assert_eq!(200, response.status().as_u16());

    let envelope: serde_json::Value = response.json().await.expect("Failed to parse body.");

    assert_eq!(envelope["success"], true);
    assert_eq!(envelope["data"]["totalSubscribers"], 12_847);
    assert_eq!(envelope["data"]["todaySignups"], 247);
    assert_eq!(envelope["data"]["targetGoal"], 15_000);
    assert_eq!(envelope["data"]["countryStats"]["TH"], 4_521);
    assert_eq!(envelope["data"]["countryStats"]["Others"], 803);
}

#[tokio::test]
async fn stats_reflect_completed_registrations() {
    let test_app = TestApp::spawn_app().await;

    test_app
        .post_register(json!({ "email": "crew@example.com" }))
        .await;

    let response = test_app.get_endpoint("/early-bird/stats").await;
    let envelope: serde_json::Value = response.json().await.expect("Failed to parse body.");

    assert_eq!(envelope["data"]["totalSubscribers"], 12_848);
    assert_eq!(envelope["data"]["todaySignups"], 248);
}

#[tokio::test]
async fn a_stats_document_written_to_the_store_is_served_back() {
    let test_app = TestApp::spawn_app().await;
    let mut stats = AggregateStats::seed();
    stats.total_subscribers = 14_000;
    stats.growth_rate = 19.5;

    store::set_json(test_app.store.as_ref(), keys::STATS, &stats)
        .await
        .expect("Failed to seed the store.");

    let response = test_app.get_endpoint("/early-bird/stats").await;
    let envelope: serde_json::Value = response.json().await.expect("Failed to parse body.");

    assert_eq!(envelope["data"]["totalSubscribers"], 14_000);
    assert_eq!(envelope["data"]["growthRate"], 19.5);
}
