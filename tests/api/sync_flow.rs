use secrecy::Secret;
use std::sync::Arc;
use std::time::Duration;

use crate::helpers::TestApp;
use early_bird_api::domain::stats::AggregateStats;
use early_bird_api::sync::{subscribe, RegisterAck, SyncClient, SyncClientConfig, SyncError};

fn sync_client(test_app: &TestApp) -> SyncClient {
    SyncClient::new(SyncClientConfig::new(
        test_app.address.clone(),
        Secret::new(test_app.api_key.clone()),
    ))
}

#[tokio::test]
async fn the_client_round_trips_stats_from_a_live_server() {
    let test_app = TestApp::spawn_app().await;
    let client = sync_client(&test_app);

    let stats = client.get_stats().await.expect("Failed to fetch stats.");

    assert_eq!(stats.total_subscribers, 12_847);
    assert_eq!(stats.target_goal, 15_000);
}

#[tokio::test]
async fn the_client_registers_and_sees_the_duplicate_on_a_second_try() {
    let test_app = TestApp::spawn_app().await;
    let client = sync_client(&test_app);

    let first = client
        .register("crew@example.com", "landing-page", "")
        .await
        .expect("Failed to register.");
    let second = client
        .register("crew@example.com", "landing-page", "")
        .await
        .expect("Failed to register a second time.");

    assert!(matches!(
        first,
        RegisterAck::Registered {
            subscriber_number: 12_848,
            ..
        }
    ));
    assert_eq!(second, RegisterAck::AlreadyRegistered);
}

#[tokio::test]
async fn a_rejected_key_surfaces_as_a_401_server_error() {
    let test_app = TestApp::spawn_app().await;
    let client = SyncClient::new(SyncClientConfig::new(
        test_app.address.clone(),
        Secret::new("not-the-key".to_string()),
    ));

    let error = client.get_stats().await.unwrap_err();

    assert!(matches!(
        error,
        SyncError::ServerError { status: 401, .. }
    ));
}

#[tokio::test]
async fn a_subscription_tracks_a_live_server() {
    let test_app = TestApp::spawn_app().await;
    let client = Arc::new(sync_client(&test_app));

    let mut subscription =
        subscribe::<AggregateStats>(client, "/early-bird/stats", Duration::from_secs(60));

    assert!(subscription.changed().await);

    let snapshot = subscription.snapshot();
    let stats = snapshot.data.expect("The snapshot carried no data.");

    assert!(!snapshot.loading);
    assert_eq!(stats.total_subscribers, 12_847);
    assert!(snapshot.error.is_none());
}
