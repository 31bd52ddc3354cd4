use serde_json::json;
use uuid::Uuid;

use crate::helpers::TestApp;
use early_bird_api::domain::stats::AggregateStats;
use early_bird_api::domain::subscriber::SubscriberRecord;
use early_bird_api::store::{self, keys};

#[tokio::test]
async fn register_returns_200_and_the_welcome_payload_for_a_new_email() {
    let test_app = TestApp::spawn_app().await;
    let body = json!({
        "email": "somchai@studio.co.th",
        "source": "landing-page",
        "referrer": "https://twitter.com"
    });

    let response = test_app.post_register(body).await;

    assert_eq!(200, response.status().as_u16());

    let envelope: serde_json::Value = response.json().await.expect("Failed to parse body.");

    assert_eq!(envelope["success"], true);
    assert_eq!(envelope["data"]["subscriberNumber"], 12_848);
    assert_eq!(
        envelope["data"]["message"],
        "Successfully registered for early access!"
    );
    assert_eq!(envelope["data"]["estimatedLaunch"], "2024-03-15");
    assert_eq!(
        envelope["data"]["benefits"]
            .as_array()
            .expect("benefits is not a list")
            .len(),
        4
    );
    assert_eq!(envelope["statusCode"], 200);
    assert!(envelope["requestId"].is_string());
    assert!(envelope["timestamp"].is_string());
}

#[tokio::test]
async fn register_persists_the_subscriber_under_both_keys() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app
        .post_register(json!({ "email": "crew@example.com" }))
        .await;
    let envelope: serde_json::Value = response.json().await.expect("Failed to parse body.");
    let id: Uuid = serde_json::from_value(envelope["data"]["subscriberId"].clone())
        .expect("subscriberId is not a UUID");

    let by_email: SubscriberRecord = store::get_json(
        test_app.store.as_ref(),
        &keys::user_by_email("crew@example.com"),
    )
    .await
    .expect("Failed to read the store.")
    .expect("No record stored under the email key.");
    let by_id: SubscriberRecord =
        store::get_json(test_app.store.as_ref(), &keys::user_by_id(&id))
            .await
            .expect("Failed to read the store.")
            .expect("No record stored under the id key.");

    assert_eq!(by_email.id, id);
    assert_eq!(by_id.id, id);
    assert_eq!(by_email.email, "crew@example.com");
    // Defaults applied when the body omits them and the request carries
    // no forwarding headers.
    assert_eq!(by_email.source, "landing-page");
    assert_eq!(by_email.referrer, "");
    assert_eq!(by_email.ip, "unknown");
    assert_eq!(by_email.user_agent, "unknown");
}

#[tokio::test]
async fn registering_the_same_email_twice_reports_already_registered() {
    let test_app = TestApp::spawn_app().await;
    let body = json!({ "email": "crew@example.com" });

    test_app.post_register(body.clone()).await;
    let response = test_app.post_register(body).await;

    assert_eq!(200, response.status().as_u16());

    let envelope: serde_json::Value = response.json().await.expect("Failed to parse body.");

    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["error"], "Email already registered");
    assert_eq!(envelope["data"]["alreadyRegistered"], true);
}

#[tokio::test]
async fn email_matching_is_case_insensitive() {
    let test_app = TestApp::spawn_app().await;

    test_app
        .post_register(json!({ "email": "Crew@Example.COM" }))
        .await;
    let response = test_app
        .post_register(json!({ "email": "crew@example.com" }))
        .await;

    let envelope: serde_json::Value = response.json().await.expect("Failed to parse body.");

    assert_eq!(envelope["success"], false);
    assert_eq!(envelope["data"]["alreadyRegistered"], true);
}

#[tokio::test]
async fn duplicate_registrations_do_not_move_the_stats() {
    let test_app = TestApp::spawn_app().await;
    let body = json!({ "email": "crew@example.com" });

    test_app.post_register(body.clone()).await;
    test_app.post_register(body).await;

    let stats: AggregateStats = store::get_json(test_app.store.as_ref(), keys::STATS)
        .await
        .expect("Failed to read the store.")
        .expect("No stats were written.");

    assert_eq!(
        stats.total_subscribers,
        AggregateStats::seed().total_subscribers + 1
    );
    assert_eq!(stats.today_signups, AggregateStats::seed().today_signups + 1);
}

#[tokio::test]
async fn register_returns_400_when_the_email_is_unusable() {
    let test_app = TestApp::spawn_app().await;

    // This is a common practice and it is called table-driven tests. In this case, it simulates different kind of possible request bodies
    // where API should return 400.
    let test_cases = vec![
        (json!({}), "missing email"),
        (json!({ "email": "" }), "empty email"),
        (json!({ "email": "definitely-not-an-email" }), "no at sign"),
        (json!({ "email": "@missing-user.com" }), "missing user part"),
    ];

    for (invalid_body, error_message) in test_cases {
        let response = test_app.post_register(invalid_body).await;

        assert_eq!(
            400,
            response.status().as_u16(),
            "The API did not fail with 400 status when payload was {}",
            error_message
        );

        let envelope: serde_json::Value = response.json().await.expect("Failed to parse body.");

        assert_eq!(envelope["success"], false);
        assert_eq!(envelope["error"], "Valid email is required");
    }
}
