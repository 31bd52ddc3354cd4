use crate::helpers::TestApp;

#[tokio::test]
async fn health_check_works_without_credentials() {
    let test_app = TestApp::spawn_app().await;
    let client = reqwest::Client::new();
    let url = format!("{}/health_check", test_app.address);
    let response = client
        .get(url)
        .send()
        .await
        .expect("Failed to execute request.");

    assert!(response.status().is_success());

    let body: serde_json::Value = response.json().await.expect("Failed to parse body.");

    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "CineStory Early Bird API");
    assert!(body["timestamp"].is_string());
}
