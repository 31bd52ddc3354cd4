use crate::helpers::TestApp;
use early_bird_api::domain::status::{ResourceGauges, SystemStatus, ToolState, ToolStatus};
use early_bird_api::store::{self, keys};

#[tokio::test]
async fn system_status_serves_the_fallback_when_nothing_was_recorded() {
    let test_app = TestApp::spawn_app().await;

    let response = test_app.get_endpoint("/system/status").await;

    assert_eq!(200, response.status().as_u16());

    let envelope: serde_json::Value = response.json().await.expect("Failed to parse body.");

    assert_eq!(envelope["success"], true);
    assert_eq!(envelope["data"]["cpu"], 30);
    assert_eq!(envelope["data"]["memory"], 50);
    assert_eq!(envelope["data"]["version"], "2.4.1");
    assert_eq!(envelope["data"]["uptime"], "99.97%");
    assert_eq!(envelope["data"]["services"]["api"], "healthy");
    assert_eq!(envelope["data"]["services"]["websocket"], "healthy");
}

#[tokio::test]
async fn list_endpoints_serve_empty_lists_when_nothing_was_recorded() {
    let test_app = TestApp::spawn_app().await;
    let endpoints = ["/tools/status", "/workflows/progress", "/ecosystem/nodes"];

    for endpoint in endpoints {
        let response = test_app.get_endpoint(endpoint).await;

        assert_eq!(
            200,
            response.status().as_u16(),
            "{} did not return 200",
            endpoint
        );

        let envelope: serde_json::Value = response.json().await.expect("Failed to parse body.");

        assert_eq!(envelope["success"], true, "{} reported a failure", endpoint);
        assert_eq!(
            envelope["data"],
            serde_json::json!([]),
            "{} did not serve an empty list",
            endpoint
        );
    }
}

#[tokio::test]
async fn a_recorded_system_snapshot_overrides_the_fallback() {
    let test_app = TestApp::spawn_app().await;
    let mut status = SystemStatus::fallback();
    status.cpu = 87;
    status.environment = "production".to_string();

    store::set_json(test_app.store.as_ref(), keys::SYSTEM_STATUS, &status)
        .await
        .expect("Failed to seed the store.");

    let response = test_app.get_endpoint("/system/status").await;
    let envelope: serde_json::Value = response.json().await.expect("Failed to parse body.");

    assert_eq!(envelope["data"]["cpu"], 87);
    assert_eq!(envelope["data"]["environment"], "production");
}

#[tokio::test]
async fn recorded_tool_telemetry_is_served_back() {
    let test_app = TestApp::spawn_app().await;
    let tools = vec![ToolStatus {
        id: "cinestory-ai".to_string(),
        name: "CineStory AI".to_string(),
        status: ToolState::Active,
        version: "2.4.1".to_string(),
        last_used: "Recently".to_string(),
        projects_count: 45,
        health_score: 98,
        performance: 96,
        uptime: "99.8%".to_string(),
        resources: ResourceGauges {
            cpu: 23,
            memory: 41,
            storage: 12,
        },
        capabilities: vec![
            "AI Script Analysis".to_string(),
            "Auto Editing".to_string(),
        ],
        dependencies: vec!["render-farm".to_string()],
    }];

    store::set_json(test_app.store.as_ref(), keys::TOOLS_STATUS, &tools)
        .await
        .expect("Failed to seed the store.");

    let response = test_app.get_endpoint("/tools/status").await;
    let envelope: serde_json::Value = response.json().await.expect("Failed to parse body.");

    assert_eq!(envelope["data"][0]["id"], "cinestory-ai");
    assert_eq!(envelope["data"][0]["status"], "active");
    assert_eq!(envelope["data"][0]["lastUsed"], "Recently");
    assert_eq!(envelope["data"][0]["healthScore"], 98);
    assert_eq!(envelope["data"][0]["resources"]["cpu"], 23);
}
