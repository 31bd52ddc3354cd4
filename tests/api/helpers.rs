use reqwest::Response;
use secrecy::ExposeSecret;
use std::sync::Arc;

use early_bird_api::{
    config::{get_configuration, StoreBackend},
    startup::Application,
    store::KvStore,
};

pub struct TestApp {
    pub address: String,
    pub api_key: String,
    pub store: Arc<dyn KvStore>,
}

impl TestApp {
    pub async fn spawn_app() -> TestApp {
        let mut config = get_configuration().expect("Missing configuration file.");

        // We are using port 0 as way to define a different port per each test. Port 0 is a special case that operating systems
        // take into account: when port is 0, the OS will search for the first available port
        config.set_app_port(0);
        // Every test talks to its own private in-memory store.
        config.set_store_backend(StoreBackend::Memory);

        let application = Application::build(config.clone())
            .await
            .expect("Failed to build application.");

        let address = format!("http://127.0.0.1:{}", application.get_port());
        let store = application.get_store();
        let api_key = config.get_api_key().expose_secret().clone();

        tokio::spawn(application.run_until_stop());

        TestApp {
            address,
            api_key,
            store,
        }
    }

    pub async fn post_register(&self, body: serde_json::Value) -> Response {
        let client = reqwest::Client::new();
        let url = format!("{}/early-bird/register", self.address);

        let response = client
            .post(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .json(&body)
            .send()
            .await
            .expect("Failed to execute request.");

        response
    }

    pub async fn get_endpoint(&self, endpoint: &str) -> Response {
        let client = reqwest::Client::new();
        let url = format!("{}{}", self.address, endpoint);

        let response = client
            .get(&url)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .send()
            .await
            .expect("Failed to execute request.");

        response
    }
}
