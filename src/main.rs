use early_bird_api::config::get_configuration;
use early_bird_api::startup::Application;
use early_bird_api::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = get_subscriber(
        String::from("early_bird_api"),
        String::from("info"),
        std::io::stdout,
    );

    init_subscriber(subscriber);

    let config = get_configuration().expect("Missing configuration file.");
    let application = Application::build(config.clone()).await?;

    tracing::info!(
        "Server listening on {}, public base URL {}",
        config.get_address(),
        config.get_app_base_url()
    );

    application.run_until_stop().await?;

    Ok(())
}
