use meow_memory_lane::config::get_configuration;
use meow_memory_lane::startup::Application;
use meow_memory_lane::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber(String::from("meow_memory_lane"), String::from("debug"));

    init_subscriber(subscriber);

    let config = get_configuration().expect("Missing configuration file.");
    let application = Application::build(config.clone())
        .await
        .expect("Failed to build application.");

    tracing::info!("Server listening on {}", config.get_address());

    application.run_until_stop().await
}
