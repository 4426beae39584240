use anyhow::{Context, Result};
use dotenvy::dotenv;
use envconfig::Envconfig;
use salesap_domain::telemetry::{get_subscriber, init_subscriber};
use salesap_webhook::{domain::config::WebhookConfig, server::Server};
use tracing::info;

fn main() -> Result<()> {
    dotenv().ok();

    let subscriber = get_subscriber("salesap-webhook", "info", std::io::stdout);
    init_subscriber(subscriber)?;

    let config = WebhookConfig::init_from_env().context("Could not load config")?;

    info!("Starting SalesAp webhook with config:\n{config}");

    let worker_threads = config.runtime_worker_threads()?;

    tokio::runtime::Builder::new_multi_thread()
        .worker_threads(worker_threads)
        .enable_all()
        .build()?
        .block_on(async move {
            let server = Server::init(config)?;

            server.run().await
        })
}
