//! `PanditAI` - cached predictions and conversational readings

mod cli;
mod config;
mod conversation;
mod dispatcher;
mod prediction;
mod responder;
mod runtime;
mod store;

use clap::Parser;
use cli::CliArgs;
use config::AppConfig;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, Layer};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = CliArgs::parse();
    let config = args.apply(AppConfig::from_env());

    // Initialize logging
    let fmt_layer = if config.log_json {
        tracing_subscriber::fmt::layer()
            .json()
            .with_current_span(false)
            .with_span_list(false)
            .with_writer(std::io::stderr)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .boxed()
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "panditai=warn".into()),
        )
        .with(fmt_layer)
        .init();

    tracing::debug!(
        responder = %config.responder.chat_url(),
        timeout_secs = config.responder.timeout.as_secs(),
        store = %config.store_path.display(),
        "Configuration resolved"
    );

    cli::run(args.command, &config).await
}
