//! SingleNet Robot - command line client
//!
//! Fetches the current router password or pushes a new one, using the
//! endpoints from `config/default` or `SINGLENET__*` environment variables.

use std::sync::Arc;
use std::time::Duration;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use singlenet_robot::config::{Config, FormEncoding};
use singlenet_robot::{
    AppError, ChannelConsumer, ReqwestTransport, Retriever, RetrieverMessage, RetrieverOptions,
};

#[derive(Parser)]
#[command(name = "singlenet-robot", about = "Router password client")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch the router password and print it
    Get {
        /// Overrides router.password_url
        #[arg(long)]
        url: Option<String>,
        /// How long to wait for a result
        #[arg(long, default_value_t = 30)]
        wait_secs: u64,
    },
    /// Send a new router password
    Set {
        #[arg(long)]
        password: String,
        #[arg(long)]
        secret: String,
        /// Overrides router.set_url
        #[arg(long)]
        url: Option<String>,
        /// Overrides retriever.form_encoding
        #[arg(long, value_parser = ["legacy", "standard"])]
        form_encoding: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "singlenet_robot=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load().map_err(AppError::from)?;
    tracing::debug!("Configuration loaded");

    let transport = Arc::new(ReqwestTransport::new(&config.transport).map_err(AppError::from)?);
    let mut options = RetrieverOptions::from(&config.retriever);

    match cli.command {
        Command::Get { url, wait_secs } => {
            let url = url
                .or(config.router.password_url)
                .ok_or(AppError::MissingUrl("router.password_url"))?;

            let (consumer, mut rx) = ChannelConsumer::new();
            let retriever = Retriever::new(transport, Arc::new(consumer), options);
            let handle = retriever.get_router_password(url);

            // A miss or a failed request never reports back; give up after the wait.
            match tokio::time::timeout(Duration::from_secs(wait_secs), handle).await {
                Ok(Ok(())) => {}
                Ok(Err(e)) => tracing::error!("Retrieval task failed: {}", e),
                Err(_) => tracing::warn!("No result after {}s", wait_secs),
            }

            match rx.try_recv() {
                Ok(message) => println!("[{}] {}", message.kind().tag(), message.payload()),
                Err(_) => tracing::info!("No router password delivered"),
            }
        }
        Command::Set {
            password,
            secret,
            url,
            form_encoding,
        } => {
            let url = url
                .or(config.router.set_url)
                .ok_or(AppError::MissingUrl("router.set_url"))?;
            if let Some(encoding) = form_encoding {
                options.form_encoding = FormEncoding::from_str(&encoding);
            }

            tracing::info!("Using {} form encoding", options.form_encoding.as_str());

            let retriever = Retriever::new(transport, Arc::new(|_: RetrieverMessage| {}), options);
            retriever.set_router_password(url, &password, &secret).await?;
        }
    }

    Ok(())
}
