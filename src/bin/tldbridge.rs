//! tldbridge CLI
//!
//! Runs the resolution relay, or classifies and resolves a single URL
//! through a relay.

use std::net::SocketAddr;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tokio::signal;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use tldbridge::bridge::{BridgeDecision, ResolutionBridge};
use tldbridge::client::{ResolutionClient, ResolutionOutcome, ResolveMode};
use tldbridge::config::BridgeConfig;
use tldbridge::relay::{RelayServer, ResolverKind};

/// Resolve non-standard TLDs through an HTTP relay
#[derive(Parser)]
#[command(name = "tldbridge")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to a JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(short, long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the resolution relay
    Relay {
        /// Address to listen on
        #[arg(long)]
        listen: Option<SocketAddr>,

        /// Lookup backend (system, hickory)
        #[arg(long)]
        resolver: Option<ResolverKind>,

        /// Upstream nameserver for the hickory backend (repeatable)
        #[arg(long)]
        upstream: Vec<SocketAddr>,
    },

    /// Classify a URL and resolve its host through the relay when needed
    Resolve {
        /// URL to classify
        url: String,

        /// Relay base URL
        #[arg(long)]
        base_url: Option<String>,

        /// Wait without the adaptive timeout
        #[arg(long)]
        sync: bool,
    },

    /// Write the default configuration as JSON
    GenConfig {
        /// Output path for the configuration file
        #[arg(short, long, default_value = "tldbridge.json")]
        output: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(&cli.log_level);

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Relay {
            listen,
            resolver,
            upstream,
        } => run_relay(config, listen, resolver, upstream).await,
        Commands::Resolve {
            url,
            base_url,
            sync,
        } => run_resolve(config, &url, base_url, sync).await,
        Commands::GenConfig { output } => generate_config(&output),
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn load_config(path: Option<&Path>) -> Result<BridgeConfig> {
    match path {
        Some(path) => {
            let config = BridgeConfig::from_json_file(path)
                .with_context(|| format!("Failed to load config from {:?}", path))?;
            info!("Configuration loaded from {:?}", path);
            Ok(config)
        }
        None => Ok(BridgeConfig::default()),
    }
}

async fn run_relay(
    config: BridgeConfig,
    listen: Option<SocketAddr>,
    resolver: Option<ResolverKind>,
    upstream: Vec<SocketAddr>,
) -> Result<()> {
    let mut relay = config.relay;
    if let Some(listen) = listen {
        relay.listen = listen;
    }
    if let Some(resolver) = resolver {
        relay.resolver = resolver;
    }
    if !upstream.is_empty() {
        relay.upstream = upstream;
    }

    info!(
        "Starting relay (resolver: {}, upstreams: {})",
        relay.resolver,
        relay.upstream.len()
    );

    let server = RelayServer::from_config(&relay)
        .await
        .context("Failed to start relay")?;
    let shutdown = server.shutdown_handle();

    let server_handle = tokio::spawn(async move {
        if let Err(e) = server.run().await {
            error!("Relay error: {}", e);
        }
    });

    wait_for_shutdown().await;

    info!("Shutting down relay...");
    shutdown.shutdown();

    let _ = tokio::time::timeout(std::time::Duration::from_secs(5), server_handle).await;

    Ok(())
}

async fn run_resolve(
    config: BridgeConfig,
    url: &str,
    base_url: Option<String>,
    sync: bool,
) -> Result<()> {
    let mut client_config = config.client;
    if let Some(base_url) = base_url {
        client_config.base_url = base_url;
    }

    let client =
        ResolutionClient::from_config(&client_config).context("Invalid relay base URL")?;
    let bridge = ResolutionBridge::new(client);
    let mode = if sync {
        ResolveMode::Synchronous
    } else {
        ResolveMode::Asynchronous
    };

    match bridge.resolve_url(url, mode).await {
        BridgeDecision::Ineligible => {
            anyhow::bail!("Cannot classify {:?}: not a scheme://host URL", url);
        }
        BridgeDecision::Standard(parsed) => {
            println!("{}: standard TLD '{}', use normal DNS", parsed.domain(), parsed.tld());
        }
        BridgeDecision::External { url, outcome } => match outcome {
            Some(ResolutionOutcome::Resolved(addrs)) => {
                println!("{}: {}", url.domain(), addrs.join(", "));
            }
            Some(ResolutionOutcome::NxDomain) => {
                println!("{}: NXDOMAIN", url.domain());
            }
            Some(ResolutionOutcome::Error(e)) => {
                return Err(e).with_context(|| format!("Failed to resolve {}", url.domain()));
            }
            None => {
                println!("{}: not resolved", url.domain());
            }
        },
    }

    Ok(())
}

fn generate_config(output: &Path) -> Result<()> {
    let text = BridgeConfig::default().to_json_string()?;
    std::fs::write(output, text)
        .with_context(|| format!("Failed to write config to {:?}", output))?;

    println!("Configuration written to {:?}", output);
    Ok(())
}

async fn wait_for_shutdown() {
    if let Err(e) = signal::ctrl_c().await {
        error!("Failed to listen for Ctrl-C: {}", e);
    }
}
