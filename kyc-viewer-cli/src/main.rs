//! Kinto KYC Viewer CLI
//!
//! Looks up the wallet status and KYC profile of an address from the command line.

mod report;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use kyc_viewer::{parse_address, KycViewerService, LookupOutcome, RegistryClient, RegistryConfig};

#[derive(Parser)]
#[command(name = "kyc-viewer")]
#[command(about = "Kinto wallet KYC and compliance lookups")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON-RPC endpoint, overrides KINTO_RPC_URL
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Deployment manifest with the registry addresses and ABIs
    #[arg(long, global = true)]
    contracts: Option<PathBuf>,

    /// Print results as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the KYC profile of a wallet
    Lookup {
        /// Wallet address
        address: String,
    },

    /// Check whether an address is a Kinto wallet
    Wallet {
        /// Wallet address
        address: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    // Initialize logging; stdout is reserved for results
    let default_filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = load_config(&cli)?;
    let client = RegistryClient::shared(&config)
        .await
        .context("Failed to create registry client")?;
    let service = KycViewerService::from_registry(&client);

    match &cli.command {
        Commands::Lookup { address } => run_lookup(&service, address, cli.json).await,
        Commands::Wallet { address } => run_wallet(&service, address, cli.json).await,
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<RegistryConfig> {
    let mut config = RegistryConfig::from_env().context("Invalid environment configuration")?;

    if let Some(path) = &cli.contracts {
        let manifest = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        config = config
            .with_contracts_json(&manifest)
            .with_context(|| format!("Invalid contracts manifest {}", path.display()))?;
    }

    if let Some(url) = &cli.rpc_url {
        config.network.rpc_url = url.clone();
    }

    debug!("Using configuration {:?}", config);
    Ok(config)
}

async fn run_lookup(
    service: &KycViewerService,
    address: &str,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let address = parse_address(address)?;
    info!("Looking up {:?}", address);

    let outcome = service.fetch(address).await;
    let rendered = if json {
        serde_json::to_string_pretty(&report::outcome_json(&address, &outcome))?
    } else {
        report::outcome_text(&address, &outcome)
    };
    println!("{}", rendered);

    Ok(match outcome {
        LookupOutcome::Failed(_) => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}

async fn run_wallet(
    service: &KycViewerService,
    address: &str,
    json: bool,
) -> anyhow::Result<ExitCode> {
    let address = parse_address(address)?;
    let timestamp = service
        .wallet_timestamp(address)
        .await
        .with_context(|| format!("Wallet check for {:?} failed", address))?;

    let rendered = if json {
        serde_json::to_string_pretty(&report::wallet_json(&address, timestamp))?
    } else {
        report::wallet_text(&address, timestamp)
    };
    println!("{}", rendered);

    Ok(ExitCode::SUCCESS)
}
