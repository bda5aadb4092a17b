//! bootmeta - fetch cloud instance metadata at boot
//!
//! Prints the translated metadata (attributes, hostname, SSH keys and
//! network model) as JSON on stdout.

use anyhow::Context;
use clap::Parser;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

use bootmeta::cmdline::{self, CMDLINE_PATH};
use bootmeta::config::{self, DEFAULT_CONFIG_PATH};
use bootmeta::providers::{Provider, packet::Packet};
use bootmeta::MetadataError;

#[derive(Parser)]
#[command(name = "bootmeta")]
#[command(author, version, about = "Fetch cloud instance metadata at boot", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// The name of the cloud provider
    #[arg(long, env = "BOOTMETA_PROVIDER")]
    provider: Option<String>,

    /// Read the cloud provider from the kernel command line
    #[arg(long)]
    cmdline: bool,

    /// Override the metadata service base URL
    #[arg(long, env = "BOOTMETA_URL")]
    url: Option<String>,

    /// Configuration file
    #[arg(long, env = "BOOTMETA_CONFIG", default_value = DEFAULT_CONFIG_PATH)]
    config: String,
}

fn init_logging(verbosity: u8) -> anyhow::Result<()> {
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };

    let subscriber = FmtSubscriber::builder()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .compact()
        .finish();

    tracing::subscriber::set_global_default(subscriber)
        .context("failed to set tracing subscriber")
}

async fn provider_name(cli: &Cli) -> anyhow::Result<String> {
    if let Some(name) = &cli.provider {
        return Ok(name.clone());
    }

    if cli.cmdline {
        let oem = cmdline::read_oem_id(CMDLINE_PATH)
            .await
            .context("could not read cmdline")?;
        return Ok(oem.unwrap_or_default());
    }

    Ok(String::new())
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose)?;

    let mut config = config::load_config(&cli.config).await?;
    if let Some(url) = &cli.url {
        config.packet.base_url = url.clone();
    }

    let name = provider_name(&cli).await?;
    let provider: Box<dyn Provider> = match name.as_str() {
        "packet" => Box::new(Packet::new(&config)?),
        other => return Err(MetadataError::UnsupportedProvider(other.to_string()).into()),
    };

    info!("Fetching metadata from provider: {}", provider.name());
    let metadata = provider
        .fetch_metadata()
        .await
        .context("failed to fetch metadata")?;

    println!("{}", serde_json::to_string_pretty(&metadata)?);
    Ok(())
}
