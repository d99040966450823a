//! CLI entry point for vitrine

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use vitrine::content::ContentStore;
use vitrine::server::{self, AppState};
use vitrine::submission::{HttpProvider, PROVIDER_KEY_ENV};
use vitrine::templates::TemplateRenderer;
use vitrine::Site;

#[derive(Parser)]
#[command(name = "vitrine")]
#[command(about = "Marketing site server for a small digital agency", long_about = None)]
struct Cli {
    /// Set the base directory (defaults to current directory)
    #[arg(short, long, global = true)]
    cwd: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the site server
    #[command(alias = "s")]
    Serve {
        /// Port to listen on (overrides site.yml)
        #[arg(short, long)]
        port: Option<u16>,

        /// IP address to bind to (overrides site.yml)
        #[arg(short, long)]
        address: Option<String>,
    },

    /// Validate every post in the content store
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "vitrine=debug,info"
    } else {
        "vitrine=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let base_dir = match cli.cwd {
        Some(dir) => dir,
        None => std::env::current_dir()?,
    };

    let site = Site::new(&base_dir)?;

    match cli.command {
        Commands::Serve { port, address } => {
            let mut config = site.config.clone();
            if let Some(port) = port {
                config.server.port = port;
            }
            if let Some(address) = address {
                config.server.address = address;
            }

            let api_key = std::env::var(PROVIDER_KEY_ENV).unwrap_or_else(|_| {
                tracing::warn!("{PROVIDER_KEY_ENV} is not set; form submissions will fail");
                String::new()
            });
            let provider = HttpProvider::new(&config.outreach.provider_url, api_key)?;

            let state = AppState {
                assets_dir: site.assets_dir.clone(),
                store: ContentStore::new(&site.content_dir),
                templates: TemplateRenderer::new()?,
                provider: Arc::new(provider),
                config,
            };

            server::start(state).await?;
        }

        Commands::Check => {
            check(&site).await?;
        }
    }

    Ok(())
}

/// Walk the content store and report per-file problems
async fn check(site: &Site) -> Result<()> {
    let store = ContentStore::new(&site.content_dir);
    let slugs = store.slugs().await?;

    if slugs.is_empty() {
        println!("no posts found in {}", site.content_dir.display());
        return Ok(());
    }

    let mut failed = 0;
    for slug in slugs {
        match store.load(&slug).await {
            Ok(detail) => println!("ok    {slug} ({})", detail.summary.date),
            Err(e) => {
                failed += 1;
                println!("FAIL  {slug}: {e}");
            }
        }
    }

    if failed > 0 {
        anyhow::bail!("{failed} post(s) failed validation");
    }

    println!("all posts valid");
    Ok(())
}
