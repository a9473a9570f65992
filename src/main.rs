//! CLI entry point for sitepress

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use sitepress::commands::watch::FailurePolicy;
use sitepress::Site;

#[derive(Parser)]
#[command(name = "sitepress")]
#[command(version)]
#[command(about = "A small static site generator", long_about = None)]
struct Cli {
    /// Config file to load (defaults to ./config.yml)
    #[arg(short, long, global = true)]
    config_file: Option<PathBuf>,

    /// Enable debug output
    #[arg(short, long, global = true)]
    debug: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the site once
    Build,

    /// Build, then rebuild whenever content changes
    Watch {
        /// Stop at the first failed rebuild
        #[arg(long)]
        fail_fast: bool,
    },

    /// Create a new post
    New {
        /// Title of the new post
        #[arg(short, long)]
        title: String,
    },
}

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.debug {
        "sitepress=debug,info"
    } else {
        "sitepress=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Err(e) = run(cli).await {
        tracing::error!("{:#}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let site = Site::new(cli.config_file.as_deref())?;

    match cli.command {
        Commands::Build => {
            tracing::info!("Building site into {:?}", site.config.out_dir);
            site.build()?;
            tracing::info!("Build complete");
        }

        Commands::Watch { fail_fast } => {
            let policy = if fail_fast {
                FailurePolicy::FailFast
            } else {
                FailurePolicy::KeepGoing
            };
            site.watch(policy).await?;
        }

        Commands::New { title } => {
            let path = site.new_post(&title)?;
            println!("Created: {:?}", path);
        }
    }

    Ok(())
}
