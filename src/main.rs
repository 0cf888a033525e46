//! advocacy-cms: serve the public site and dashboard, or work on the
//! content from the command line.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use tracing::info;

use advocacy_cms::config::{Config, StoreKind};
use advocacy_cms::editor::{ContentDraft, EditSpec, SaveStatus};
use advocacy_cms::server::{self, AppState};
use advocacy_cms::{load_content, logging, store};

#[derive(Parser)]
#[command(name = "advocacy-cms")]
#[command(about = "Public site and content dashboard for inclusive advocacy")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, env = "ADVOCACY_CONFIG", default_value = "advocacy-cms.toml")]
    config: PathBuf,

    /// Listen address (overrides config file)
    #[arg(long, env = "ADVOCACY_LISTEN")]
    listen: Option<SocketAddr>,

    /// REST content store URL; selects the REST backend
    #[arg(long, env = "ADVOCACY_STORE_URL")]
    store_url: Option<String>,

    /// REST content store API key
    #[arg(long, env = "ADVOCACY_STORE_KEY", hide_env_values = true)]
    store_key: Option<String>,

    /// Seed file for the in-memory store
    #[arg(long, env = "ADVOCACY_SEED")]
    seed: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Run the HTTP server (default)
    Serve,
    /// Load the content once and print it as JSON
    Dump,
    /// Edit fields and save every touched collection
    Edit {
        /// Field edit, e.g. `stats_cards/<id>/value=15.2k`
        #[arg(long = "set", required = true, value_name = "COLLECTION/ID/FIELD=VALUE")]
        set: Vec<EditSpec>,
    },
}

impl Cli {
    fn apply_overrides(&self, config: &mut Config) {
        if let Some(listen) = self.listen {
            config.server.listen = listen;
        }
        if let Some(ref url) = self.store_url {
            config.store.kind = StoreKind::Rest;
            config.store.base_url = Some(url.clone());
        }
        if let Some(ref key) = self.store_key {
            config.store.api_key = Some(key.clone());
        }
        if let Some(ref seed) = self.seed {
            config.store.seed_path = Some(seed.clone());
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(&cli.config)?;
    cli.apply_overrides(&mut config);
    config.validate()?;

    logging::init(&config.logging);

    if !cli.config.exists() {
        info!(path = %cli.config.display(), "Config file not found, using defaults");
    }
    info!(store = ?config.store.kind, "Opening content store");

    let store = store::open(&config.store)
        .await
        .context("failed to open content store")?;

    match cli.command.unwrap_or(Command::Serve) {
        Command::Serve => {
            let state = Arc::new(AppState { store });
            let app = server::create_router(state, &config.server.static_dir);
            server::run(config.server.listen, app).await?;
        }
        Command::Dump => {
            let content = load_content(store.as_ref()).await?;
            println!("{}", serde_json::to_string_pretty(&content)?);
        }
        Command::Edit { set } => {
            let content = load_content(store.as_ref()).await?;
            if content.is_degraded() {
                anyhow::bail!("refusing to edit: some sections could not be loaded");
            }

            let mut draft = ContentDraft::from(content);
            for spec in set {
                draft.apply(spec)?;
            }

            let reports = draft.save_touched(store.as_ref()).await?;
            let mut failed = false;
            for report in &reports {
                let n = &report.notification;
                match &n.description {
                    Some(d) => println!("{}: {}", n.title, d),
                    None => println!("{}", n.title),
                }
                failed |= report.status != SaveStatus::Success;
            }

            if failed {
                std::process::exit(1);
            }
        }
    }

    Ok(())
}
