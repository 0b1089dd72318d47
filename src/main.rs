mod api;
mod config;
mod menu;

use anyhow::{Context, Result};
use chrono::{Local, Utc};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use upnext_core::{reconcile, sections, title};

#[derive(Parser)]
#[command(name = "upnext")]
#[command(about = "Menu-bar widget showing your current and upcoming meetings")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Print only the status-bar title line (for bare status-bar hosts)
    Title,
    /// Open the scheduling service's web app in the browser
    Open,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout is the menu render surface, so logs go to stderr
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        None => cmd_render(false).await,
        Some(Commands::Title) => cmd_render(true).await,
        Some(Commands::Open) => cmd_open(),
    }
}

/// Fetch both resources, run the reconciliation pipeline, and print either
/// the full menu or just the title line.
async fn cmd_render(title_only: bool) -> Result<()> {
    let cfg = config::load_config()?;
    let client = api::ApiClient::new(&cfg)?;

    let local_now = Local::now();
    let snapshot = client.fetch_snapshot(local_now.date_naive()).await;

    let events = reconcile::dedupe_synced(snapshot.events);
    let moment = reconcile::resolve_moment(snapshot.moment, &events);

    let title = title::compose_title(&moment, Utc::now());
    if title_only {
        println!("{}", title.short);
        return Ok(());
    }

    let sections = sections::bucket_events(&events, local_now, &cfg.display_settings());
    let ctx = menu::MenuContext {
        web_app_url: cfg.web_app_url()?,
    };
    print!("{}", menu::render(&title, &sections, &local_now, &ctx));

    Ok(())
}

fn cmd_open() -> Result<()> {
    let cfg = config::load_config()?;
    let url = cfg.web_app_url()?;
    open::that(url.as_str()).with_context(|| format!("Failed to open {}", url))?;
    Ok(())
}
