//! Newsbrief batch generation job
//!
//! Collects categorized headlines, generates the AI summary (and a
//! best-effort column), and persists the snapshot — to the persistence API
//! when configured, or to JSON files with `--out`. Designed to run from
//! cron / CI on a daily and weekly schedule.

use std::path::PathBuf;

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use newsbrief_ai::OpenAiBriefingClient;
use newsbrief_core::Period;
use newsbrief_feed::GoogleNewsClient;
use newsbrief_services::NewsPipeline;
use newsbrief_storage::{FileStore, NewsApiClient};

#[derive(Debug, Parser)]
#[command(name = "newsbrief", about = "Generate daily or weekly news briefings")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Generate today's briefing
    Daily(RunArgs),
    /// Generate this week's briefing
    Weekly(RunArgs),
}

#[derive(Debug, Args)]
struct RunArgs {
    /// Articles to keep per category (default: 4 daily, 6 weekly)
    #[arg(long)]
    per_category: Option<usize>,

    /// Recency window in days (default: 1 daily, 7 weekly)
    #[arg(long)]
    days: Option<i64>,

    /// Write the snapshot to this directory instead of the API
    #[arg(long)]
    out: Option<PathBuf>,
}

/// Where a finished snapshot goes
enum Sink {
    Api(NewsApiClient),
    File(FileStore),
}

fn resolve_sink(out: Option<PathBuf>) -> anyhow::Result<Sink> {
    if let Some(dir) = out {
        return Ok(Sink::File(FileStore::new(dir)));
    }

    let base_url = std::env::var("NEWS_API_URL")
        .context("NEWS_API_URL must be set (or pass --out to write files)")?;
    let api_key = std::env::var("NEWS_API_KEY").context("NEWS_API_KEY must be set")?;
    Ok(Sink::Api(NewsApiClient::new(base_url, api_key)))
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    if let Err(e) = dotenvy::dotenv() {
        if !matches!(e, dotenvy::Error::Io(_)) {
            eprintln!("Warning: Failed to load .env: {}", e);
        }
    }

    tracing_subscriber::registry()
        .with(fmt::layer())
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();

    // async-openai reads the key itself; fail early with a clear message
    std::env::var("OPENAI_API_KEY").context("OPENAI_API_KEY must be set")?;

    let pipeline = NewsPipeline::new(GoogleNewsClient::new(), OpenAiBriefingClient::new());

    match cli.command {
        Command::Daily(args) => {
            let per_category = args.per_category.unwrap_or(Period::Daily.default_per_category());
            let days = args.days.unwrap_or(Period::Daily.default_days());
            let sink = resolve_sink(args.out)?;

            info!(
                "Generating daily briefing ({} per category, {} day window)",
                per_category, days
            );
            let data = pipeline.run_daily(per_category, days).await?;
            info!(
                "Daily briefing ready: {} articles, {} categories, column: {}",
                data.articles.len(),
                data.summary.categories.len(),
                data.column.is_some()
            );

            match sink {
                Sink::Api(client) => {
                    client.post_daily(&data).await?;
                    info!("Stored daily snapshot for {}", data.date);
                }
                Sink::File(store) => {
                    let path = store.write_daily(&data)?;
                    info!("Wrote daily snapshot to {:?}", path);
                }
            }
        }
        Command::Weekly(args) => {
            let per_category = args
                .per_category
                .unwrap_or(Period::Weekly.default_per_category());
            let days = args.days.unwrap_or(Period::Weekly.default_days());
            let sink = resolve_sink(args.out)?;

            info!(
                "Generating weekly briefing ({} per category, {} day window)",
                per_category, days
            );
            let data = pipeline.run_weekly(per_category, days).await?;
            info!(
                "Weekly briefing ready: {} ~ {}, {} articles, column: {}",
                data.week_start,
                data.week_end,
                data.articles.len(),
                data.column.is_some()
            );

            match sink {
                Sink::Api(client) => {
                    client.post_weekly(&data).await?;
                    info!("Stored weekly snapshot for {} ~ {}", data.week_start, data.week_end);
                }
                Sink::File(store) => {
                    let path = store.write_weekly(&data)?;
                    info!("Wrote weekly snapshot to {:?}", path);
                }
            }
        }
    }

    Ok(())
}
