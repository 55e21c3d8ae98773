// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Headline fetch utility
//!
//! Downloads one page of top headlines and stores them as real-news rows:
//!   fetch-headlines --api-key <KEY>
//!   NEWSAPI_KEY=<KEY> fetch-headlines --sources bbc-news,cnn --output extra.csv

use anyhow::Result;
use clap::Parser;
use fakenews_detector::headlines::{
    fetch_headlines, write_csv, HeadlineQuery, DEFAULT_ENDPOINT, DEFAULT_PAGE_SIZE, DEFAULT_SOURCES,
};
use indicatif::{ProgressBar, ProgressStyle};
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fetch-headlines")]
#[command(about = "Fetch top headlines into a labelled CSV")]
#[command(version)]
struct Args {
    /// News API key
    #[arg(short, long, env = "NEWSAPI_KEY", hide_env_values = true)]
    api_key: String,

    /// Comma-separated source ids
    #[arg(short, long, default_value = DEFAULT_SOURCES)]
    sources: String,

    /// Number of articles to request
    #[arg(short, long, default_value_t = DEFAULT_PAGE_SIZE)]
    page_size: u32,

    /// API endpoint
    #[arg(long, default_value = DEFAULT_ENDPOINT)]
    endpoint: String,

    /// Request timeout in seconds
    #[arg(long, default_value_t = 30)]
    timeout: u64,

    /// Output CSV file
    #[arg(short, long, default_value = "additional_real_news.csv")]
    output: PathBuf,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    let query = HeadlineQuery {
        endpoint: args.endpoint,
        sources: args.sources,
        page_size: args.page_size,
        api_key: args.api_key,
        timeout: Duration::from_secs(args.timeout),
    };

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(ProgressStyle::default_spinner().template("{spinner:.green} {msg}")?);
    spinner.set_message("Fetching headlines...");
    spinner.enable_steady_tick(Duration::from_millis(100));

    let records = fetch_headlines(&query);
    spinner.finish_and_clear();
    let records = records?;

    write_csv(&records, &args.output)?;
    tracing::info!("Wrote {} rows to {}", records.len(), args.output.display());

    println!("{} created successfully.", args.output.display());
    Ok(())
}
