// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Headline fetcher
//!
//! Pulls one page of top headlines from a news-aggregation API and writes them
//! as labelled rows (`title,text,label`) for later use as real-news samples.

use crate::label::Label;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

pub const DEFAULT_ENDPOINT: &str = "https://newsapi.org/v2/top-headlines";
pub const DEFAULT_SOURCES: &str = "bbc-news,cnn,reuters";
pub const DEFAULT_PAGE_SIZE: u32 = 50;

/// Parameters for a single headline request
#[derive(Debug, Clone)]
pub struct HeadlineQuery {
    pub endpoint: String,
    pub sources: String,
    pub page_size: u32,
    pub api_key: String,
    pub timeout: Duration,
}

impl HeadlineQuery {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            sources: DEFAULT_SOURCES.to_string(),
            page_size: DEFAULT_PAGE_SIZE,
            api_key: api_key.into(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Article as returned by the API; any field may be null
#[derive(Debug, Clone, Deserialize)]
pub struct ApiArticle {
    pub title: Option<String>,
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ApiResponse {
    #[serde(default)]
    status: Option<String>,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    articles: Option<Vec<ApiArticle>>,
}

/// One CSV row
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HeadlineRecord {
    pub title: String,
    pub text: String,
    pub label: u8,
}

impl From<ApiArticle> for HeadlineRecord {
    fn from(article: ApiArticle) -> Self {
        Self {
            title: article.title.unwrap_or_default(),
            text: article.content.unwrap_or_default(),
            label: Label::Real.class_index(),
        }
    }
}

/// Parse an API response body into records
pub fn parse_response(body: &str) -> Result<Vec<HeadlineRecord>> {
    let response: ApiResponse =
        serde_json::from_str(body).context("Failed to parse news API response")?;

    if response.status.as_deref() == Some("error") {
        anyhow::bail!(
            "News API returned an error: {}",
            response.message.unwrap_or_else(|| "unknown error".to_string())
        );
    }

    let articles = response
        .articles
        .context("News API response has no 'articles' array")?;
    Ok(articles.into_iter().map(HeadlineRecord::from).collect())
}

/// Perform the request and return the flattened rows
pub fn fetch_headlines(query: &HeadlineQuery) -> Result<Vec<HeadlineRecord>> {
    tracing::info!("Fetching headlines from: {} (sources={})", query.endpoint, query.sources);

    let page_size = query.page_size.to_string();
    let response = reqwest::blocking::Client::builder()
        .timeout(query.timeout)
        .build()?
        .get(&query.endpoint)
        .query(&[
            ("sources", query.sources.as_str()),
            ("pageSize", page_size.as_str()),
            ("apiKey", query.api_key.as_str()),
        ])
        .send()
        .context("Failed to send request")?;

    let status = response.status();
    let body = response.text().context("Failed to read response")?;

    if !status.is_success() {
        // The API reports the reason in the body even on error statuses
        let reason = parse_response(&body)
            .err()
            .map(|e| e.to_string())
            .unwrap_or_else(|| body.chars().take(200).collect());
        anyhow::bail!("Request failed with status {}: {}", status, reason);
    }

    let records = parse_response(&body)?;
    tracing::info!("Received {} articles", records.len());
    Ok(records)
}

/// Write rows with a `title,text,label` header
pub fn write_csv(records: &[HeadlineRecord], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("Failed to create output file: {}", path.display()))?;
    for record in records {
        writer.serialize(record)?;
    }
    // serialize() only emits the header with the first row
    if records.is_empty() {
        writer.write_record(["title", "text", "label"])?;
    }
    writer.flush()?;
    Ok(())
}
