// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Fake news detector CLI
//!
//! Usage:
//!   fakenews-detect --model fake_news_model.json --text "Paste the article here"
//!   fakenews-detect --file article.txt --json
//!   cat article.txt | fakenews-detect
//!   fakenews-detect --interactive
//!   fakenews-detect --about

use anyhow::{Context, Result};
use clap::Parser;
use fakenews_detector::{ArticleText, Detector, DetectorConfig, DetectorError, Label, NormalizationMode};
use std::io::{BufRead, Read, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "fakenews-detect")]
#[command(about = "Classify a news article as REAL or FAKE")]
#[command(version)]
struct Args {
    /// Article text to classify
    #[arg(short, long, conflicts_with_all = ["file", "interactive"])]
    text: Option<String>,

    /// Read the article from a file
    #[arg(short, long, conflicts_with = "interactive")]
    file: Option<PathBuf>,

    /// Prompt for articles until end of input (a line with "." submits)
    #[arg(short, long)]
    interactive: bool,

    /// Path to the trained model artifact
    #[arg(short, long, env = "FAKENEWS_MODEL")]
    model: Option<PathBuf>,

    /// Expected SHA-256 of the model artifact
    #[arg(long)]
    model_sha256: Option<String>,

    /// Normalization mode (compatible, cleaned)
    #[arg(long)]
    mode: Option<NormalizationMode>,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Print the verdict as JSON
    #[arg(long)]
    json: bool,

    /// Describe the loaded model and exit
    #[arg(long)]
    about: bool,
}

const EMPTY_INPUT_WARNING: &str = "Please enter some news text.";

fn build_config(args: &Args) -> Result<DetectorConfig> {
    let mut config = match &args.config {
        Some(path) => DetectorConfig::from_file(path)?,
        None => DetectorConfig::default(),
    };
    if let Some(model) = &args.model {
        config.model_path = model.clone();
    }
    if let Some(sha) = &args.model_sha256 {
        config.model_sha256 = Some(sha.clone());
    }
    if let Some(mode) = args.mode {
        config.normalization = mode;
    }
    Ok(config)
}

fn render(label: Label, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string(&serde_json::json!({ "label": label }))?);
    } else {
        println!("{}", label.headline());
        println!("{}", label.advice());
    }
    Ok(())
}

/// Classify one article, turning invalid input into a warning
fn assess_and_render(
    detector: &Detector,
    article: Result<ArticleText, DetectorError>,
    json: bool,
) -> Result<Option<Label>> {
    match article {
        Ok(article) => {
            let label = detector.assess_article(&article);
            render(label, json)?;
            Ok(Some(label))
        }
        Err(DetectorError::InvalidInput(reason)) => {
            tracing::debug!("Rejected input: {}", reason);
            eprintln!("Warning: {}", EMPTY_INPUT_WARNING);
            Ok(None)
        }
        Err(e) => Err(e.into()),
    }
}

/// Line that submits the buffered article in interactive mode
const SUBMIT_MARKER: &str = ".";

fn prompt() -> Result<()> {
    eprint!("> ");
    std::io::stderr().flush()?;
    Ok(())
}

/// Read articles separated by `SUBMIT_MARKER` lines until end of input.
/// Blank lines stay inside the article; empty submissions are skipped.
fn run_interactive(detector: &Detector, input: impl BufRead, json: bool) -> Result<Vec<Label>> {
    let mut labels = Vec::new();
    let mut buffer = String::new();

    eprintln!("Paste the news content, then a line with a single '.' to submit (Ctrl-D to quit):");
    prompt()?;

    for line in input.lines() {
        let line = line.context("Failed to read from stdin")?;
        if line.trim() != SUBMIT_MARKER {
            buffer.push_str(&line);
            buffer.push('\n');
            continue;
        }
        let article = std::mem::take(&mut buffer);
        if !article.trim().is_empty() {
            labels.extend(assess_and_render(detector, ArticleText::new(article), json)?);
        }
        prompt()?;
    }

    if !buffer.trim().is_empty() {
        labels.extend(assess_and_render(detector, ArticleText::new(buffer), json)?);
    }
    Ok(labels)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args = Args::parse();
    let config = build_config(&args)?;

    // A missing or corrupt model aborts startup
    let detector = Detector::from_config(&config)?;

    if args.about {
        print!("{}", detector.service().info().format());
        println!("Normalization: {}", detector.normalizer().mode());
        return Ok(());
    }

    if args.interactive {
        let labels = run_interactive(&detector, std::io::stdin().lock(), args.json)?;
        tracing::debug!("Classified {} articles", labels.len());
        return Ok(());
    }

    let article = if let Some(text) = &args.text {
        ArticleText::new(text.as_str())
    } else if let Some(path) = &args.file {
        let bytes = std::fs::read(path)
            .with_context(|| format!("Failed to read article file: {}", path.display()))?;
        ArticleText::from_bytes(&bytes)
    } else {
        let mut bytes = Vec::new();
        std::io::stdin()
            .read_to_end(&mut bytes)
            .context("Failed to read from stdin")?;
        ArticleText::from_bytes(&bytes)
    };

    assess_and_render(&detector, article, args.json)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn fixture_path() -> PathBuf {
        PathBuf::from(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/fixtures/pinned_model.json"))
    }

    fn detector() -> Detector {
        let config = DetectorConfig {
            model_path: fixture_path(),
            ..DetectorConfig::default()
        };
        Detector::from_config(&config).unwrap()
    }

    #[test]
    fn test_multi_paragraph_article_is_one_submission() {
        let input = "Shocking secret cure.\n\nDoctors hate this hoax.\n\n\nBreaking fake news.\n.\n";
        let labels = run_interactive(&detector(), Cursor::new(input), false).unwrap();
        assert_eq!(labels, vec![Label::Fake]);
    }

    #[test]
    fn test_submit_marker_separates_articles() {
        let input = "Shocking secret cure.\n.\nOfficial report published.\n  .  \nReuters said.";
        let labels = run_interactive(&detector(), Cursor::new(input), true).unwrap();
        assert_eq!(labels, vec![Label::Fake, Label::Real, Label::Real]);
    }

    #[test]
    fn test_empty_submissions_are_skipped() {
        let input = ".\n\n.\n   \n.\nOfficial report published.\n.\n\n";
        let labels = run_interactive(&detector(), Cursor::new(input), false).unwrap();
        assert_eq!(labels, vec![Label::Real]);
    }

    #[test]
    fn test_empty_article_warns_without_failing() {
        let detector = detector();
        let label = assess_and_render(&detector, ArticleText::new("   "), false).unwrap();
        assert_eq!(label, None);
        let label = assess_and_render(&detector, ArticleText::from_bytes(&[0xff, 0xfe]), false).unwrap();
        assert_eq!(label, None);
    }

    #[test]
    fn test_other_errors_propagate() {
        let err = DetectorError::IncompatiblePipeline("3 vs 4".to_string());
        assert!(assess_and_render(&detector(), Err(err), false).is_err());
    }

    #[test]
    fn test_build_config_defaults() {
        let args = Args::parse_from(["fakenews-detect", "--model", "model.json"]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.model_path, PathBuf::from("model.json"));
        assert_eq!(config.model_sha256, None);
        assert_eq!(config.normalization, NormalizationMode::Compatible);
    }

    #[test]
    fn test_build_config_flags_override_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detector.json");
        std::fs::write(
            &path,
            r#"{"model_path": "from_file.json", "model_sha256": "aaaa", "normalization": "cleaned"}"#,
        )
        .unwrap();
        let config_arg = path.to_str().unwrap();

        let args = Args::parse_from(["fakenews-detect", "--config", config_arg, "--model", "flag.json"]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.model_path, PathBuf::from("flag.json"));
        assert_eq!(config.model_sha256.as_deref(), Some("aaaa"));
        assert_eq!(config.normalization, NormalizationMode::Cleaned);

        let args = Args::parse_from([
            "fakenews-detect",
            "--config",
            config_arg,
            "--model",
            "flag.json",
            "--model-sha256",
            "bbbb",
            "--mode",
            "compatible",
        ]);
        let config = build_config(&args).unwrap();
        assert_eq!(config.model_sha256.as_deref(), Some("bbbb"));
        assert_eq!(config.normalization, NormalizationMode::Compatible);
    }
}
