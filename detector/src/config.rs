// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Detector configuration

use crate::normalizer::NormalizationMode;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default artifact location, relative to the working directory
pub const DEFAULT_MODEL_PATH: &str = "fake_news_model.json";

/// Configuration for building a [`crate::service::Detector`]
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Path to the trained pipeline artifact
    pub model_path: PathBuf,
    /// Expected SHA-256 of the artifact (hex); unchecked when absent
    pub model_sha256: Option<String>,
    /// Which text feeds the token stream
    pub normalization: NormalizationMode,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            model_path: PathBuf::from(DEFAULT_MODEL_PATH),
            model_sha256: None,
            normalization: NormalizationMode::Compatible,
        }
    }
}

impl DetectorConfig {
    /// Load configuration from a JSON file; missing fields take defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;
        let config: DetectorConfig = serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DetectorConfig::default();
        assert_eq!(config.model_path, PathBuf::from("fake_news_model.json"));
        assert!(config.model_sha256.is_none());
        assert_eq!(config.normalization, NormalizationMode::Compatible);
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config: DetectorConfig =
            serde_json::from_str(r#"{ "normalization": "cleaned" }"#).unwrap();
        assert_eq!(config.normalization, NormalizationMode::Cleaned);
        assert_eq!(config.model_path, PathBuf::from(DEFAULT_MODEL_PATH));
    }

    #[test]
    fn test_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("detector.json");
        std::fs::write(&path, r#"{ "model_path": "models/a.json", "model_sha256": "abc" }"#).unwrap();

        let config = DetectorConfig::from_file(&path).unwrap();
        assert_eq!(config.model_path, PathBuf::from("models/a.json"));
        assert_eq!(config.model_sha256.as_deref(), Some("abc"));

        assert!(DetectorConfig::from_file(&dir.path().join("missing.json")).is_err());
    }
}
