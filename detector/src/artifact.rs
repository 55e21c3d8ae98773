// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Trained pipeline artifact
//!
//! A single JSON document holding the fitted TF-IDF vectorizer, the linear
//! classifier and descriptive metadata. The artifact is loaded once, checked
//! for internal consistency and never modified afterwards.

use crate::classifier::LinearClassifier;
use crate::error::{DetectorError, Result};
use crate::vectorizer::TfIdfVectorizer;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::Path;

/// Artifact schema version understood by this crate
pub const FORMAT_VERSION: u32 = 1;

/// Descriptive metadata shown by the about view
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArtifactInfo {
    pub name: String,
    pub version: String,
    pub model_type: String,
    #[serde(default)]
    pub training_data: Vec<String>,
    #[serde(default)]
    pub preprocessing: Vec<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Default for ArtifactInfo {
    fn default() -> Self {
        Self {
            name: "fake-news-detector".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            model_type: "TF-IDF + LinearSVC".to_string(),
            training_data: vec![],
            preprocessing: vec![
                "Treebank word tokenization".to_string(),
                "Stopword removal".to_string(),
                "Lemmatization".to_string(),
            ],
            created_at: None,
        }
    }
}

impl ArtifactInfo {
    /// Render the metadata as plain text
    pub fn format(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Model: {} ({})\n", self.name, self.version));
        out.push_str(&format!("Type: {}\n", self.model_type));
        if !self.training_data.is_empty() {
            out.push_str(&format!("Training data: {}\n", self.training_data.join(", ")));
        }
        if !self.preprocessing.is_empty() {
            out.push_str(&format!("Preprocessing: {}\n", self.preprocessing.join(", ")));
        }
        if let Some(created) = self.created_at {
            out.push_str(&format!("Created: {}\n", created.format("%Y-%m-%d")));
        }
        out
    }
}

/// Serialized vectorizer + classifier pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelArtifact {
    pub format_version: u32,
    #[serde(default)]
    pub info: ArtifactInfo,
    pub vectorizer: TfIdfVectorizer,
    pub classifier: LinearClassifier,
}

impl ModelArtifact {
    pub fn new(vectorizer: TfIdfVectorizer, classifier: LinearClassifier) -> Self {
        Self {
            format_version: FORMAT_VERSION,
            info: ArtifactInfo::default(),
            vectorizer,
            classifier,
        }
    }

    /// Read, optionally checksum, parse and validate an artifact
    pub fn load(path: &Path, expected_sha256: Option<&str>) -> Result<Self> {
        let bytes = std::fs::read(path)
            .map_err(|e| DetectorError::model_load(path, format!("cannot read file: {}", e)))?;

        if let Some(expected) = expected_sha256 {
            let actual = hex::encode(Sha256::digest(&bytes));
            if !actual.eq_ignore_ascii_case(expected.trim()) {
                tracing::warn!("Checksum mismatch: expected {}, got {}", expected, actual);
                return Err(DetectorError::model_load(
                    path,
                    format!("sha256 mismatch (expected {}, got {})", expected, actual),
                ));
            }
            tracing::debug!("Checksum verified: {}", actual);
        }

        let artifact: ModelArtifact = serde_json::from_slice(&bytes)
            .map_err(|e| DetectorError::model_load(path, format!("malformed artifact: {}", e)))?;
        artifact
            .validate()
            .map_err(|reason| DetectorError::model_load(path, reason))?;

        tracing::info!(
            "Loaded model '{}' from {} ({} features)",
            artifact.info.name,
            path.display(),
            artifact.vectorizer.idf.len()
        );
        Ok(artifact)
    }

    /// Internal consistency checks run on load
    pub fn validate(&self) -> std::result::Result<(), String> {
        if self.format_version != FORMAT_VERSION {
            return Err(format!(
                "unsupported format_version {} (expected {})",
                self.format_version, FORMAT_VERSION
            ));
        }
        self.vectorizer.validate()?;
        self.classifier.validate()?;
        if self.classifier.coef.len() != self.vectorizer.idf.len() {
            return Err(format!(
                "classifier expects {} features but vectorizer produces {}",
                self.classifier.coef.len(),
                self.vectorizer.idf.len()
            ));
        }
        Ok(())
    }

    /// Write the artifact as pretty-printed JSON
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}
