// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Error types for the detector library

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the normalizer and the inference service
#[derive(Debug, Error)]
pub enum DetectorError {
    /// Input was not text, or was empty where text is required
    #[error("invalid input: {0}")]
    InvalidInput(String),

    /// The trained pipeline artifact could not be loaded
    #[error("failed to load model from {}: {reason}", .path.display())]
    ModelLoad { path: PathBuf, reason: String },

    /// Vectorizer and classifier disagree on the feature dimension
    #[error("incompatible pipeline: {0}")]
    IncompatiblePipeline(String),
}

impl DetectorError {
    pub(crate) fn model_load(path: impl Into<PathBuf>, reason: impl Into<String>) -> Self {
        DetectorError::ModelLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, DetectorError>;
