// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Fake news detector
//!
//! This crate provides:
//! - Text normalization (Treebank tokenization, stopword removal, lemmatization)
//! - TF-IDF vectorization and linear classification from a trained artifact
//! - An inference service composing the two, loaded once and shared by reference
//! - A headline fetcher that writes labelled news rows to CSV

pub mod artifact;
pub mod classifier;
pub mod config;
pub mod error;
pub mod headlines;
pub mod label;
pub mod lemmatizer;
pub mod normalizer;
pub mod service;
pub mod tokenizer;
pub mod vectorizer;

pub use artifact::{ArtifactInfo, ModelArtifact};
pub use classifier::{Classifier, LinearClassifier};
pub use config::DetectorConfig;
pub use error::{DetectorError, Result};
pub use headlines::{fetch_headlines, write_csv, HeadlineQuery, HeadlineRecord};
pub use label::Label;
pub use normalizer::{normalize, ArticleText, NormalizationMode, TextNormalizer};
pub use service::{Detector, InferenceService};
pub use vectorizer::{FeatureVector, TfIdfVectorizer, Vectorizer};
