// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Text vectorization
//!
//! The TF-IDF vectorizer reproduces the transform step of a fitted
//! term-frequency / inverse-document-frequency model: tokenize with the
//! `\b\w\w+\b` pattern, build word n-grams, weight counts by the stored IDF and
//! normalize the row.

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use std::sync::LazyLock;

static TOKEN_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b\w\w+\b").expect("token pattern is a valid regex"));

/// Sparse feature vector with entries ordered by feature index
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FeatureVector {
    dimension: usize,
    entries: Vec<(usize, f64)>,
}

impl FeatureVector {
    /// Build from (index, value) pairs; zero values are dropped
    pub fn from_entries(dimension: usize, entries: BTreeMap<usize, f64>) -> Self {
        Self {
            dimension,
            entries: entries.into_iter().filter(|(_, v)| *v != 0.0).collect(),
        }
    }

    pub fn dimension(&self) -> usize {
        self.dimension
    }

    pub fn entries(&self) -> &[(usize, f64)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, index: usize) -> f64 {
        self.entries
            .binary_search_by_key(&index, |(i, _)| *i)
            .map(|pos| self.entries[pos].1)
            .unwrap_or(0.0)
    }

    /// Dot product with a dense weight vector
    pub fn dot(&self, weights: &[f64]) -> f64 {
        self.entries
            .iter()
            .filter_map(|(i, v)| weights.get(*i).map(|w| w * v))
            .sum()
    }
}

/// Converts normalized text into a fixed-dimensional feature vector
pub trait Vectorizer: Send + Sync {
    fn transform(&self, text: &str) -> FeatureVector;

    /// Number of features produced
    fn dimension(&self) -> usize;
}

/// Row normalization applied after IDF weighting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Norm {
    L1,
    L2,
}

fn default_true() -> bool {
    true
}

fn default_ngram_range() -> (usize, usize) {
    (1, 1)
}

fn default_norm() -> Option<Norm> {
    Some(Norm::L2)
}

/// Fitted TF-IDF vectorizer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TfIdfVectorizer {
    /// Term -> feature index
    pub vocabulary: HashMap<String, usize>,
    /// Inverse document frequency per feature index
    pub idf: Vec<f64>,
    #[serde(default = "default_true")]
    pub lowercase: bool,
    #[serde(default = "default_ngram_range")]
    pub ngram_range: (usize, usize),
    #[serde(default)]
    pub sublinear_tf: bool,
    #[serde(default = "default_norm")]
    pub norm: Option<Norm>,
}

impl TfIdfVectorizer {
    pub fn new(vocabulary: HashMap<String, usize>, idf: Vec<f64>) -> Self {
        Self {
            vocabulary,
            idf,
            lowercase: true,
            ngram_range: (1, 1),
            sublinear_tf: false,
            norm: Some(Norm::L2),
        }
    }

    pub fn with_ngram_range(mut self, min_n: usize, max_n: usize) -> Self {
        self.ngram_range = (min_n, max_n);
        self
    }

    pub fn with_sublinear_tf(mut self, sublinear: bool) -> Self {
        self.sublinear_tf = sublinear;
        self
    }

    pub fn with_norm(mut self, norm: Option<Norm>) -> Self {
        self.norm = norm;
        self
    }

    /// Split text into analyzer tokens
    fn tokenize(&self, text: &str) -> Vec<String> {
        let text = if self.lowercase {
            text.to_lowercase()
        } else {
            text.to_string()
        };
        TOKEN_PATTERN
            .find_iter(&text)
            .map(|m| m.as_str().to_string())
            .collect()
    }

    /// Word n-grams over the configured range, joined by single spaces
    fn ngrams(&self, tokens: &[String]) -> Vec<String> {
        let (min_n, max_n) = self.ngram_range;
        let mut terms = Vec::new();
        for n in min_n.max(1)..=max_n {
            if n == 1 {
                terms.extend(tokens.iter().cloned());
            } else {
                terms.extend(tokens.windows(n).map(|w| w.join(" ")));
            }
        }
        terms
    }

    /// Check that the vocabulary maps onto `0..idf.len()` exactly once each
    pub fn validate(&self) -> Result<(), String> {
        let (min_n, max_n) = self.ngram_range;
        if min_n == 0 || min_n > max_n {
            return Err(format!("invalid ngram_range ({}, {})", min_n, max_n));
        }
        if self.vocabulary.len() != self.idf.len() {
            return Err(format!(
                "vocabulary has {} terms but idf has {} weights",
                self.vocabulary.len(),
                self.idf.len()
            ));
        }
        let mut seen = vec![false; self.idf.len()];
        for (term, &index) in &self.vocabulary {
            match seen.get_mut(index) {
                Some(slot) if !*slot => *slot = true,
                Some(_) => return Err(format!("duplicate feature index {} ('{}')", index, term)),
                None => return Err(format!("feature index {} out of range ('{}')", index, term)),
            }
        }
        if let Some(pos) = self.idf.iter().position(|w| !w.is_finite()) {
            return Err(format!("idf weight at index {} is not finite", pos));
        }
        Ok(())
    }
}

impl Vectorizer for TfIdfVectorizer {
    fn transform(&self, text: &str) -> FeatureVector {
        let tokens = self.tokenize(text);

        let mut counts: BTreeMap<usize, f64> = BTreeMap::new();
        for term in self.ngrams(&tokens) {
            if let Some(&index) = self.vocabulary.get(&term) {
                *counts.entry(index).or_insert(0.0) += 1.0;
            }
        }

        for (index, value) in counts.iter_mut() {
            let tf = if self.sublinear_tf { 1.0 + value.ln() } else { *value };
            *value = tf * self.idf.get(*index).copied().unwrap_or(0.0);
        }

        let length = match self.norm {
            Some(Norm::L2) => counts.values().map(|v| v * v).sum::<f64>().sqrt(),
            Some(Norm::L1) => counts.values().map(|v| v.abs()).sum::<f64>(),
            None => 1.0,
        };
        if length > 0.0 {
            for value in counts.values_mut() {
                *value /= length;
            }
        }

        FeatureVector::from_entries(self.idf.len(), counts)
    }

    fn dimension(&self) -> usize {
        self.idf.len()
    }
}
