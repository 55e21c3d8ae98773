// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Text normalization feeding the vectorizer
//!
//! `normalize` maps raw article text to a space-joined string of lemmatized,
//! non-stopword tokens. Two modes exist:
//!
//! - [`NormalizationMode::Compatible`] tokenizes the raw text as-is. The
//!   lowercased, URL- and punctuation-stripped copy of the text is computed
//!   but never tokenized, which is how the shipped models were trained.
//! - [`NormalizationMode::Cleaned`] tokenizes that stripped copy instead.

use crate::error::{DetectorError, Result};
use crate::lemmatizer::lemmatize;
use crate::tokenizer::word_tokenize;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"http\S+|www\S+|https\S+").expect("url pattern is a valid regex")
});

static NON_ALPHANUMERIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"[^a-zA-Z0-9\s]").expect("character class is a valid regex")
});

/// Fixed English stopword list
const ENGLISH_STOPWORDS: &[&str] = &[
    "i", "me", "my", "myself", "we", "our", "ours", "ourselves", "you", "you're",
    "you've", "you'll", "you'd", "your", "yours", "yourself", "yourselves", "he",
    "him", "his", "himself", "she", "she's", "her", "hers", "herself", "it", "it's",
    "its", "itself", "they", "them", "their", "theirs", "themselves", "what", "which",
    "who", "whom", "this", "that", "that'll", "these", "those", "am", "is", "are",
    "was", "were", "be", "been", "being", "have", "has", "had", "having", "do", "does",
    "did", "doing", "a", "an", "the", "and", "but", "if", "or", "because", "as",
    "until", "while", "of", "at", "by", "for", "with", "about", "against", "between",
    "into", "through", "during", "before", "after", "above", "below", "to", "from",
    "up", "down", "in", "out", "on", "off", "over", "under", "again", "further",
    "then", "once", "here", "there", "when", "where", "why", "how", "all", "any",
    "both", "each", "few", "more", "most", "other", "some", "such", "no", "nor",
    "not", "only", "own", "same", "so", "than", "too", "very", "s", "t", "can",
    "will", "just", "don", "don't", "should", "should've", "now", "d", "ll", "m", "o",
    "re", "ve", "y", "ain", "aren", "aren't", "couldn", "couldn't", "didn", "didn't",
    "doesn", "doesn't", "hadn", "hadn't", "hasn", "hasn't", "haven", "haven't", "isn",
    "isn't", "ma", "mightn", "mightn't", "mustn", "mustn't", "needn", "needn't", "shan",
    "shan't", "shouldn", "shouldn't", "wasn", "wasn't", "weren", "weren't", "won",
    "won't", "wouldn", "wouldn't",
];

/// Which text the token stream is built from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NormalizationMode {
    /// Tokenize the raw text; the stripped copy is discarded
    #[default]
    Compatible,
    /// Tokenize the lowercased, URL- and punctuation-stripped text
    Cleaned,
}

impl FromStr for NormalizationMode {
    type Err = DetectorError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "compatible" => Ok(NormalizationMode::Compatible),
            "cleaned" => Ok(NormalizationMode::Cleaned),
            other => Err(DetectorError::InvalidInput(format!(
                "unknown normalization mode '{}' (expected compatible or cleaned)",
                other
            ))),
        }
    }
}

impl fmt::Display for NormalizationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NormalizationMode::Compatible => write!(f, "compatible"),
            NormalizationMode::Cleaned => write!(f, "cleaned"),
        }
    }
}

/// Non-empty article text supplied by a caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArticleText(String);

impl ArticleText {
    /// Reject empty or whitespace-only text
    pub fn new(raw: impl Into<String>) -> Result<Self> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            return Err(DetectorError::InvalidInput(
                "article text is empty".to_string(),
            ));
        }
        Ok(Self(raw))
    }

    /// Decode bytes as UTF-8 article text
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let text = std::str::from_utf8(bytes).map_err(|e| {
            DetectorError::InvalidInput(format!("article is not valid UTF-8 text: {}", e))
        })?;
        Self::new(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Stopword filtering plus lemmatization over a fixed configuration
#[derive(Debug, Clone)]
pub struct TextNormalizer {
    stopwords: HashSet<String>,
    mode: NormalizationMode,
}

impl TextNormalizer {
    /// Normalizer with the English stopword list
    pub fn new(mode: NormalizationMode) -> Self {
        Self {
            stopwords: ENGLISH_STOPWORDS.iter().map(|w| w.to_string()).collect(),
            mode,
        }
    }

    pub fn mode(&self) -> NormalizationMode {
        self.mode
    }

    /// Whether the token is a stopword, ignoring case
    pub fn is_stopword(&self, token: &str) -> bool {
        self.stopwords.contains(&token.to_lowercase())
    }

    /// Lowercase, then drop URL-prefixed runs and non-alphanumeric characters
    pub fn strip(raw: &str) -> String {
        let lowered = raw.to_lowercase();
        let without_urls = URL_PATTERN.replace_all(&lowered, "");
        NON_ALPHANUMERIC.replace_all(&without_urls, "").into_owned()
    }

    /// Map raw article text to its normalized token string
    pub fn normalize(&self, raw: &str) -> String {
        let tokens = match self.mode {
            // The stripped copy never reaches the token stream in this mode
            NormalizationMode::Compatible => word_tokenize(raw),
            NormalizationMode::Cleaned => word_tokenize(&Self::strip(raw)),
        };

        tokens
            .iter()
            .filter(|token| !self.is_stopword(token))
            .map(|token| lemmatize(token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Normalize bytes, failing when they are not UTF-8 text
    pub fn normalize_bytes(&self, raw: &[u8]) -> Result<String> {
        let text = std::str::from_utf8(raw).map_err(|e| {
            DetectorError::InvalidInput(format!("input is not valid UTF-8 text: {}", e))
        })?;
        Ok(self.normalize(text))
    }
}

impl Default for TextNormalizer {
    fn default() -> Self {
        Self::new(NormalizationMode::default())
    }
}

/// Normalize with the default (compatible) configuration
pub fn normalize(raw: &str) -> String {
    TextNormalizer::default().normalize(raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tokens(s: &str) -> Vec<String> {
        s.split(' ').filter(|t| !t.is_empty()).map(str::to_string).collect()
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(TextNormalizer::new(NormalizationMode::Cleaned).normalize(""), "");
    }

    #[test]
    fn test_deterministic() {
        let text = "Officials said the reports were BREAKING news, see https://x.co/a!";
        assert_eq!(normalize(text), normalize(text));
    }

    #[test]
    fn test_stopwords_removed_and_lemmatized() {
        let out = normalize("the cat is on the mat");
        let toks = tokens(&out);
        assert!(!toks.contains(&"the".to_string()));
        assert!(!toks.contains(&"is".to_string()));
        assert!(toks.contains(&"cat".to_string()));
        assert!(toks.contains(&"mat".to_string()));
        assert_eq!(out, "cat mat");
    }

    #[test]
    fn test_stopwords_case_insensitive() {
        assert_eq!(normalize("The Cats ARE here"), "Cats");
        assert_eq!(normalize("cats and dogs"), "cat dog");
    }

    #[test]
    fn test_compatible_mode_keeps_raw_tokens() {
        let out = normalize("Visit http://example.com for fake info!!");
        assert_eq!(out, "Visit http : //example.com fake info ! !");
    }

    #[test]
    fn test_cleaned_mode_strips_urls_and_punctuation() {
        let normalizer = TextNormalizer::new(NormalizationMode::Cleaned);
        let out = normalizer.normalize("Visit http://example.com for FAKE info!!");
        assert_eq!(out, "visit fake info");
    }

    #[test]
    fn test_strip() {
        assert_eq!(
            TextNormalizer::strip("See www.site.org, NOW!"),
            "see  now"
        );
    }

    #[test]
    fn test_clitic_tokens_survive_filtering() {
        // "n't" is not in the stopword list; "do" is
        assert_eq!(normalize("Don't panic"), "n't panic");
    }

    #[test]
    fn test_normalize_bytes_rejects_non_utf8() {
        let normalizer = TextNormalizer::default();
        let err = normalizer.normalize_bytes(&[0xff, 0xfe, 0x00]).unwrap_err();
        assert!(matches!(err, DetectorError::InvalidInput(_)));
        assert_eq!(normalizer.normalize_bytes(b"the dogs").unwrap(), "dog");
    }

    #[test]
    fn test_article_text_rejects_empty() {
        assert!(ArticleText::new("").is_err());
        assert!(ArticleText::new("  \n ").is_err());
        assert_eq!(ArticleText::new("news").unwrap().as_str(), "news");
        assert!(ArticleText::from_bytes(&[0xc3, 0x28]).is_err());
    }

    #[test]
    fn test_mode_parsing() {
        assert_eq!("cleaned".parse::<NormalizationMode>().unwrap(), NormalizationMode::Cleaned);
        assert_eq!("Compatible".parse::<NormalizationMode>().unwrap(), NormalizationMode::Compatible);
        assert!("other".parse::<NormalizationMode>().is_err());
    }
}
