// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Inference service and the normalize-then-classify detector
//!
//! The service is constructed once from a trained artifact and handed to
//! callers by reference; it holds no mutable state.

use crate::artifact::{ArtifactInfo, ModelArtifact};
use crate::classifier::Classifier;
use crate::config::DetectorConfig;
use crate::error::{DetectorError, Result};
use crate::label::Label;
use crate::normalizer::{ArticleText, TextNormalizer};
use crate::vectorizer::Vectorizer;
use std::path::Path;

/// Vectorizer and classifier composed into a single inference step
pub struct InferenceService {
    vectorizer: Box<dyn Vectorizer>,
    classifier: Box<dyn Classifier>,
    info: ArtifactInfo,
}

impl InferenceService {
    /// Compose a vectorizer and classifier; their dimensions must agree
    pub fn new(vectorizer: Box<dyn Vectorizer>, classifier: Box<dyn Classifier>) -> Result<Self> {
        if vectorizer.dimension() != classifier.dimension() {
            return Err(DetectorError::IncompatiblePipeline(format!(
                "vectorizer produces {} features but classifier expects {}",
                vectorizer.dimension(),
                classifier.dimension()
            )));
        }
        Ok(Self {
            vectorizer,
            classifier,
            info: ArtifactInfo::default(),
        })
    }

    /// Build from an already validated artifact
    pub fn from_artifact(artifact: ModelArtifact) -> Self {
        Self {
            vectorizer: Box::new(artifact.vectorizer),
            classifier: Box::new(artifact.classifier),
            info: artifact.info,
        }
    }

    /// Load the trained pipeline from disk
    pub fn load(path: &Path, expected_sha256: Option<&str>) -> Result<Self> {
        ModelArtifact::load(path, expected_sha256).map(Self::from_artifact)
    }

    /// Classify one normalized string
    pub fn classify(&self, normalized: &str) -> Label {
        let features = self.vectorizer.transform(normalized);
        let label = self.classifier.classify(&features);
        tracing::debug!(features = features.entries().len(), %label, "classified");
        label
    }

    pub fn info(&self) -> &ArtifactInfo {
        &self.info
    }
}

/// Normalizer plus inference service: raw article text in, label out
pub struct Detector {
    normalizer: TextNormalizer,
    service: InferenceService,
}

impl Detector {
    pub fn new(normalizer: TextNormalizer, service: InferenceService) -> Self {
        Self { normalizer, service }
    }

    /// Load the model named by the configuration
    pub fn from_config(config: &DetectorConfig) -> Result<Self> {
        let service = InferenceService::load(&config.model_path, config.model_sha256.as_deref())?;
        tracing::info!("Normalization mode: {}", config.normalization);
        Ok(Self::new(TextNormalizer::new(config.normalization), service))
    }

    pub fn normalizer(&self) -> &TextNormalizer {
        &self.normalizer
    }

    pub fn service(&self) -> &InferenceService {
        &self.service
    }

    /// Normalize and classify; empty text is rejected
    pub fn assess(&self, raw: &str) -> Result<Label> {
        let article = ArticleText::new(raw)?;
        Ok(self.assess_article(&article))
    }

    pub fn assess_article(&self, article: &ArticleText) -> Label {
        let normalized = self.normalizer.normalize(article.as_str());
        tracing::debug!(tokens = normalized.split(' ').filter(|t| !t.is_empty()).count(), "normalized");
        self.service.classify(&normalized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::classifier::LinearClassifier;
    use crate::normalizer::NormalizationMode;
    use crate::vectorizer::TfIdfVectorizer;
    use std::collections::HashMap;

    fn service() -> InferenceService {
        let vocabulary: HashMap<String, usize> = [("hoax", 0), ("official", 1), ("report", 2)]
            .into_iter()
            .map(|(t, i)| (t.to_string(), i))
            .collect();
        InferenceService::new(
            Box::new(TfIdfVectorizer::new(vocabulary, vec![1.0, 1.0, 1.0])),
            Box::new(LinearClassifier::new(vec![-2.0, 1.5, 1.0], -0.1)),
        )
        .unwrap()
    }

    #[test]
    fn test_dimension_mismatch_rejected() {
        let vectorizer = TfIdfVectorizer::new(HashMap::new(), vec![]);
        let classifier = LinearClassifier::new(vec![1.0], 0.0);
        let err = InferenceService::new(Box::new(vectorizer), Box::new(classifier)).err();
        assert!(matches!(err, Some(DetectorError::IncompatiblePipeline(_))));
    }

    #[test]
    fn test_classify_is_deterministic() {
        let s = service();
        assert_eq!(s.classify("official report"), Label::Real);
        assert_eq!(s.classify("official report"), Label::Real);
        assert_eq!(s.classify("hoax"), Label::Fake);
        assert_eq!(s.classify(""), Label::Fake);
    }

    #[test]
    fn test_detector_assess() {
        let detector = Detector::new(TextNormalizer::new(NormalizationMode::Compatible), service());
        assert_eq!(detector.assess("The official reports").unwrap(), Label::Real);
        assert_eq!(detector.assess("A total hoax!").unwrap(), Label::Fake);
        assert!(matches!(detector.assess("   "), Err(DetectorError::InvalidInput(_))));
    }
}
