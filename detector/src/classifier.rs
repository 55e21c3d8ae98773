// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Classifiers mapping feature vectors to labels

use crate::label::Label;
use crate::vectorizer::FeatureVector;
use serde::{Deserialize, Serialize};

/// Maps a feature vector to a discrete label
pub trait Classifier: Send + Sync {
    fn classify(&self, features: &FeatureVector) -> Label;

    /// Number of features expected
    fn dimension(&self) -> usize;
}

fn default_classes() -> Vec<u8> {
    vec![0, 1]
}

/// Fitted binary linear classifier (linear SVM decision function)
///
/// The decision value is `coef · x + intercept`; a positive value selects the
/// second class, anything else the first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LinearClassifier {
    pub coef: Vec<f64>,
    pub intercept: f64,
    #[serde(default = "default_classes")]
    pub classes: Vec<u8>,
}

impl LinearClassifier {
    pub fn new(coef: Vec<f64>, intercept: f64) -> Self {
        Self {
            coef,
            intercept,
            classes: default_classes(),
        }
    }

    fn decision(&self, features: &FeatureVector) -> f64 {
        features.dot(&self.coef) + self.intercept
    }

    /// Check weights are finite and classes are exactly FAKE then REAL
    pub fn validate(&self) -> Result<(), String> {
        if self.classes != default_classes() {
            return Err(format!("classes must be [0, 1], found {:?}", self.classes));
        }
        if let Some(pos) = self.coef.iter().position(|w| !w.is_finite()) {
            return Err(format!("coefficient at index {} is not finite", pos));
        }
        if !self.intercept.is_finite() {
            return Err("intercept is not finite".to_string());
        }
        Ok(())
    }
}

impl Classifier for LinearClassifier {
    fn classify(&self, features: &FeatureVector) -> Label {
        let decision = self.decision(features);
        let position = usize::from(decision > 0.0);
        tracing::trace!(decision, "linear decision");
        // `validate` guarantees classes == [0, 1] for loaded models
        self.classes
            .get(position)
            .copied()
            .and_then(Label::from_class_index)
            .unwrap_or(Label::Fake)
    }

    fn dimension(&self) -> usize {
        self.coef.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BTreeMap;

    fn features(entries: &[(usize, f64)]) -> FeatureVector {
        FeatureVector::from_entries(3, entries.iter().copied().collect::<BTreeMap<_, _>>())
    }

    #[test]
    fn test_decision_boundary() {
        let clf = LinearClassifier::new(vec![1.0, -2.0, 0.5], 0.0);
        assert_eq!(clf.classify(&features(&[(0, 1.0)])), Label::Real);
        assert_eq!(clf.classify(&features(&[(1, 1.0)])), Label::Fake);
        // Exactly zero falls on the first class
        assert_eq!(clf.classify(&features(&[(0, 1.0), (2, -2.0)])), Label::Fake);
    }

    #[test]
    fn test_intercept_decides_empty_vector() {
        let empty = features(&[]);
        assert_eq!(LinearClassifier::new(vec![0.0; 3], 0.25).classify(&empty), Label::Real);
        assert_eq!(LinearClassifier::new(vec![0.0; 3], -0.25).classify(&empty), Label::Fake);
    }

    #[test]
    fn test_validate() {
        assert!(LinearClassifier::new(vec![1.0], 0.0).validate().is_ok());

        let mut bad = LinearClassifier::new(vec![1.0], 0.0);
        bad.classes = vec![1, 0];
        assert!(bad.validate().is_err());

        assert!(LinearClassifier::new(vec![f64::INFINITY], 0.0).validate().is_err());
        assert!(LinearClassifier::new(vec![1.0], f64::NAN).validate().is_err());
    }
}
