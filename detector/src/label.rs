// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Binary prediction label

use serde::{Deserialize, Serialize};
use std::fmt;

/// Verdict for a single article
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Label {
    /// Content identified as fake (class 0)
    Fake,
    /// Content identified as real (class 1)
    Real,
}

impl Label {
    /// Class index used by the trained classifier
    pub fn class_index(&self) -> u8 {
        match self {
            Label::Fake => 0,
            Label::Real => 1,
        }
    }

    /// Map a classifier class index back to a label
    pub fn from_class_index(value: u8) -> Option<Self> {
        match value {
            0 => Some(Label::Fake),
            1 => Some(Label::Real),
            _ => None,
        }
    }

    /// One-line verdict shown to the user
    pub fn headline(&self) -> &'static str {
        match self {
            Label::Real => "This news article is REAL.",
            Label::Fake => "This news article is FAKE.",
        }
    }

    /// Follow-up line shown under the verdict
    pub fn advice(&self) -> &'static str {
        match self {
            Label::Real => "The content appears to be factually accurate based on real news patterns.",
            Label::Fake => "This content may be misleading or contain misinformation.",
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Label::Fake => write!(f, "FAKE"),
            Label::Real => write!(f, "REAL"),
        }
    }
}
