// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Noun lemmatizer
//!
//! Reduces plural nouns to their base form the way a WordNet noun lemmatizer
//! does: irregular plurals come from an exception table, regular plurals go
//! through suffix detachment rules. Tokens with upper-case letters or
//! non-letters are returned unchanged, as a dictionary lookup would miss them.

use std::collections::HashMap;
use std::sync::LazyLock;

static IRREGULAR_NOUNS: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    [
        ("men", "man"),
        ("women", "woman"),
        ("children", "child"),
        ("people", "people"),
        ("feet", "foot"),
        ("teeth", "tooth"),
        ("geese", "goose"),
        ("mice", "mouse"),
        ("lice", "louse"),
        ("oxen", "ox"),
        ("knives", "knife"),
        ("wives", "wife"),
        ("lives", "life"),
        ("criteria", "criterion"),
        ("phenomena", "phenomenon"),
        ("data", "datum"),
        ("media", "medium"),
        ("bacteria", "bacterium"),
        ("analyses", "analysis"),
        ("crises", "crisis"),
        ("theses", "thesis"),
        ("hypotheses", "hypothesis"),
        ("diagnoses", "diagnosis"),
        ("indices", "index"),
        ("matrices", "matrix"),
        ("vertices", "vertex"),
        ("appendices", "appendix"),
        ("alumni", "alumnus"),
        ("fungi", "fungus"),
        ("nuclei", "nucleus"),
        ("stimuli", "stimulus"),
        ("businessmen", "businessman"),
        ("chairmen", "chairman"),
        ("congressmen", "congressman"),
        ("policemen", "policeman"),
        ("firemen", "fireman"),
        ("spokesmen", "spokesman"),
        ("gentlemen", "gentleman"),
        ("fishermen", "fisherman"),
        ("servicemen", "serviceman"),
        ("gunmen", "gunman"),
        ("wolves", "wolf"),
        ("halves", "half"),
        ("shelves", "shelf"),
        ("leaves", "leaf"),
        ("loaves", "loaf"),
        ("thieves", "thief"),
        ("calves", "calf"),
        ("selves", "self"),
        ("elves", "elf"),
        ("scarves", "scarf"),
        ("goes", "go"),
        ("heroes", "hero"),
        ("potatoes", "potato"),
        ("tomatoes", "tomato"),
        ("vetoes", "veto"),
        ("echoes", "echo"),
    ]
    .into_iter()
    .collect()
});

/// Words ending in `s` that are already their own lemma
const INVARIANT: &[&str] = &[
    "news", "series", "species", "means", "physics", "economics", "politics",
    "mathematics", "ethics", "statistics", "athletics", "gymnastics", "lens",
    "has", "was", "its", "this", "thus", "always", "perhaps", "whereas", "towards",
    "afterwards", "sometimes", "besides", "nevertheless", "headquarters", "barracks",
    "gas", "bus", "yes", "his", "hers", "ours", "yours", "theirs", "bias", "chaos",
    "atlas", "alias", "canvas", "plus", "kudos", "ethos", "pathos", "cosmos",
];

/// Singular nouns whose plural is formed with `es` after a final `s`
const SES_STEMS: &[&str] = &[
    "bus", "gas", "bias", "alias", "atlas", "canvas", "lens", "plus", "virus",
    "bonus", "campus", "census", "status", "focus", "chorus", "circus", "surplus",
    "consensus", "prospectus", "apparatus", "iris",
];

/// Singular nouns ending in a single `z` whose plural doubles it
const ZES_STEMS: &[&str] = &["quiz", "whiz", "fez"];

/// Singular nouns ending in `ie`, whose plural would otherwise become `-y`
const IE_STEMS: &[&str] = &[
    "die", "tie", "lie", "pie", "movie", "cookie", "zombie", "calorie", "rookie",
    "brownie", "selfie", "hippie", "goalie", "prairie", "pixie", "sortie", "genie",
    "auntie", "newbie", "freebie", "smoothie", "hoodie", "veggie", "birdie",
];

/// Detachment rules tried in order: (suffix, replacement)
const SUFFIX_RULES: &[(&str, &str)] = &[
    ("sses", "ss"),
    ("xes", "x"),
    ("zzes", "zz"),
    ("ches", "ch"),
    ("shes", "sh"),
    ("ies", "y"),
    ("s", ""),
];

/// Suffixes of words that end in `s` but are not plurals
const SINGULAR_ENDINGS: &[&str] = &["ss", "us", "is", "ous"];

/// Return the lemma of a single token
pub fn lemmatize(token: &str) -> String {
    if !token.chars().all(|c| c.is_ascii_lowercase()) {
        return token.to_string();
    }
    if let Some(lemma) = IRREGULAR_NOUNS.get(token) {
        return lemma.to_string();
    }
    if token.len() <= 3 || INVARIANT.contains(&token) {
        return token.to_string();
    }
    if SINGULAR_ENDINGS.iter().any(|e| token.ends_with(e)) {
        return token.to_string();
    }
    if let Some(stem) = known_stem(token) {
        return stem.to_string();
    }

    for (suffix, replacement) in SUFFIX_RULES {
        if let Some(stem) = token.strip_suffix(suffix) {
            // Keep at least a two-letter stem ("ties" is handled above)
            if stem.len() < 2 {
                continue;
            }
            return format!("{}{}", stem, replacement);
        }
    }

    token.to_string()
}

/// Plurals whose stem is only valid for listed words: `ses -> s`,
/// `zzes -> z` and `ies -> ie`
fn known_stem(token: &str) -> Option<&str> {
    let candidates = [
        (token.strip_suffix("es"), SES_STEMS),
        (token.strip_suffix("zes"), ZES_STEMS),
        (token.strip_suffix('s'), IE_STEMS),
    ];
    candidates
        .into_iter()
        .find_map(|(stem, allowed)| stem.filter(|s| allowed.contains(s)))
}
