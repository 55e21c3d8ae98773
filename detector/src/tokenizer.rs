// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2024 Hyperpolymath

//! Word tokenizer following Penn Treebank conventions
//!
//! Text is first split into sentences, then each sentence is tokenized with
//! the Treebank rules: quotes are rewritten to `` and '', punctuation is split
//! off, clitics ('s, 'll, n't, ...) are separated from their host word and a
//! handful of fused forms (cannot, gonna, ...) are split in two.
//!
//! The trained pipeline was fit on tokens produced this way, so changing any
//! rule here changes the model's input distribution.

use regex::Regex;
use std::sync::LazyLock;

/// A rewrite rule: pattern plus replacement template
struct Rule {
    pattern: Regex,
    replacement: &'static str,
}

fn rule(pattern: &str, replacement: &'static str) -> Rule {
    Rule {
        pattern: Regex::new(pattern).expect("tokenizer rule is a valid regex"),
        replacement,
    }
}

fn apply(rules: &[Rule], text: String) -> String {
    rules.iter().fold(text, |acc, r| {
        r.pattern.replace_all(&acc, r.replacement).into_owned()
    })
}

static STARTING_QUOTES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule(r"([«“‘„]|`+)", " $1 "),
        rule(r#"^""#, "``"),
        rule(r"(``)", " $1 "),
        rule(r#"([ (\[{<])("|'')"#, "$1 `` "),
    ]
});

static PUNCTUATION: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule(r"([:,])([^\d])", " $1 $2"),
        rule(r"([:,])$", " $1 "),
        rule(r"\.{2,}", " $0 "),
        rule(r"[;@#$%&]", " $0 "),
        rule(r#"([^.])(\.)([\])}>"']*)\s*$"#, "$1 $2$3 "),
        rule(r"[?!]", " $0 "),
        rule(r"([^'])' ", "$1 ' "),
        rule(r"\*", " $0 "),
    ]
});

static BRACKETS_AND_DASHES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![rule(r"[\]\[(){}<>]", " $0 "), rule(r"--", " -- ")]
});

static ENDING_QUOTES: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule(r"([»”’])", " $1 "),
        rule(r"''", " '' "),
        rule(r#"""#, " '' "),
        rule(r"([^' ])('[sS]|'[mM]|'[dD]|') ", "$1 $2 "),
        rule(r"([^' ])('ll|'LL|'re|'RE|'ve|'VE|n't|N'T) ", "$1 $2 "),
    ]
});

static CONTRACTIONS: LazyLock<Vec<Rule>> = LazyLock::new(|| {
    vec![
        rule(r"(?i)\b(can)(not)\b", " $1 $2 "),
        rule(r"(?i)\b(d)('ye)\b", " $1 $2 "),
        rule(r"(?i)\b(gim)(me)\b", " $1 $2 "),
        rule(r"(?i)\b(gon)(na)\b", " $1 $2 "),
        rule(r"(?i)\b(got)(ta)\b", " $1 $2 "),
        rule(r"(?i)\b(lem)(me)\b", " $1 $2 "),
        rule(r"(?i)\b(more)('n)\b", " $1 $2 "),
        rule(r"(?i)\b(wan)(na)\b", " $1 $2 "),
        rule(r"(?i) ('t)(is)\b", " $1 $2 "),
        rule(r"(?i) ('t)(was)\b", " $1 $2 "),
    ]
});

/// Sentence terminator followed by optional closing quotes/brackets and whitespace
static SENTENCE_END: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"[.?!]["')\]]*\s+"#).expect("sentence boundary is a valid regex")
});

/// Abbreviations whose trailing period does not end a sentence
const ABBREVIATIONS: &[&str] = &[
    "mr", "mrs", "ms", "dr", "prof", "sr", "jr", "st", "mt", "gen", "gov", "sen", "rep",
    "lt", "col", "sgt", "capt", "rev", "hon", "inc", "ltd", "co", "corp", "vs", "etc",
    "no", "fig", "jan", "feb", "mar", "apr", "jun", "jul", "aug", "sep", "sept", "oct",
    "nov", "dec", "u.s", "u.k", "u.n", "e.g", "i.e", "a.m", "p.m", "d.c",
];

fn ends_with_abbreviation(prefix: &str) -> bool {
    let Some(word) = prefix.split_whitespace().last() else {
        return false;
    };
    let word = word.trim_start_matches(|c: char| !c.is_alphanumeric());
    let lower = word.to_lowercase();

    // Single-letter initials such as "J." in "J. Smith"
    if lower.chars().count() == 1 && lower.chars().all(char::is_alphabetic) {
        return true;
    }
    ABBREVIATIONS.contains(&lower.as_str())
}

/// Split text into sentences at terminal punctuation followed by whitespace
pub fn split_sentences(text: &str) -> Vec<&str> {
    let mut sentences = Vec::new();
    let mut start = 0;

    for m in SENTENCE_END.find_iter(text) {
        if text[m.start()..].starts_with('.') && ends_with_abbreviation(&text[start..m.start()]) {
            continue;
        }
        let sentence = text[start..m.end()].trim();
        if !sentence.is_empty() {
            sentences.push(sentence);
        }
        start = m.end();
    }

    let rest = text[start..].trim();
    if !rest.is_empty() {
        sentences.push(rest);
    }
    sentences
}

/// Tokenize a single sentence with the Treebank rules
pub fn tokenize_sentence(sentence: &str) -> Vec<String> {
    let text = apply(&STARTING_QUOTES, sentence.to_string());
    let text = apply(&PUNCTUATION, text);
    let text = apply(&BRACKETS_AND_DASHES, text);
    let text = apply(&ENDING_QUOTES, format!(" {} ", text));
    let text = apply(&CONTRACTIONS, text);

    text.split_whitespace().map(str::to_string).collect()
}

/// Tokenize text into word tokens
pub fn word_tokenize(text: &str) -> Vec<String> {
    split_sentences(text)
        .into_iter()
        .flat_map(tokenize_sentence)
        .collect()
}
