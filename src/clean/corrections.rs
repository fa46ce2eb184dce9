//! Correction tables for descriptions mangled by an earlier export bug that
//! replaced some letters (mostly `r` and `n`) with spaces.
//!
//! Fragments are matched case-insensitively and literally. Fragments that
//! begin or end with a letter are anchored at a word boundary on that side,
//! so `a d` fixes "a d" without touching "a data".

use once_cell::sync::Lazy;
use regex::Regex;

/// Known corrupted fragments and their repaired text.
pub const WORD_CORRECTIONS: &[(&str, &str)] = &[
    ("E gi ee i g", "Engineering"),
    ("data e gi ee i g", "data engineering"),
    ("f ee", "free"),
    ("i e-week", "nine-week"),
    ("cou se", "course"),
    ("cove s", "covers"),
    ("fu dame tals", "fundamentals"),
    ("Ready-to- u ", "Ready-to-run"),
    ("fo ", "for "),
    ("pipeli es", "pipelines"),
    ("a d", "and"),
    ("e te p ise", "enterprise"),
    ("sea ch", "search"),
    ("Sha epoi t", "SharePoint"),
    ("D ive", "Drive"),
    ("Postg eSQL", "PostgreSQL"),
    ("eal-time", "real-time"),
    ("mo e", "more"),
    ("Te so Flow", "TensorFlow"),
    ("Tuto ial", "Tutorial"),
    ("Begi  e s", "Beginners"),
    ("suppo t", "support"),
    ("Impleme t", "Implement"),
    ("PyTo ch", "PyTorch"),
    ("f om", "from"),
    ("sc atch", "scratch"),
    ("Pytho ", "Python"),
    ("Scie ce", "Science"),
    ("Ha dbook", "Handbook"),
    ("Jupyte ", "Jupyter"),
    ("Ze o", "Zero"),
    ("Millio ", "Million"),
    ("Sto e", "Store"),
    ("Dukaa ", "Dukaani"),
    ("Deg ee", "Degree"),
    ("Choudha y", "Choudhary"),
    ("esou ces", "resources"),
    ("eed", "need"),
    ("Se io ", "Senior"),
    ("E gi ee ", "Engineer"),
    ("beyo d", "beyond"),
];

/// Short words split by a single space.
pub const SPLIT_WORDS: &[(&str, &str)] = &[("i n", "in"), ("o n", "on"), ("a n", "an")];

/// Words that, with an `r` re-inserted between two tokens, are restored.
pub const COMMON_R_WORDS: &[&str] =
    &["for", "their", "from", "are", "more", "your", "our", "or", "every", "other"];

pub struct Correction {
    pub pattern: Regex,
    pub replacement: &'static str,
}

/// Corrections ordered longest fragment first so specific repairs win.
pub static CORRECTIONS: Lazy<Vec<Correction>> = Lazy::new(|| {
    let mut table: Vec<&(&str, &str)> = WORD_CORRECTIONS.iter().chain(SPLIT_WORDS).collect();
    table.sort_by(|a, b| b.0.len().cmp(&a.0.len()));
    table
        .into_iter()
        .map(|&(fragment, replacement)| Correction {
            pattern: fragment_pattern(fragment),
            replacement,
        })
        .collect()
});

/// Signals that a description was mangled.
pub static CORRUPTION_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"\s{2,}").expect("valid regex"),
        Regex::new(r"\b[a-z] [a-z] [a-z]").expect("valid regex"),
        Regex::new(r"\b[a-z] {2,}[a-z]").expect("valid regex"),
    ]
});

pub static KNOWN_FRAGMENTS: Lazy<Vec<Regex>> = Lazy::new(|| {
    WORD_CORRECTIONS.iter().map(|(fragment, _)| fragment_pattern(fragment)).collect()
});

pub static WHITESPACE_RUN: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s{2,}").expect("valid regex"));

fn fragment_pattern(fragment: &str) -> Regex {
    let starts_word = fragment.chars().next().is_some_and(char::is_alphanumeric);
    let ends_word = fragment.chars().last().is_some_and(char::is_alphanumeric);
    let pattern = format!(
        "(?i){}{}{}",
        if starts_word { r"\b" } else { "" },
        regex::escape(fragment),
        if ends_word { r"\b" } else { "" },
    );
    Regex::new(&pattern).expect("valid regex")
}
