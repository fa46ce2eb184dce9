//! Boundary-anchored keyword matching.
//!
//! A keyword hits only when it is not glued to another letter or digit on
//! either side, so "go" never matches inside "gopher" or "algorithm".
//! Hyphens, slashes, dots, and whitespace all count as boundaries, which lets
//! "react" hit in "react-native" while "ci/cd" and "next.js" stay literal.

use crate::error::{ClassifyError, Result};
use regex::Regex;

#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    keyword: String,
    pattern: Regex,
}

impl KeywordMatcher {
    pub fn new(keyword: &str) -> Result<Self> {
        let keyword = keyword.trim().to_lowercase();
        if keyword.is_empty() {
            return Err(ClassifyError::InvalidRuleTable("empty keyword".into()));
        }
        let pattern = Regex::new(&boundary_pattern(&keyword))
            .map_err(|source| ClassifyError::KeywordPattern { keyword: keyword.clone(), source })?;
        Ok(Self { keyword, pattern })
    }

    pub fn keyword(&self) -> &str {
        &self.keyword
    }

    pub fn is_match(&self, text: &str) -> bool {
        self.pattern.is_match(text)
    }
}

/// One-shot check; compiles the pattern on every call.
pub fn keyword_matches(keyword: &str, text: &str) -> Result<bool> {
    Ok(KeywordMatcher::new(keyword)?.is_match(text))
}

fn boundary_pattern(keyword: &str) -> String {
    format!(r"(?i)(?:^|[^\p{{L}}\p{{N}}]){}(?:$|[^\p{{L}}\p{{N}}])", regex::escape(keyword))
}
