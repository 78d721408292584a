//! Compiled text patterns - the predicate a trigger rule tests input against.

use regex::{Regex, RegexBuilder};
use thiserror::Error;

/// A rule pattern that could not be compiled. The pattern is dropped, the rule survives.
#[derive(Debug, Clone, Error)]
#[error("rule {rule}: invalid pattern {pattern:?}: {reason}")]
pub struct MalformedPatternError {
    /// Rule identifier, or its position when the rule has none.
    pub rule: String,
    pub pattern: String,
    pub reason: String,
}

/// A case-insensitive pattern with substring search semantics.
#[derive(Debug, Clone)]
pub struct TextPattern {
    source: String,
    regex: Regex,
}

impl TextPattern {
    /// Compile a pattern string.
    pub fn compile(source: &str) -> Result<Self, regex::Error> {
        let regex = RegexBuilder::new(source).case_insensitive(true).build()?;
        Ok(Self {
            source: source.to_string(),
            regex,
        })
    }

    /// Whether the pattern occurs anywhere in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.is_match(text)
    }

    /// The pattern as written in the trigger document.
    pub fn source(&self) -> &str {
        &self.source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_case_insensitive_match() {
        let pattern = TextPattern::compile("why").unwrap();
        assert!(pattern.is_match("WHY is that"));
        assert!(pattern.is_match("but why?"));
        assert!(!pattern.is_match("how come"));
    }

    #[test]
    fn test_substring_search() {
        let pattern = TextPattern::compile(r"\bdoor\b").unwrap();
        assert!(pattern.is_match("open the door please"));
        assert!(!pattern.is_match("doorway"));
    }

    #[test]
    fn test_invalid_pattern() {
        assert!(TextPattern::compile("(unclosed").is_err());
    }

    #[test]
    fn test_source_kept() {
        let pattern = TextPattern::compile("wh(y|ere)").unwrap();
        assert_eq!(pattern.source(), "wh(y|ere)");
    }
}
