//! Choice definitions - labelled edges between scenes.

use serde::{Deserialize, Serialize};

use super::SceneId;

/// A labelled edge from one scene to another.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Choice {
    /// Text shown on the button.
    #[serde(default)]
    pub label: String,

    /// Target scene. May be dangling; see [`crate::StoryGraph::dangling_choices`].
    pub next: SceneId,
}

impl Choice {
    pub fn new(label: impl Into<String>, next: impl Into<SceneId>) -> Self {
        Self {
            label: label.into(),
            next: next.into(),
        }
    }

    /// Case-insensitive label comparison used for highlighting.
    pub fn label_matches(&self, label: &str) -> bool {
        self.label.to_lowercase() == label.to_lowercase()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_label_matches_ignores_case() {
        let choice = Choice::new("Ask Why", "why");
        assert!(choice.label_matches("ask why"));
        assert!(choice.label_matches("ASK WHY"));
        assert!(!choice.label_matches("ask"));
    }

    #[test]
    fn test_choice_label_defaults_to_empty() {
        let choice: Choice = serde_json::from_str(r#"{"next": "b"}"#).unwrap();
        assert_eq!(choice.label, "");
        assert_eq!(choice.next, SceneId::new("b"));
    }
}
