//! Actions fired by a matched trigger rule.

use serde::{Deserialize, Serialize};

use crate::de::null_as_default;
use crate::SceneId;

/// Presentation mode selecting among alternate message texts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Gentle,
    Snark,
}

impl Tone {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tone::Gentle => "gentle",
            Tone::Snark => "snark",
        }
    }
}

impl std::fmt::Display for Tone {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Tone {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "gentle" => Ok(Tone::Gentle),
            "snark" => Ok(Tone::Snark),
            other => Err(format!("unknown tone: {}", other)),
        }
    }
}

/// A single step of a rule's reaction, tagged by `type` in the trigger document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Tone-selected text to display.
    Message {
        text: Option<String>,
        text_gentle: Option<String>,
        text_snark: Option<String>,
    },

    /// Choice labels to visually emphasize.
    Recommend {
        #[serde(default, deserialize_with = "null_as_default")]
        choices: Vec<String>,
    },

    /// Analytics-only signal.
    TagEmit {
        #[serde(default, deserialize_with = "null_as_default")]
        tags: Vec<String>,
    },

    /// Forced scene transition. A missing scene makes the action inert.
    Navigate { scene: Option<SceneId> },

    /// Any action type this engine does not know. Ignored when executed.
    #[serde(other)]
    Unknown,
}

impl Action {
    /// Create a message action with only the generic text.
    pub fn message(text: impl Into<String>) -> Self {
        Action::Message {
            text: Some(text.into()),
            text_gentle: None,
            text_snark: None,
        }
    }

    /// Create a message action with per-tone variants.
    pub fn toned_message(gentle: impl Into<String>, snark: impl Into<String>) -> Self {
        Action::Message {
            text: None,
            text_gentle: Some(gentle.into()),
            text_snark: Some(snark.into()),
        }
    }

    pub fn recommend<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Action::Recommend {
            choices: labels.into_iter().map(Into::into).collect(),
        }
    }

    pub fn tag_emit<I, S>(tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Action::TagEmit {
            tags: tags.into_iter().map(Into::into).collect(),
        }
    }

    pub fn navigate(scene: impl Into<SceneId>) -> Self {
        Action::Navigate {
            scene: Some(scene.into()),
        }
    }

    /// Select the text a message shows under `tone`.
    ///
    /// The tone-specific text wins over the generic `text`; empty strings count as absent.
    /// Returns `None` for non-message actions or when nothing is left to show.
    pub fn message_text(&self, tone: Tone) -> Option<&str> {
        let Action::Message {
            text,
            text_gentle,
            text_snark,
        } = self
        else {
            return None;
        };

        let toned = match tone {
            Tone::Gentle => text_gentle,
            Tone::Snark => text_snark,
        };

        non_empty(toned).or_else(|| non_empty(text))
    }

    /// Target of a navigate action, if it names a scene.
    pub fn navigation_target(&self) -> Option<&SceneId> {
        match self {
            Action::Navigate { scene: Some(id) } if !id.is_empty() => Some(id),
            _ => None,
        }
    }
}

fn non_empty(text: &Option<String>) -> Option<&str> {
    text.as_deref().filter(|t| !t.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_text_by_tone() {
        let action = Action::toned_message("hi", "yo");
        assert_eq!(action.message_text(Tone::Gentle), Some("hi"));
        assert_eq!(action.message_text(Tone::Snark), Some("yo"));
    }

    #[test]
    fn test_message_falls_back_to_generic_text() {
        let action = Action::Message {
            text: Some("plain".to_string()),
            text_gentle: None,
            text_snark: Some(String::new()),
        };
        assert_eq!(action.message_text(Tone::Gentle), Some("plain"));
        assert_eq!(action.message_text(Tone::Snark), Some("plain"));
    }

    #[test]
    fn test_empty_message_has_no_text() {
        let action = Action::Message {
            text: None,
            text_gentle: None,
            text_snark: None,
        };
        assert_eq!(action.message_text(Tone::Gentle), None);
        assert_eq!(Action::navigate("a").message_text(Tone::Gentle), None);
    }

    #[test]
    fn test_deserialize_tagged_actions() {
        let json = r#"[
            {"type": "message", "text": "hello"},
            {"type": "recommend", "choices": ["Go"]},
            {"type": "tag_emit", "tags": ["curious"]},
            {"type": "navigate", "scene": "b"},
            {"type": "confetti"}
        ]"#;
        let actions: Vec<Action> = serde_json::from_str(json).unwrap();

        assert_eq!(actions[0], Action::message("hello"));
        assert_eq!(actions[1], Action::recommend(["Go"]));
        assert_eq!(actions[2], Action::tag_emit(["curious"]));
        assert_eq!(actions[3], Action::navigate("b"));
        assert_eq!(actions[4], Action::Unknown);
    }

    #[test]
    fn test_navigate_without_scene_is_inert() {
        let action: Action = serde_json::from_str(r#"{"type": "navigate"}"#).unwrap();
        assert_eq!(action.navigation_target(), None);

        let empty: Action = serde_json::from_str(r#"{"type": "navigate", "scene": ""}"#).unwrap();
        assert_eq!(empty.navigation_target(), None);
    }

    #[test]
    fn test_tone_parsing() {
        assert_eq!("snark".parse::<Tone>(), Ok(Tone::Snark));
        assert_eq!(" Gentle ".parse::<Tone>(), Ok(Tone::Gentle));
        assert!("grumpy".parse::<Tone>().is_err());
        assert_eq!(Tone::default(), Tone::Gentle);
    }
}
