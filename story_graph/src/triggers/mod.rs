//! Trigger rule documents - free-text reactions declared alongside the story.

mod action;

pub use action::*;

use serde::{Deserialize, Serialize};

use crate::de::{null_as_default, skip_invalid};
use crate::DocumentError;

/// A pattern-matched reaction to free-text input, as written in the trigger document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct RuleDef {
    /// Opaque identifier, used only for analytics. Not required to be unique.
    #[serde(default)]
    pub id: Option<String>,

    /// Case-insensitive regular expressions; any match fires the rule.
    #[serde(default, deserialize_with = "skip_invalid")]
    pub patterns: Vec<String>,

    /// Actions executed in declaration order when the rule fires. An action that
    /// does not fit its type's shape reads as [`Action::Unknown`].
    #[serde(default, deserialize_with = "lenient_actions")]
    pub actions: Vec<Action>,
}

impl RuleDef {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Self::default()
        }
    }

    pub fn with_pattern(mut self, pattern: impl Into<String>) -> Self {
        self.patterns.push(pattern.into());
        self
    }

    pub fn with_action(mut self, action: Action) -> Self {
        self.actions.push(action);
        self
    }
}

/// The whole trigger document. Rules are in priority (declaration) order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TriggerDocument {
    /// Rules that are not objects of the expected shape are skipped.
    #[serde(default, deserialize_with = "skip_invalid")]
    pub rules: Vec<RuleDef>,
}

fn lenient_actions<'de, D>(deserializer: D) -> Result<Vec<Action>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let values: Vec<serde_json::Value> = null_as_default(deserializer)?;
    Ok(values
        .into_iter()
        .map(|value| serde_json::from_value(value).unwrap_or(Action::Unknown))
        .collect())
}

impl TriggerDocument {
    /// Parse a trigger document. A document without `rules` is an empty rule set.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        Ok(serde_json::from_str(json)?)
    }
}
