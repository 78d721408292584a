//! Action Interpreter - folds a rule's ordered actions into a single response.
//!
//! Actions run strictly in declaration order and their effects accumulate:
//! messages and tag emissions keep their order, recommendations are merged, and
//! each `navigate` overwrites the pending target so the last one wins. Navigation
//! itself is not performed here; the session applies it after the response has
//! been displayed.

use serde::{Deserialize, Serialize};

use story_graph::{Action, Scene, SceneId, Tone};

/// Accumulated effects of one action list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct InterpreterResult {
    /// Tone-selected message texts, in order. Empty selections are skipped.
    pub messages: Vec<String>,

    /// Choice labels to emphasize, in the order they were recommended.
    pub highlights: Vec<String>,

    /// Each `tag_emit` action's tags, in order.
    pub tag_emits: Vec<Vec<String>>,

    /// Scene to enter once the response is shown.
    pub navigate_to: Option<SceneId>,
}

impl InterpreterResult {
    /// Whether the actions produced anything to display.
    pub fn has_response(&self) -> bool {
        !self.messages.is_empty() || !self.highlights.is_empty()
    }

    /// Indices of `scene`'s choices whose labels were recommended.
    ///
    /// Labels match by exact text, ignoring case. Labels with no such choice are
    /// silently ignored.
    pub fn highlighted_indices(&self, scene: &Scene) -> Vec<usize> {
        scene
            .choices
            .iter()
            .enumerate()
            .filter(|(_, choice)| self.highlights.iter().any(|l| choice.label_matches(l)))
            .map(|(index, _)| index)
            .collect()
    }
}

/// Execute `actions` under `tone`.
pub fn execute(actions: &[Action], tone: Tone) -> InterpreterResult {
    let mut result = InterpreterResult::default();

    for action in actions {
        match action {
            Action::Message { .. } => {
                if let Some(text) = action.message_text(tone) {
                    result.messages.push(text.to_string());
                }
            }
            Action::Recommend { choices } => {
                result.highlights.extend(choices.iter().cloned());
            }
            Action::TagEmit { tags } => {
                result.tag_emits.push(tags.clone());
            }
            Action::Navigate { .. } => {
                if let Some(target) = action.navigation_target() {
                    result.navigate_to = Some(target.clone());
                }
            }
            Action::Unknown => {
                tracing::debug!("Skipping unknown action");
            }
        }
    }

    result
}
