//! Analytics events emitted by a story session.
//!
//! Every event serializes flat as `{event, timestamp, session, ...fields}` so it can
//! be pushed unchanged into a data layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use story_graph::SceneId;

/// Unique identifier for a story session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    /// Create a new random session ID.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Things that happen during a session, with their event-specific fields.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "event")]
pub enum StoryEvent {
    #[serde(rename = "story_init")]
    Init { start: SceneId },

    #[serde(rename = "scene_view")]
    SceneView {
        scene: SceneId,
        choices: usize,
        tags: Vec<String>,
    },

    #[serde(rename = "story_choice")]
    Choice {
        from: SceneId,
        to: SceneId,
        label: String,
        idx: usize,
        from_tags: Vec<String>,
        to_tags: Vec<String>,
    },

    #[serde(rename = "story_back")]
    Back { from: SceneId, to: SceneId },

    #[serde(rename = "story_restart")]
    Restart { from: SceneId, to: SceneId },

    #[serde(rename = "free_input")]
    FreeInput { scene: SceneId, text_len: usize },

    #[serde(rename = "rule_fired")]
    RuleFired { rule: Option<String> },

    #[serde(rename = "rule_miss")]
    RuleMiss,

    #[serde(rename = "input_tag_emit")]
    TagEmit { tags: Vec<String> },

    #[serde(rename = "input_navigate")]
    InputNavigate {
        from: SceneId,
        to: SceneId,
        from_tags: Vec<String>,
        to_tags: Vec<String>,
    },

    #[serde(rename = "reassess")]
    Reassess { scene: SceneId },

    #[serde(rename = "debug_emit")]
    DebugEmit {
        #[serde(rename = "where")]
        location: String,
    },
}

impl StoryEvent {
    /// The analytics event name.
    pub fn name(&self) -> &'static str {
        match self {
            StoryEvent::Init { .. } => "story_init",
            StoryEvent::SceneView { .. } => "scene_view",
            StoryEvent::Choice { .. } => "story_choice",
            StoryEvent::Back { .. } => "story_back",
            StoryEvent::Restart { .. } => "story_restart",
            StoryEvent::FreeInput { .. } => "free_input",
            StoryEvent::RuleFired { .. } => "rule_fired",
            StoryEvent::RuleMiss => "rule_miss",
            StoryEvent::TagEmit { .. } => "input_tag_emit",
            StoryEvent::InputNavigate { .. } => "input_navigate",
            StoryEvent::Reassess { .. } => "reassess",
            StoryEvent::DebugEmit { .. } => "debug_emit",
        }
    }
}

/// A story event stamped with time and session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Unix time in milliseconds.
    pub timestamp: i64,
    pub session: SessionId,
    #[serde(flatten)]
    pub event: StoryEvent,
}

impl AnalyticsEvent {
    /// Stamp `event` with the current time.
    pub fn now(session: SessionId, event: StoryEvent) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp_millis(),
            session,
            event,
        }
    }

    pub fn name(&self) -> &'static str {
        self.event.name()
    }

    /// The flat parameter mapping handed to a data layer.
    pub fn to_params(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or(serde_json::Value::Null)
    }
}

/// Receiver of analytics events.
pub trait AnalyticsSink {
    fn track(&mut self, event: AnalyticsEvent);
}

/// Keeps every event in memory, in emission order.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Vec<AnalyticsEvent>,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn events(&self) -> &[AnalyticsEvent] {
        &self.events
    }

    /// Event names in emission order.
    pub fn names(&self) -> Vec<&'static str> {
        self.events.iter().map(|e| e.name()).collect()
    }

    /// The most recent event with the given name.
    pub fn last_named(&self, name: &str) -> Option<&AnalyticsEvent> {
        self.events.iter().rev().find(|e| e.name() == name)
    }

    /// Drop everything recorded so far.
    pub fn clear(&mut self) {
        self.events.clear();
    }
}

impl AnalyticsSink for RecordingSink {
    fn track(&mut self, event: AnalyticsEvent) {
        self.events.push(event);
    }
}

/// Writes each event as a structured `tracing` record on the `story_analytics` target.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl AnalyticsSink for TracingSink {
    fn track(&mut self, event: AnalyticsEvent) {
        tracing::info!(
            target: "story_analytics",
            event = event.name(),
            session = %event.session,
            params = %event.to_params()
        );
    }
}
