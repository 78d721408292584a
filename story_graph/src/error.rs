//! Errors raised while reading story documents or resolving scenes.

use thiserror::Error;

use crate::SceneId;

/// Errors from parsing and validating a story or trigger document.
#[derive(Debug, Error)]
pub enum DocumentError {
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("story document has no `scenes` mapping")]
    MissingScenes,
}

/// A scene identifier that does not resolve in the story graph.
///
/// Never fatal: callers render a placeholder instead of the scene.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown scene: {0}")]
pub struct UnknownSceneError(pub SceneId);
