//! Story graph - the immutable scene map a session navigates.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::de::null_as_default;
use crate::{Choice, DocumentError, Scene, SceneId, UnknownSceneError};

/// Scene used when the document names no start and has no better candidate.
pub const FALLBACK_START: &str = "start";

/// A choice whose target does not resolve to a scene.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DanglingChoice {
    pub scene: SceneId,
    pub index: usize,
    pub target: SceneId,
}

/// Mapping from scene identifier to scene, plus the resolved start.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoryGraph {
    start: SceneId,
    scenes: BTreeMap<SceneId, Scene>,
}

impl StoryGraph {
    /// Create an empty graph with an explicit start identifier.
    pub fn new(start: impl Into<SceneId>) -> Self {
        Self {
            start: start.into(),
            scenes: BTreeMap::new(),
        }
    }

    /// Add a scene, replacing any scene with the same identifier.
    pub fn with_scene(mut self, scene: Scene) -> Self {
        self.scenes.insert(scene.id.clone(), scene);
        self
    }

    /// Parse and validate a story document.
    ///
    /// Defaults are applied once here: missing or `null` titles and text are empty,
    /// missing or `null` tags and choices are empty, duplicate tags are dropped. A
    /// document without a `scenes` mapping is rejected.
    pub fn from_json(json: &str) -> Result<Self, DocumentError> {
        let doc: StoryDocument = serde_json::from_str(json)?;
        let defs = doc.scenes.ok_or(DocumentError::MissingScenes)?;
        let first = defs.keys().next().map(|id| SceneId::new(id.as_str()));

        let mut scenes = BTreeMap::new();
        for (id, value) in defs {
            let def: SceneDef = serde_json::from_value(value)?;
            let id = SceneId::new(id);
            scenes.insert(id.clone(), def.into_scene(id));
        }

        let start = resolve_start(doc.start, first, &scenes);
        Ok(Self { start, scenes })
    }

    /// The scene a session starts at and restarts to.
    pub fn start(&self) -> &SceneId {
        &self.start
    }

    /// Get a scene by ID.
    pub fn get(&self, id: &SceneId) -> Option<&Scene> {
        self.scenes.get(id)
    }

    /// Get a scene by ID, reporting the identifier when it does not resolve.
    pub fn resolve(&self, id: &SceneId) -> Result<&Scene, UnknownSceneError> {
        self.scenes
            .get(id)
            .ok_or_else(|| UnknownSceneError(id.clone()))
    }

    pub fn contains(&self, id: &SceneId) -> bool {
        self.scenes.contains_key(id)
    }

    /// Tags of a scene, or an empty slice for unknown scenes.
    pub fn tags_of(&self, id: &SceneId) -> &[String] {
        self.scenes
            .get(id)
            .map(|s| s.tags.as_slice())
            .unwrap_or(&[])
    }

    /// Iterate over all scenes in identifier order.
    pub fn scenes(&self) -> impl Iterator<Item = &Scene> {
        self.scenes.values()
    }

    pub fn scene_count(&self) -> usize {
        self.scenes.len()
    }

    /// Every choice whose target is missing from the graph.
    pub fn dangling_choices(&self) -> Vec<DanglingChoice> {
        self.scenes
            .values()
            .flat_map(|scene| {
                scene
                    .choices
                    .iter()
                    .enumerate()
                    .filter(|(_, c)| !self.scenes.contains_key(&c.next))
                    .map(|(index, c)| DanglingChoice {
                        scene: scene.id.clone(),
                        index,
                        target: c.next.clone(),
                    })
            })
            .collect()
    }
}

/// Raw story document as written on disk.
#[derive(Debug, Deserialize)]
struct StoryDocument {
    #[serde(default)]
    start: Option<SceneId>,
    /// Kept in document order; the first scene is the last-resort start.
    #[serde(default)]
    scenes: Option<serde_json::Map<String, serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct SceneDef {
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    text: String,
    #[serde(default, deserialize_with = "null_as_default")]
    tags: Vec<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    choices: Vec<Choice>,
}

impl SceneDef {
    fn into_scene(self, id: SceneId) -> Scene {
        let scene = Scene {
            id,
            title: self.title,
            text: self.text,
            choices: self.choices,
            tags: Vec::new(),
        };
        self.tags.into_iter().fold(scene, Scene::with_tag)
    }
}

fn resolve_start(
    declared: Option<SceneId>,
    first: Option<SceneId>,
    scenes: &BTreeMap<SceneId, Scene>,
) -> SceneId {
    if let Some(start) = declared.filter(|s| !s.is_empty()) {
        return start;
    }

    let fallback = SceneId::new(FALLBACK_START);
    if scenes.contains_key(&fallback) {
        return fallback;
    }

    first.unwrap_or(fallback)
}
