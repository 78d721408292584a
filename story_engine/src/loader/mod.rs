//! Content Loader - reads the story and trigger documents and compiles the rules.
//!
//! The story document is mandatory: any failure there aborts the load. The
//! trigger document is optional: any failure there degrades to an empty rule set
//! so the story stays playable without free-text reactions.

use std::path::PathBuf;
use thiserror::Error;

use story_graph::{DocumentError, StoryGraph, TriggerDocument};

use crate::config::StoryConfig;
use crate::matcher::{MalformedPatternError, RuleSet};

/// Fatal load failure. The session cannot start.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read story document {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid story document: {0}")]
    Document(#[from] DocumentError),
}

/// Recoverable trigger document failure. Free text then always misses.
#[derive(Debug, Error)]
pub enum TriggerLoadError {
    #[error("no trigger document provided")]
    Missing,

    #[error("failed to read trigger document {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("invalid trigger document: {0}")]
    Document(#[from] DocumentError),
}

/// Where the two documents come from.
#[derive(Debug, Clone)]
pub enum ContentSource {
    Files {
        story: PathBuf,
        triggers: Option<PathBuf>,
    },
    Inline {
        story: String,
        triggers: Option<String>,
    },
}

/// Everything a session needs, produced once per load.
#[derive(Debug)]
pub struct Content {
    pub graph: StoryGraph,
    pub rules: RuleSet,

    /// Why the rule set is empty, if the trigger document could not be used.
    pub trigger_error: Option<TriggerLoadError>,

    /// Patterns dropped during rule compilation.
    pub malformed_patterns: Vec<MalformedPatternError>,
}

/// Loads [`Content`] from a [`ContentSource`].
#[derive(Debug, Clone)]
pub struct ContentLoader {
    source: ContentSource,
}

impl ContentLoader {
    pub fn new(source: ContentSource) -> Self {
        Self { source }
    }

    /// Load from the document paths named in `config`.
    pub fn from_config(config: &StoryConfig) -> Self {
        Self::new(ContentSource::Files {
            story: config.story_path.clone(),
            triggers: Some(config.triggers_path.clone()),
        })
    }

    /// Load from in-memory documents.
    pub fn inline(story: impl Into<String>, triggers: Option<String>) -> Self {
        Self::new(ContentSource::Inline {
            story: story.into(),
            triggers,
        })
    }

    /// Load and validate both documents.
    pub fn load(&self) -> Result<Content, LoadError> {
        let graph = StoryGraph::from_json(&self.read_story()?)?;

        for dangling in graph.dangling_choices() {
            tracing::warn!(
                "Choice {} of scene {} points at unknown scene {}",
                dangling.index,
                dangling.scene,
                dangling.target
            );
        }
        if !graph.contains(graph.start()) {
            tracing::warn!("Start scene {} does not exist", graph.start());
        }

        let (rules, malformed_patterns, trigger_error) = match self.read_triggers() {
            Ok(doc) => {
                let (rules, malformed) = RuleSet::compile(doc);
                (rules, malformed, None)
            }
            Err(err) => {
                tracing::warn!("Continuing without trigger rules: {}", err);
                (RuleSet::empty(), Vec::new(), Some(err))
            }
        };

        tracing::info!(
            "Loaded {} scenes and {} trigger rules (start: {})",
            graph.scene_count(),
            rules.len(),
            graph.start()
        );

        Ok(Content {
            graph,
            rules,
            trigger_error,
            malformed_patterns,
        })
    }

    fn read_story(&self) -> Result<String, LoadError> {
        match &self.source {
            ContentSource::Files { story, .. } => {
                std::fs::read_to_string(story).map_err(|source| LoadError::Io {
                    path: story.clone(),
                    source,
                })
            }
            ContentSource::Inline { story, .. } => Ok(story.clone()),
        }
    }

    fn read_triggers(&self) -> Result<TriggerDocument, TriggerLoadError> {
        let json = match &self.source {
            ContentSource::Files {
                triggers: Some(path),
                ..
            } => std::fs::read_to_string(path).map_err(|source| TriggerLoadError::Io {
                path: path.clone(),
                source,
            })?,
            ContentSource::Inline {
                triggers: Some(json),
                ..
            } => json.clone(),
            _ => return Err(TriggerLoadError::Missing),
        };

        Ok(TriggerDocument::from_json(&json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use story_graph::SceneId;

    const STORY: &str = r#"{
        "start": "a",
        "scenes": {
            "a": {"title": "A", "text": "x", "choices": [{"label": "Go", "next": "b"}]},
            "b": {"title": "B", "text": "y"}
        }
    }"#;

    const TRIGGERS: &str = r#"{
        "rules": [
            {"id": "why", "patterns": ["why", "("], "actions": []}
        ]
    }"#;

    #[test]
    fn test_load_inline() {
        let content = ContentLoader::inline(STORY, Some(TRIGGERS.to_string()))
            .load()
            .unwrap();

        assert_eq!(content.graph.start(), &SceneId::new("a"));
        assert_eq!(content.rules.len(), 1);
        assert!(content.trigger_error.is_none());
        assert_eq!(content.malformed_patterns.len(), 1);
        assert!(content.rules.find_match("why not").is_some());
    }

    #[test]
    fn test_missing_triggers_degrade() {
        let content = ContentLoader::inline(STORY, None).load().unwrap();

        assert_eq!(content.graph.scene_count(), 2);
        assert!(content.rules.is_empty());
        assert!(matches!(content.trigger_error, Some(TriggerLoadError::Missing)));
    }

    #[test]
    fn test_null_scene_fields_load() {
        let story = r#"{"start":"a","scenes":{"a":{"title":"A","text":"x","tags":null,"choices":null}}}"#;
        let content = ContentLoader::inline(story, None).load().unwrap();

        let a = content.graph.get(&SceneId::new("a")).unwrap();
        assert!(a.tags.is_empty());
        assert!(a.choices.is_empty());
    }

    #[test]
    fn test_bad_action_keeps_other_rules() {
        let triggers = r#"{
            "rules": [
                {"id": "good", "patterns": ["hello"], "actions": [{"type": "message", "text": "Hi"}]},
                {"id": "bad", "patterns": ["oops"], "actions": [{"type": "recommend", "choices": 3}]}
            ]
        }"#;
        let content = ContentLoader::inline(STORY, Some(triggers.to_string()))
            .load()
            .unwrap();

        assert!(content.trigger_error.is_none());
        assert_eq!(content.rules.len(), 2);
        let rule = content.rules.find_match("well hello").unwrap();
        assert_eq!(rule.id.as_deref(), Some("good"));
    }

    #[test]
    fn test_invalid_triggers_degrade() {
        let content = ContentLoader::inline(STORY, Some("{oops".to_string()))
            .load()
            .unwrap();

        assert!(content.rules.is_empty());
        assert!(matches!(
            content.trigger_error,
            Some(TriggerLoadError::Document(_))
        ));
    }

    #[test]
    fn test_invalid_story_is_fatal() {
        let result = ContentLoader::inline("[]", Some(TRIGGERS.to_string())).load();
        assert!(matches!(result, Err(LoadError::Document(_))));

        let result = ContentLoader::inline(r#"{"start": "a"}"#, None).load();
        assert!(matches!(
            result,
            Err(LoadError::Document(DocumentError::MissingScenes))
        ));
    }

    #[test]
    fn test_bundled_content_loads() {
        let content = ContentLoader::inline(
            include_str!("../../../content/story.json"),
            Some(include_str!("../../../content/triggers.json").to_string()),
        )
        .load()
        .unwrap();

        assert!(content.graph.contains(content.graph.start()));
        assert!(content.graph.dangling_choices().is_empty());
        assert!(content.malformed_patterns.is_empty());
        assert_eq!(content.rules.len(), 3);
    }

    #[test]
    fn test_load_files() {
        let dir = tempfile::tempdir().unwrap();
        let story = dir.path().join("story.json");
        std::fs::write(&story, STORY).unwrap();

        let loader = ContentLoader::new(ContentSource::Files {
            story: story.clone(),
            triggers: Some(dir.path().join("missing.json")),
        });
        let content = loader.load().unwrap();

        assert_eq!(content.graph.scene_count(), 2);
        assert!(matches!(
            content.trigger_error,
            Some(TriggerLoadError::Io { .. })
        ));
    }

    #[test]
    fn test_missing_story_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let loader = ContentLoader::new(ContentSource::Files {
            story: dir.path().join("story.json"),
            triggers: None,
        });

        assert!(matches!(loader.load(), Err(LoadError::Io { .. })));
    }
}
