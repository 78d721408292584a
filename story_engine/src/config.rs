//! Session configuration, read from TOML.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

use story_graph::Tone;

use crate::markup::Markup;
use crate::notes::DEFAULT_NOTE_CAPACITY;

/// Response shown when free text matches no rule.
pub const DEFAULT_MISS_MESSAGE: &str =
    "*\"I can work with that. Try a why/how/where, or pick an option above.\"*";

/// Note appended to a response that recommends choices.
pub const HIGHLIGHT_NOTE: &str = "Recommended options highlighted.";

/// Errors from reading configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),
}

/// Where notes go and how many are kept.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct NotesConfig {
    /// File to keep notes in. Notes stay in memory when unset.
    pub path: Option<PathBuf>,
    pub capacity: usize,
}

impl Default for NotesConfig {
    fn default() -> Self {
        Self {
            path: None,
            capacity: DEFAULT_NOTE_CAPACITY,
        }
    }
}

/// Configuration for loading content and running a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoryConfig {
    pub story_path: PathBuf,
    pub triggers_path: PathBuf,

    /// Tone a session starts with.
    pub tone: Tone,

    pub miss_message: String,

    /// Value of the `where` field on `debug_emit` events.
    pub debug_location: String,

    /// How scene and response text is rendered by the player.
    pub markup: Markup,

    pub notes: NotesConfig,
}

impl Default for StoryConfig {
    fn default() -> Self {
        Self {
            story_path: PathBuf::from("content/story.json"),
            triggers_path: PathBuf::from("content/triggers.json"),
            tone: Tone::default(),
            miss_message: DEFAULT_MISS_MESSAGE.to_string(),
            debug_location: "story_footer".to_string(),
            markup: Markup::default(),
            notes: NotesConfig::default(),
        }
    }
}

impl StoryConfig {
    /// Parse configuration from a TOML string. Missing fields take their defaults.
    pub fn from_toml_str(toml: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml)?)
    }

    /// Read configuration from a TOML file.
    ///
    /// Relative content and note paths are resolved against the file's directory.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let toml = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_toml_str(&toml)?;

        match path.parent() {
            Some(base) => Ok(config.relative_to(base)),
            None => Ok(config),
        }
    }

    fn relative_to(mut self, base: &Path) -> Self {
        self.story_path = base.join(&self.story_path);
        self.triggers_path = base.join(&self.triggers_path);
        self.notes.path = self.notes.path.map(|p| base.join(p));
        self
    }
}
