//! Local note log - a bounded record of free-text input.
//!
//! Writing a note never fails from the caller's point of view: storage problems
//! are logged and swallowed. When the log is full the oldest entries go first.

use serde::{Deserialize, Serialize};
use std::collections::VecDeque;
use std::path::PathBuf;

use story_graph::SceneId;

/// Default number of entries a note log retains.
pub const DEFAULT_NOTE_CAPACITY: usize = 100;

/// A single free-text submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NoteEntry {
    /// Unix time in milliseconds.
    #[serde(rename = "t")]
    pub timestamp: i64,
    pub scene: SceneId,
    pub text: String,
}

impl NoteEntry {
    /// Create an entry stamped with the current time.
    pub fn now(scene: SceneId, text: impl Into<String>) -> Self {
        Self {
            timestamp: chrono::Utc::now().timestamp_millis(),
            scene,
            text: text.into(),
        }
    }
}

/// Append-only, bounded note storage.
pub trait NoteLog {
    fn append(&mut self, entry: NoteEntry);
}

impl<T: NoteLog + ?Sized> NoteLog for Box<T> {
    fn append(&mut self, entry: NoteEntry) {
        (**self).append(entry);
    }
}

/// Keeps the most recent notes in memory.
#[derive(Debug, Clone)]
pub struct MemoryNoteLog {
    capacity: usize,
    entries: VecDeque<NoteEntry>,
}

impl MemoryNoteLog {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn entries(&self) -> impl Iterator<Item = &NoteEntry> {
        self.entries.iter()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Default for MemoryNoteLog {
    fn default() -> Self {
        Self::new(DEFAULT_NOTE_CAPACITY)
    }
}

impl NoteLog for MemoryNoteLog {
    fn append(&mut self, entry: NoteEntry) {
        push_bounded(&mut self.entries, entry, self.capacity);
    }
}

/// Keeps the most recent notes in a JSON array on disk.
///
/// The file is re-read on every append so several sessions can share it.
#[derive(Debug, Clone)]
pub struct FileNoteLog {
    path: PathBuf,
    capacity: usize,
}

impl FileNoteLog {
    pub fn new(path: impl Into<PathBuf>, capacity: usize) -> Self {
        Self {
            path: path.into(),
            capacity,
        }
    }

    /// Read the stored notes. A missing or unreadable file yields no notes.
    pub fn read_entries(&self) -> Vec<NoteEntry> {
        match std::fs::read_to_string(&self.path) {
            Ok(json) => serde_json::from_str(&json).unwrap_or_else(|err| {
                tracing::warn!("Ignoring corrupt note log {}: {}", self.path.display(), err);
                Vec::new()
            }),
            Err(_) => Vec::new(),
        }
    }

    fn try_append(&self, entry: NoteEntry) -> std::io::Result<()> {
        let mut entries: VecDeque<NoteEntry> = self.read_entries().into();
        push_bounded(&mut entries, entry, self.capacity);

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let json = serde_json::to_string(&entries)?;
        std::fs::write(&self.path, json)
    }
}

impl NoteLog for FileNoteLog {
    fn append(&mut self, entry: NoteEntry) {
        if let Err(err) = self.try_append(entry) {
            tracing::warn!("Could not write note log {}: {}", self.path.display(), err);
        }
    }
}

fn push_bounded(entries: &mut VecDeque<NoteEntry>, entry: NoteEntry, capacity: usize) {
    if capacity == 0 {
        return;
    }
    entries.push_back(entry);
    while entries.len() > capacity {
        entries.pop_front();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn note(text: &str) -> NoteEntry {
        NoteEntry::now(SceneId::new("a"), text)
    }

    #[test]
    fn test_memory_log_evicts_oldest() {
        let mut log = MemoryNoteLog::new(2);
        log.append(note("one"));
        log.append(note("two"));
        log.append(note("three"));

        let texts: Vec<_> = log.entries().map(|e| e.text.as_str()).collect();
        assert_eq!(texts, vec!["two", "three"]);
    }

    #[test]
    fn test_zero_capacity_keeps_nothing() {
        let mut log = MemoryNoteLog::new(0);
        log.append(note("one"));
        assert!(log.is_empty());
    }

    #[test]
    fn test_file_log_round_trip_and_bound() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("notes").join("inputs.json");
        let mut log = FileNoteLog::new(&path, 3);

        for text in ["a", "b", "c", "d"] {
            log.append(note(text));
        }

        let texts: Vec<_> = log.read_entries().into_iter().map(|e| e.text).collect();
        assert_eq!(texts, vec!["b", "c", "d"]);

        let raw = std::fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"t\":"));
    }

    #[test]
    fn test_file_log_failure_is_swallowed() {
        let dir = tempfile::tempdir().unwrap();
        // A directory where the file should be makes every write fail.
        let mut log = FileNoteLog::new(dir.path(), 3);

        log.append(note("lost"));
        assert!(log.read_entries().is_empty());
    }

    #[test]
    fn test_corrupt_file_starts_over() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("inputs.json");
        std::fs::write(&path, "{not json").unwrap();

        let mut log = FileNoteLog::new(&path, 3);
        log.append(note("fresh"));

        assert_eq!(log.read_entries().len(), 1);
    }
}
