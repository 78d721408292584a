//! Presentation surface - where scenes and responses end up.

use story_graph::{Scene, SceneId};

/// Receiver of everything a session wants shown.
///
/// Presenting a new scene clears any highlights from the previous one.
pub trait Presenter {
    /// Show a scene's title, body and choice buttons.
    fn show_scene(&mut self, scene: &Scene);

    /// Show the placeholder for a scene identifier that does not resolve.
    fn show_unknown_scene(&mut self, id: &SceneId);

    /// Replace the displayed response text.
    fn show_response(&mut self, text: &str);

    /// Emphasize the choices at these indices of the displayed scene.
    fn highlight_choices(&mut self, indices: &[usize]);
}

/// One thing a [`TranscriptPresenter`] was asked to show.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Frame {
    Scene(SceneId),
    UnknownScene(SceneId),
    Response(String),
    Highlight(Vec<usize>),
}

/// Records frames instead of drawing them. Used headless and in tests.
#[derive(Debug, Clone, Default)]
pub struct TranscriptPresenter {
    frames: Vec<Frame>,
    highlighted: Vec<usize>,
}

impl TranscriptPresenter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The scene currently on display, known or not.
    pub fn displayed_scene(&self) -> Option<&SceneId> {
        self.frames.iter().rev().find_map(|f| match f {
            Frame::Scene(id) | Frame::UnknownScene(id) => Some(id),
            _ => None,
        })
    }

    /// The response text currently on display.
    pub fn displayed_response(&self) -> Option<&str> {
        self.frames.iter().rev().find_map(|f| match f {
            Frame::Response(text) => Some(text.as_str()),
            _ => None,
        })
    }

    /// Choice indices currently highlighted.
    pub fn highlighted(&self) -> &[usize] {
        &self.highlighted
    }
}

impl Presenter for TranscriptPresenter {
    fn show_scene(&mut self, scene: &Scene) {
        self.highlighted.clear();
        self.frames.push(Frame::Scene(scene.id.clone()));
    }

    fn show_unknown_scene(&mut self, id: &SceneId) {
        self.highlighted.clear();
        self.frames.push(Frame::UnknownScene(id.clone()));
    }

    fn show_response(&mut self, text: &str) {
        self.frames.push(Frame::Response(text.to_string()));
    }

    fn highlight_choices(&mut self, indices: &[usize]) {
        self.highlighted.extend_from_slice(indices);
        self.frames.push(Frame::Highlight(indices.to_vec()));
    }
}
