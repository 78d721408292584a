//! Story session - owns the loaded content and navigation state, and runs commands.
//!
//! A session only exists once content has loaded, so no command can run before the
//! story is available. Each command runs to completion before the next one; the
//! analytics stream follows the order in which things become visible:
//! a transition presents its scene (`scene_view`) before the event describing the
//! transition itself.

mod command;

pub use command::*;

use story_graph::{Scene, SceneId, StoryGraph, Tone, UnknownSceneError};

use crate::config::{StoryConfig, HIGHLIGHT_NOTE};
use crate::events::{AnalyticsEvent, AnalyticsSink, SessionId, StoryEvent};
use crate::interpreter::{self, InterpreterResult};
use crate::loader::Content;
use crate::matcher::RuleSet;
use crate::navigation::{NavigationError, NavigationState, Transition};
use crate::notes::{NoteEntry, NoteLog};
use crate::presenter::Presenter;

/// A running story with its collaborators.
pub struct Session<P, A, N> {
    id: SessionId,
    graph: StoryGraph,
    rules: RuleSet,
    nav: NavigationState,
    tone: Tone,
    miss_message: String,
    debug_location: String,
    presenter: P,
    analytics: A,
    notes: N,
}

impl<P, A, N> Session<P, A, N>
where
    P: Presenter,
    A: AnalyticsSink,
    N: NoteLog,
{
    /// Seed a session at the start scene and present it.
    pub fn start(
        content: Content,
        config: &StoryConfig,
        presenter: P,
        analytics: A,
        notes: N,
    ) -> Self {
        let nav = NavigationState::new(&content.graph);
        let mut session = Self {
            id: SessionId::new(),
            graph: content.graph,
            rules: content.rules,
            nav,
            tone: config.tone,
            miss_message: config.miss_message.clone(),
            debug_location: config.debug_location.clone(),
            presenter,
            analytics,
            notes,
        };

        session.present_current();
        let start = session.nav.current().clone();
        session.track(StoryEvent::Init { start });

        tracing::debug!("Session {} started", session.id);
        session
    }

    /// Run one command.
    ///
    /// Returns the transition it caused, if any. Only an invalid choice is an error,
    /// and it leaves the session unchanged.
    pub fn handle(&mut self, command: Command) -> Result<Option<Transition>, NavigationError> {
        match command {
            Command::Choose { index } => self.choose(index).map(Some),
            Command::Back => Ok(self.back()),
            Command::Restart => Ok(Some(self.restart())),
            Command::Submit { text } => Ok(self.submit(&text)),
            Command::SetTone(tone) => {
                self.tone = tone;
                Ok(None)
            }
            Command::DebugEmit => {
                let location = self.debug_location.clone();
                self.track(StoryEvent::DebugEmit { location });
                Ok(None)
            }
        }
    }

    /// Take the choice at `index` of the current scene.
    pub fn choose(&mut self, index: usize) -> Result<Transition, NavigationError> {
        let from_tags = self.graph.tags_of(self.nav.current()).to_vec();
        let (transition, choice) = self.nav.choose(&self.graph, index)?;

        self.present_current();
        self.track(StoryEvent::Choice {
            from: transition.from.clone(),
            to: transition.to.clone(),
            label: choice.label,
            idx: index,
            from_tags,
            to_tags: self.graph.tags_of(&transition.to).to_vec(),
        });

        Ok(transition)
    }

    /// Return to the previous scene. No-op when there is nothing to go back to.
    pub fn back(&mut self) -> Option<Transition> {
        let transition = self.nav.back()?;

        self.present_current();
        self.track(StoryEvent::Back {
            from: transition.from.clone(),
            to: transition.to.clone(),
        });

        Some(transition)
    }

    /// Clear the history and return to the start scene.
    pub fn restart(&mut self) -> Transition {
        let transition = self.nav.restart(&self.graph);

        self.present_current();
        self.track(StoryEvent::Restart {
            from: transition.from.clone(),
            to: transition.to.clone(),
        });

        transition
    }

    /// Handle free-text input.
    ///
    /// Blank input is ignored. Otherwise the input is noted, matched against the
    /// rules, and either the first matching rule's actions run or the miss message
    /// is shown.
    pub fn submit(&mut self, text: &str) -> Option<Transition> {
        let utterance = text.trim();
        if utterance.is_empty() {
            return None;
        }

        let scene = self.nav.current().clone();
        self.notes.append(NoteEntry::now(scene.clone(), utterance));
        self.track(StoryEvent::FreeInput {
            scene,
            text_len: utterance.chars().count(),
        });

        let Some(rule) = self.rules.find_match(utterance) else {
            tracing::debug!("No rule matched {:?}", utterance);
            self.track(StoryEvent::RuleMiss);
            self.presenter.show_response(&self.miss_message);
            return None;
        };

        let rule_id = rule.id.clone();
        let result = interpreter::execute(&rule.actions, self.tone);
        tracing::debug!("Rule {:?} matched {:?}", rule_id, utterance);

        self.track(StoryEvent::RuleFired { rule: rule_id });
        self.apply(result)
    }

    /// Apply an interpreter result: tags, response, highlights, then navigation.
    fn apply(&mut self, result: InterpreterResult) -> Option<Transition> {
        for tags in &result.tag_emits {
            self.track(StoryEvent::TagEmit { tags: tags.clone() });
        }

        if result.has_response() {
            let mut parts = result.messages.clone();
            if !result.highlights.is_empty() {
                parts.push(HIGHLIGHT_NOTE.to_string());
            }
            self.presenter.show_response(&parts.join("\n\n"));
        }

        if !result.highlights.is_empty() {
            if let Ok(scene) = self.graph.resolve(self.nav.current()) {
                let indices = result.highlighted_indices(scene);
                self.presenter.highlight_choices(&indices);
            }
        }

        let mut transition = None;
        if let Some(target) = result.navigate_to {
            let from_tags = self.graph.tags_of(self.nav.current()).to_vec();
            let t = self.nav.navigate(target);

            self.present_current();
            self.track(StoryEvent::InputNavigate {
                from: t.from.clone(),
                to: t.to.clone(),
                from_tags,
                to_tags: self.graph.tags_of(&t.to).to_vec(),
            });
            transition = Some(t);
        }

        self.reassess();
        transition
    }

    /// Extension point run after every fired rule. Only reports where the session is.
    fn reassess(&mut self) {
        let scene = self.nav.current().clone();
        self.track(StoryEvent::Reassess { scene });
    }

    fn present_current(&mut self) {
        let view = match self.graph.resolve(self.nav.current()) {
            Ok(scene) => {
                self.presenter.show_scene(scene);
                Some(StoryEvent::SceneView {
                    scene: scene.id.clone(),
                    choices: scene.choices.len(),
                    tags: scene.tags.clone(),
                })
            }
            Err(UnknownSceneError(id)) => {
                tracing::warn!("Presenting placeholder for unknown scene {}", id);
                self.presenter.show_unknown_scene(&id);
                None
            }
        };

        if let Some(event) = view {
            self.track(event);
        }
    }

    fn track(&mut self, event: StoryEvent) {
        self.analytics.track(AnalyticsEvent::now(self.id, event));
    }
}

impl<P, A, N> Session<P, A, N> {
    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn current(&self) -> &SceneId {
        self.nav.current()
    }

    pub fn history(&self) -> &[SceneId] {
        self.nav.history()
    }

    /// The current scene, or the identifier that failed to resolve.
    pub fn current_scene(&self) -> Result<&Scene, UnknownSceneError> {
        self.nav.view(&self.graph)
    }

    pub fn graph(&self) -> &StoryGraph {
        &self.graph
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn tone(&self) -> Tone {
        self.tone
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    pub fn analytics(&self) -> &A {
        &self.analytics
    }

    pub fn analytics_mut(&mut self) -> &mut A {
        &mut self.analytics
    }

    pub fn notes(&self) -> &N {
        &self.notes
    }
}
