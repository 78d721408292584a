//! Navigation State Machine - current scene plus a strictly LIFO visitation stack.
//!
//! Every forward transition (a choice or a direct navigate) pushes the scene being
//! left; `back` pops it again. Transitions report both ends so callers can emit
//! analytics with the "from" side after the state has already changed.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use story_graph::{Choice, Scene, SceneId, StoryGraph, UnknownSceneError};

/// Errors from navigation requests that cannot be honoured.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NavigationError {
    #[error("scene {scene} has no choice at index {index}")]
    NoSuchChoice { scene: SceneId, index: usize },

    #[error(transparent)]
    UnknownScene(#[from] UnknownSceneError),
}

/// The two ends of a completed transition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    pub from: SceneId,
    pub to: SceneId,
}

/// Current scene and the stack of scenes that led here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationState {
    current: SceneId,
    history: Vec<SceneId>,
}

impl NavigationState {
    /// Seed navigation at the graph's start scene with an empty stack.
    pub fn new(graph: &StoryGraph) -> Self {
        Self::at(graph.start().clone())
    }

    /// Seed navigation at an arbitrary scene.
    pub fn at(current: SceneId) -> Self {
        Self {
            current,
            history: Vec::new(),
        }
    }

    pub fn current(&self) -> &SceneId {
        &self.current
    }

    /// Previously visited scenes, oldest first.
    pub fn history(&self) -> &[SceneId] {
        &self.history
    }

    pub fn can_go_back(&self) -> bool {
        !self.history.is_empty()
    }

    /// Resolve the current scene.
    pub fn view<'g>(&self, graph: &'g StoryGraph) -> Result<&'g Scene, UnknownSceneError> {
        graph.resolve(&self.current)
    }

    /// Take the choice at `index` of the current scene.
    ///
    /// State is unchanged on error. The target does not have to exist; an unknown
    /// target is entered and renders as the unknown-scene placeholder.
    pub fn choose(
        &mut self,
        graph: &StoryGraph,
        index: usize,
    ) -> Result<(Transition, Choice), NavigationError> {
        let scene = self.view(graph)?;
        let choice = scene
            .choice(index)
            .cloned()
            .ok_or_else(|| NavigationError::NoSuchChoice {
                scene: self.current.clone(),
                index,
            })?;

        let transition = self.navigate(choice.next.clone());
        Ok((transition, choice))
    }

    /// Move directly to `target`, with the same stack effect as a choice.
    pub fn navigate(&mut self, target: SceneId) -> Transition {
        let from = std::mem::replace(&mut self.current, target);
        self.history.push(from.clone());

        tracing::debug!("Navigated {} -> {}", from, self.current);
        Transition {
            from,
            to: self.current.clone(),
        }
    }

    /// Return to the previous scene. `None` (and no change) when the stack is empty.
    pub fn back(&mut self) -> Option<Transition> {
        let previous = self.history.pop()?;
        let from = std::mem::replace(&mut self.current, previous);

        tracing::debug!("Went back {} -> {}", from, self.current);
        Some(Transition {
            from,
            to: self.current.clone(),
        })
    }

    /// Clear the stack and return to the graph's start scene.
    pub fn restart(&mut self, graph: &StoryGraph) -> Transition {
        self.history.clear();
        let from = std::mem::replace(&mut self.current, graph.start().clone());

        tracing::debug!("Restarted {} -> {}", from, self.current);
        Transition {
            from,
            to: self.current.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> SceneId {
        SceneId::new(s)
    }

    fn chain_graph() -> StoryGraph {
        StoryGraph::new("a")
            .with_scene(Scene::new("a", "A", "").with_choice(Choice::new("To B", "b")))
            .with_scene(
                Scene::new("b", "B", "")
                    .with_choice(Choice::new("To C", "c"))
                    .with_choice(Choice::new("Into the void", "void")),
            )
            .with_scene(Scene::new("c", "C", "").with_choice(Choice::new("To A", "a")))
    }

    #[test]
    fn test_choose_and_back() {
        let graph = StoryGraph::from_json(
            r#"{"start":"a","scenes":{
                "a":{"title":"A","text":"x","choices":[{"label":"Go","next":"b"}]},
                "b":{"title":"B","text":"y"}}}"#,
        )
        .unwrap();
        let mut nav = NavigationState::new(&graph);
        assert_eq!(nav.current(), &id("a"));

        let (transition, choice) = nav.choose(&graph, 0).unwrap();
        assert_eq!(transition, Transition { from: id("a"), to: id("b") });
        assert_eq!(choice.label, "Go");
        assert_eq!(nav.current(), &id("b"));
        assert_eq!(nav.history(), [id("a")]);

        let back = nav.back().unwrap();
        assert_eq!(back, Transition { from: id("b"), to: id("a") });
        assert_eq!(nav.current(), &id("a"));
        assert!(nav.history().is_empty());
    }

    #[test]
    fn test_back_on_empty_stack_is_noop() {
        let graph = chain_graph();
        let mut nav = NavigationState::new(&graph);
        let before = nav.clone();

        assert!(nav.back().is_none());
        assert_eq!(nav, before);
    }

    #[test]
    fn test_choose_then_back_is_lifo_inverse() {
        let graph = chain_graph();
        let mut nav = NavigationState::new(&graph);
        nav.choose(&graph, 0).unwrap();
        let before = nav.clone();

        // b -> c -> a -> b
        for _ in 0..3 {
            nav.choose(&graph, 0).unwrap();
        }
        assert_eq!(nav.history().len(), 4);

        for _ in 0..3 {
            nav.back().unwrap();
        }
        assert_eq!(nav, before);
    }

    #[test]
    fn test_back_undoes_any_walk_in_reverse() {
        let graph = chain_graph();

        for depth in 1..=9 {
            let mut nav = NavigationState::new(&graph);
            let mut snapshots = Vec::new();

            for step in 0..depth {
                snapshots.push(nav.clone());
                match step % 3 {
                    0 => {
                        if nav.choose(&graph, 0).is_err() {
                            nav.navigate(id("b"));
                        }
                    }
                    1 => {
                        nav.navigate(id("c"));
                    }
                    _ => {
                        nav.navigate(id("void"));
                    }
                }
                assert_eq!(nav.history().len(), step + 1);
            }

            while let Some(expected) = snapshots.pop() {
                let transition = nav.back().unwrap();
                assert_eq!(&transition.to, expected.current());
                assert_eq!(nav, expected);
            }
            assert!(nav.back().is_none());
            assert_eq!(nav.current(), graph.start());
        }
    }

    #[test]
    fn test_restart_clears_history() {
        let graph = chain_graph();
        let mut nav = NavigationState::new(&graph);
        for _ in 0..5 {
            nav.choose(&graph, 0).unwrap();
        }

        let transition = nav.restart(&graph);
        assert_eq!(transition.to, id("a"));
        assert_eq!(nav.current(), graph.start());
        assert!(nav.history().is_empty());
    }

    #[test]
    fn test_choose_out_of_range_leaves_state() {
        let graph = chain_graph();
        let mut nav = NavigationState::new(&graph);
        let before = nav.clone();

        let err = nav.choose(&graph, 7).unwrap_err();
        assert_eq!(err, NavigationError::NoSuchChoice { scene: id("a"), index: 7 });
        assert_eq!(nav, before);
    }

    #[test]
    fn test_choose_into_unknown_scene() {
        let graph = chain_graph();
        let mut nav = NavigationState::new(&graph);
        nav.choose(&graph, 0).unwrap();
        nav.choose(&graph, 1).unwrap();

        assert_eq!(nav.current(), &id("void"));
        assert_eq!(nav.view(&graph), Err(UnknownSceneError(id("void"))));

        // No choices are reachable from an unknown scene, but back still works.
        assert!(matches!(
            nav.choose(&graph, 0),
            Err(NavigationError::UnknownScene(_))
        ));
        assert_eq!(nav.back().unwrap().to, id("b"));
    }

    #[test]
    fn test_direct_navigate_is_reversible() {
        let graph = chain_graph();
        let mut nav = NavigationState::new(&graph);

        nav.navigate(id("c"));
        assert_eq!(nav.history(), [id("a")]);
        assert_eq!(nav.back().unwrap().to, id("a"));
    }
}
