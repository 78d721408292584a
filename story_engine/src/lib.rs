//! # Story Engine
//!
//! The behaviour of a branching story. This crate loads content described by
//! `story_graph`, navigates between scenes, and reacts to free-text input with
//! pattern-matched trigger rules.
//!
//! ## Core Components
//!
//! - **loader**: Reads the story and trigger documents and compiles rule patterns
//! - **navigation**: Current scene plus a strictly LIFO visitation stack
//! - **matcher**: First-match scan of free text over compiled rules
//! - **interpreter**: Folds a matched rule's actions into one response
//! - **session**: Owns the state and maps discrete commands onto the components above
//! - **events**: Analytics events and sinks
//!
//! ## Collaborators
//!
//! Presentation ([`Presenter`]), analytics ([`AnalyticsSink`]) and the local note
//! log ([`NoteLog`]) are traits so the engine can run headless, in a terminal, or
//! behind any other surface.

pub mod config;
pub mod events;
pub mod interpreter;
pub mod loader;
pub mod markup;
pub mod matcher;
pub mod navigation;
pub mod notes;
pub mod presenter;
pub mod session;

pub use config::*;
pub use events::*;
pub use interpreter::*;
pub use loader::*;
pub use markup::Markup;
pub use matcher::*;
pub use navigation::*;
pub use notes::*;
pub use presenter::*;
pub use session::*;
