//! # Story Graph
//!
//! The "Story Bible" crate - contains the scene graph, choices, and trigger rule
//! documents that drive a branching story. Everything here is read-only after load
//! and does not contain any navigation or matching logic.

mod de;
pub mod error;
pub mod graph;
pub mod scenes;
pub mod triggers;

pub use error::*;
pub use graph::*;
pub use scenes::*;
pub use triggers::*;
