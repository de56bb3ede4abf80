//! Apps-of-apps graph construction and projection
//!
//! Data flows one way:
//! raw resources -> [`ResourceIndex`] -> [`resolve`] -> [`assemble`]
//! -> optional [`prune`] -> optional [`project`].
//!
//! Everything here is synchronous and pure; independent builds can run in
//! parallel on their own snapshots.

mod assembler;
mod diagnostics;
mod index;
mod model;
mod pruner;
mod resolver;
pub mod selector;
mod tree;

pub use assembler::assemble;
pub use diagnostics::{BreakReason, Diagnostic, Diagnostics};
pub use index::ResourceIndex;
pub use model::{AppGraph, Edge, Relation};
pub use pruner::prune;
pub use resolver::resolve;
pub use selector::{parse_selector, resolve_selectors};
pub use tree::{BrokenEdge, Tree, project, project_from};
