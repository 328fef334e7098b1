//! # easyweights operations
//!
//! Operations on the scene model: pruning of unused vertex groups, target
//! resolution, weight transfer between meshes, the two user-facing operators
//! built on top of them, and the side panel model.

pub mod prune;
pub mod targets;
pub mod transfer;
pub mod operators;
pub mod panel;

// Re-export commonly used items
pub use prune::*;
pub use targets::*;
pub use transfer::*;
pub use operators::*;
pub use panel::*;
