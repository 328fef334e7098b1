//! Core data structures for easyweights
//!
//! This crate provides the scene model the weight tools operate on: scene
//! objects, meshes carrying vertex groups and per-vertex weights, named
//! collections, selection state and the settings record.

pub mod point;
pub mod mesh;
pub mod object;
pub mod scene;
pub mod settings;
pub mod error;

pub use point::*;
pub use mesh::*;
pub use object::*;
pub use scene::*;
pub use settings::*;
pub use error::*;

/// Re-export commonly used types from nalgebra
pub use nalgebra::Point3;
