//! Error types for easyweights

use thiserror::Error;

/// Main error type for easyweights operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid data: {0}")]
    InvalidData(String),

    #[error("Object not found: {0}")]
    ObjectNotFound(String),

    #[error("Collection not found: {0}")]
    CollectionNotFound(String),

    #[error("Object '{0}' is not a mesh")]
    NotAMesh(String),

    #[error("Vertex group index {index} out of range (mesh has {len} groups)")]
    GroupIndexOutOfRange { index: usize, len: usize },

    #[error("Vertex index {index} out of range (mesh has {len} vertices)")]
    VertexIndexOutOfRange { index: usize, len: usize },

    #[error("Weight transfer failed: {0}")]
    Transfer(String),

    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),
}

/// Result type alias for easyweights operations
pub type Result<T> = std::result::Result<T, Error>;
