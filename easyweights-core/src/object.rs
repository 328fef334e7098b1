//! Scene objects

use crate::mesh::WeightedMesh;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Type of a scene object
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Mesh,
    Armature,
    Camera,
    Light,
    Empty,
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ObjectKind::Mesh => "MESH",
            ObjectKind::Armature => "ARMATURE",
            ObjectKind::Camera => "CAMERA",
            ObjectKind::Light => "LIGHT",
            ObjectKind::Empty => "EMPTY",
        };
        f.write_str(name)
    }
}

/// Data block attached to an object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ObjectData {
    Mesh(WeightedMesh),
    Armature,
    Camera,
    Light,
    Empty,
}

/// A named object in a scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneObject {
    pub name: String,
    pub data: ObjectData,
}

impl SceneObject {
    pub fn new(name: impl Into<String>, data: ObjectData) -> Self {
        Self {
            name: name.into(),
            data,
        }
    }

    /// Create a mesh object
    pub fn mesh(name: impl Into<String>, mesh: WeightedMesh) -> Self {
        Self::new(name, ObjectData::Mesh(mesh))
    }

    /// Create an object without mesh data of the given kind.
    ///
    /// `ObjectKind::Mesh` yields an object with an empty mesh.
    pub fn of_kind(name: impl Into<String>, kind: ObjectKind) -> Self {
        let data = match kind {
            ObjectKind::Mesh => ObjectData::Mesh(WeightedMesh::new()),
            ObjectKind::Armature => ObjectData::Armature,
            ObjectKind::Camera => ObjectData::Camera,
            ObjectKind::Light => ObjectData::Light,
            ObjectKind::Empty => ObjectData::Empty,
        };
        Self::new(name, data)
    }

    pub fn kind(&self) -> ObjectKind {
        match self.data {
            ObjectData::Mesh(_) => ObjectKind::Mesh,
            ObjectData::Armature => ObjectKind::Armature,
            ObjectData::Camera => ObjectKind::Camera,
            ObjectData::Light => ObjectKind::Light,
            ObjectData::Empty => ObjectKind::Empty,
        }
    }

    pub fn is_mesh(&self) -> bool {
        self.kind() == ObjectKind::Mesh
    }

    pub fn as_mesh(&self) -> Option<&WeightedMesh> {
        match &self.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }

    pub fn as_mesh_mut(&mut self) -> Option<&mut WeightedMesh> {
        match &mut self.data {
            ObjectData::Mesh(mesh) => Some(mesh),
            _ => None,
        }
    }
}
