//! Weighted mesh data structures
//!
//! A [`WeightedMesh`] owns an ordered list of named vertex groups and a list of
//! vertices. Each vertex carries its position and the set of groups it belongs
//! to together with the weight of that membership.

use crate::error::{Error, Result};
use crate::point::*;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named vertex group, addressed by its position in the owning mesh
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct VertexGroup {
    pub index: usize,
    pub name: String,
}

/// Membership of a vertex in a vertex group
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GroupWeight {
    pub group: usize,
    pub weight: f32,
}

/// A mesh vertex with its vertex group memberships
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub position: Point3f,
    #[serde(default)]
    pub memberships: Vec<GroupWeight>,
}

impl Vertex {
    /// Create a vertex that belongs to no group
    pub fn new(position: Point3f) -> Self {
        Self {
            position,
            memberships: Vec::new(),
        }
    }

    /// Weight of this vertex in `group`, if it is a member
    pub fn weight(&self, group: usize) -> Option<f32> {
        self.memberships
            .iter()
            .find(|m| m.group == group)
            .map(|m| m.weight)
    }

    /// Set the weight for `group`, replacing any existing membership
    pub fn set_weight(&mut self, group: usize, weight: f32) {
        match self.memberships.iter_mut().find(|m| m.group == group) {
            Some(membership) => membership.weight = weight,
            None => self.memberships.push(GroupWeight { group, weight }),
        }
    }

    /// Drop the membership in `group`. Returns the removed weight.
    pub fn unset_weight(&mut self, group: usize) -> Option<f32> {
        let position = self.memberships.iter().position(|m| m.group == group)?;
        Some(self.memberships.remove(position).weight)
    }
}

impl Default for Vertex {
    fn default() -> Self {
        Self::new(Point3f::origin())
    }
}

/// A mesh with vertex groups and per-vertex weights
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightedMesh {
    pub vertices: Vec<Vertex>,
    #[serde(default)]
    pub faces: Vec<[usize; 3]>,
    #[serde(default)]
    groups: Vec<VertexGroup>,
}

impl WeightedMesh {
    /// Create a new empty mesh
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a mesh from vertex positions, without groups or faces
    pub fn from_positions(positions: Vec<Point3f>) -> Self {
        Self {
            vertices: positions.into_iter().map(Vertex::new).collect(),
            faces: Vec::new(),
            groups: Vec::new(),
        }
    }

    /// Create a mesh from vertex positions and triangle faces
    pub fn from_positions_and_faces(positions: Vec<Point3f>, faces: Vec<[usize; 3]>) -> Self {
        let mut mesh = Self::from_positions(positions);
        mesh.faces = faces;
        mesh
    }

    /// Get the number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// Get the number of vertex groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Check if the mesh has no vertices
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    /// Add a face to the mesh
    pub fn add_face(&mut self, face: [usize; 3]) {
        self.faces.push(face);
    }

    /// The vertex groups in index order
    pub fn groups(&self) -> &[VertexGroup] {
        &self.groups
    }

    pub fn group(&self, index: usize) -> Option<&VertexGroup> {
        self.groups.get(index)
    }

    pub fn group_by_name(&self, name: &str) -> Option<&VertexGroup> {
        self.groups.iter().find(|g| g.name == name)
    }

    /// Names of all vertex groups in index order
    pub fn group_names(&self) -> Vec<&str> {
        self.groups.iter().map(|g| g.name.as_str()).collect()
    }

    /// Append a new vertex group and return its index.
    ///
    /// Names stay unique within a mesh: if `name` is taken, a numeric suffix
    /// (`.001`, `.002`, ...) is appended.
    pub fn add_group(&mut self, name: &str) -> usize {
        let name = self.unique_group_name(name);
        let index = self.groups.len();
        self.groups.push(VertexGroup { index, name });
        index
    }

    /// Index of the group called `name`, creating it if it does not exist
    pub fn ensure_group(&mut self, name: &str) -> usize {
        match self.group_by_name(name) {
            Some(group) => group.index,
            None => self.add_group(name),
        }
    }

    fn unique_group_name(&self, name: &str) -> String {
        if self.group_by_name(name).is_none() {
            return name.to_string();
        }
        (1..)
            .map(|n| format!("{name}.{n:03}"))
            .find(|candidate| self.group_by_name(candidate).is_none())
            .unwrap_or_else(|| name.to_string())
    }

    /// Assign `vertex` to `group` with the given weight
    pub fn assign(&mut self, vertex: usize, group: usize, weight: f32) -> Result<()> {
        if group >= self.groups.len() {
            return Err(Error::GroupIndexOutOfRange {
                index: group,
                len: self.groups.len(),
            });
        }
        let len = self.vertices.len();
        let vertex = self
            .vertices
            .get_mut(vertex)
            .ok_or(Error::VertexIndexOutOfRange { index: vertex, len })?;
        vertex.set_weight(group, weight);
        Ok(())
    }

    /// Weight of `vertex` in `group`, if it is a member
    pub fn weight(&self, vertex: usize, group: usize) -> Option<f32> {
        self.vertices.get(vertex)?.weight(group)
    }

    /// Remove the vertex group at `index`.
    ///
    /// Memberships in the removed group are dropped, and every group and
    /// membership above `index` moves down by one. Weights of the remaining
    /// groups are left as they were.
    pub fn remove_group(&mut self, index: usize) -> Result<VertexGroup> {
        if index >= self.groups.len() {
            return Err(Error::GroupIndexOutOfRange {
                index,
                len: self.groups.len(),
            });
        }

        let removed = self.groups.remove(index);
        for group in &mut self.groups[index..] {
            group.index -= 1;
        }

        for vertex in &mut self.vertices {
            vertex.memberships.retain(|m| m.group != index);
            for membership in &mut vertex.memberships {
                if membership.group > index {
                    membership.group -= 1;
                }
            }
        }

        Ok(removed)
    }

    /// Check the structural invariants of the mesh.
    ///
    /// Group indices must match their position and group names must be
    /// unique. Every membership references an existing group at most once per
    /// vertex and carries a finite weight. Faces reference existing vertices.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for (position, group) in self.groups.iter().enumerate() {
            if group.index != position {
                return Err(Error::InvalidData(format!(
                    "vertex group '{}' has index {} but is stored at {}",
                    group.name, group.index, position
                )));
            }
            if !names.insert(group.name.as_str()) {
                return Err(Error::InvalidData(format!(
                    "duplicate vertex group name '{}'",
                    group.name
                )));
            }
        }

        for (vi, vertex) in self.vertices.iter().enumerate() {
            let mut seen = HashSet::new();
            for membership in &vertex.memberships {
                if membership.group >= self.groups.len() {
                    return Err(Error::GroupIndexOutOfRange {
                        index: membership.group,
                        len: self.groups.len(),
                    });
                }
                if !membership.weight.is_finite() {
                    return Err(Error::InvalidData(format!(
                        "vertex {} has non-finite weight {} in group {}",
                        vi, membership.weight, membership.group
                    )));
                }
                if !seen.insert(membership.group) {
                    return Err(Error::InvalidData(format!(
                        "vertex {} belongs to group {} more than once",
                        vi, membership.group
                    )));
                }
            }
        }

        for face in &self.faces {
            if let Some(&index) = face.iter().find(|&&i| i >= self.vertices.len()) {
                return Err(Error::VertexIndexOutOfRange {
                    index,
                    len: self.vertices.len(),
                });
            }
        }

        Ok(())
    }
}
