//! Scene container: objects, collections and selection state

use crate::error::{Error, Result};
use crate::mesh::WeightedMesh;
use crate::object::SceneObject;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// A named, ordered group of scene objects
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collection {
    pub name: String,
    #[serde(default)]
    pub objects: Vec<String>,
}

impl Collection {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            objects: Vec::new(),
        }
    }

    pub fn contains(&self, object: &str) -> bool {
        self.objects.iter().any(|o| o == object)
    }
}

/// A scene owning its objects, collections and selection
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Scene {
    #[serde(default)]
    objects: Vec<SceneObject>,
    #[serde(default)]
    collections: Vec<Collection>,
    #[serde(default)]
    selected: Vec<String>,
    #[serde(default)]
    active: Option<String>,
}

impl Scene {
    /// Create a new empty scene
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an object. Object names must be unique.
    pub fn add_object(&mut self, object: SceneObject) -> Result<()> {
        if self.object(&object.name).is_some() {
            return Err(Error::InvalidData(format!(
                "object '{}' already exists",
                object.name
            )));
        }
        self.objects.push(object);
        Ok(())
    }

    /// Objects in scene order
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    pub fn object(&self, name: &str) -> Option<&SceneObject> {
        self.objects.iter().find(|o| o.name == name)
    }

    pub fn object_mut(&mut self, name: &str) -> Option<&mut SceneObject> {
        self.objects.iter_mut().find(|o| o.name == name)
    }

    /// Look up an object that must exist
    pub fn require(&self, name: &str) -> Result<&SceneObject> {
        self.object(name)
            .ok_or_else(|| Error::ObjectNotFound(name.to_string()))
    }

    /// Mesh data of the object called `name`
    pub fn mesh(&self, name: &str) -> Result<&WeightedMesh> {
        self.require(name)?
            .as_mesh()
            .ok_or_else(|| Error::NotAMesh(name.to_string()))
    }

    pub fn mesh_mut(&mut self, name: &str) -> Result<&mut WeightedMesh> {
        self.object_mut(name)
            .ok_or_else(|| Error::ObjectNotFound(name.to_string()))?
            .as_mesh_mut()
            .ok_or_else(|| Error::NotAMesh(name.to_string()))
    }

    /// Borrow `source` immutably and `target` mutably at the same time
    pub fn pair_mut(&mut self, source: &str, target: &str) -> Result<(&SceneObject, &mut SceneObject)> {
        let si = self.position(source)?;
        let ti = self.position(target)?;
        if si == ti {
            return Err(Error::InvalidData(format!(
                "source and target are the same object '{}'",
                source
            )));
        }

        if si < ti {
            let (head, tail) = self.objects.split_at_mut(ti);
            Ok((&head[si], &mut tail[0]))
        } else {
            let (head, tail) = self.objects.split_at_mut(si);
            Ok((&tail[0], &mut head[ti]))
        }
    }

    fn position(&self, name: &str) -> Result<usize> {
        self.objects
            .iter()
            .position(|o| o.name == name)
            .ok_or_else(|| Error::ObjectNotFound(name.to_string()))
    }

    /// Add an empty collection, or do nothing if it already exists
    pub fn add_collection(&mut self, name: &str) {
        if self.collection(name).is_none() {
            self.collections.push(Collection::new(name));
        }
    }

    /// Link an existing object into an existing collection
    pub fn link(&mut self, collection: &str, object: &str) -> Result<()> {
        self.require(object)?;
        let collection = self
            .collections
            .iter_mut()
            .find(|c| c.name == collection)
            .ok_or_else(|| Error::CollectionNotFound(collection.to_string()))?;
        if !collection.contains(object) {
            collection.objects.push(object.to_string());
        }
        Ok(())
    }

    pub fn collections(&self) -> &[Collection] {
        &self.collections
    }

    pub fn collection(&self, name: &str) -> Option<&Collection> {
        self.collections.iter().find(|c| c.name == name)
    }

    /// Objects of a collection, in collection order
    pub fn collection_objects(&self, name: &str) -> Result<Vec<&SceneObject>> {
        let collection = self
            .collection(name)
            .ok_or_else(|| Error::CollectionNotFound(name.to_string()))?;
        collection
            .objects
            .iter()
            .map(|object| self.require(object))
            .collect()
    }

    /// Add an object to the selection
    pub fn select(&mut self, name: &str) -> Result<()> {
        self.require(name)?;
        if !self.is_selected(name) {
            self.selected.push(name.to_string());
        }
        Ok(())
    }

    pub fn deselect_all(&mut self) {
        self.selected.clear();
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selected.iter().any(|s| s == name)
    }

    /// Selected objects in selection order
    pub fn selected_objects(&self) -> Vec<&SceneObject> {
        self.selected
            .iter()
            .filter_map(|name| self.object(name))
            .collect()
    }

    /// Set or clear the active object
    pub fn set_active(&mut self, name: Option<&str>) -> Result<()> {
        if let Some(name) = name {
            self.require(name)?;
        }
        self.active = name.map(str::to_string);
        Ok(())
    }

    pub fn active_object(&self) -> Option<&SceneObject> {
        self.active.as_deref().and_then(|name| self.object(name))
    }

    /// Check scene consistency after loading.
    ///
    /// Object names must be unique, every mesh must be valid, and collections,
    /// selection and active object must reference existing objects.
    pub fn validate(&self) -> Result<()> {
        let mut names = HashSet::new();
        for object in &self.objects {
            if !names.insert(object.name.as_str()) {
                return Err(Error::InvalidData(format!(
                    "duplicate object name '{}'",
                    object.name
                )));
            }
            if let Some(mesh) = object.as_mesh() {
                mesh.validate().map_err(|e| {
                    Error::InvalidData(format!("mesh '{}': {}", object.name, e))
                })?;
            }
        }

        for collection in &self.collections {
            if let Some(missing) = collection.objects.iter().find(|o| !names.contains(o.as_str())) {
                return Err(Error::InvalidData(format!(
                    "collection '{}' references unknown object '{}'",
                    collection.name, missing
                )));
            }
        }

        let referenced = self.selected.iter().chain(self.active.iter());
        for name in referenced {
            if !names.contains(name.as_str()) {
                return Err(Error::InvalidData(format!(
                    "selection references unknown object '{}'",
                    name
                )));
            }
        }

        Ok(())
    }
}
