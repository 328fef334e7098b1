//! Target resolution
//!
//! Chooses the mesh objects an operator acts on, either from the settings
//! record or from the scene selection.

use easyweights_core::{Result, Scene, SceneObject, SelectionMode, WeightSettings};
use std::iter;

/// Keep only mesh objects, dropping the object named `exclude`. Order is preserved.
pub fn resolve_targets<'a, I>(objects: I, exclude: Option<&str>) -> Vec<&'a SceneObject>
where
    I: IntoIterator<Item = &'a SceneObject>,
{
    objects
        .into_iter()
        .filter(|object| object.is_mesh())
        .filter(|object| exclude != Some(object.name.as_str()))
        .collect()
}

/// Resolve targets according to the settings' selection mode.
///
/// In `SingleObject` mode the TARGET object is used, in `Collection` mode the
/// objects of the TARGETS collection. The SOURCE object is never a target.
/// An unset target field resolves to no targets; a name that does not exist
/// in the scene is an error.
pub fn resolve_from_settings<'a>(
    scene: &'a Scene,
    settings: &WeightSettings,
) -> Result<Vec<&'a SceneObject>> {
    resolve_from_settings_excluding(scene, settings, settings.source.as_deref())
}

/// Like [`resolve_from_settings`], but drops `exclude` instead of SOURCE.
pub fn resolve_from_settings_excluding<'a>(
    scene: &'a Scene,
    settings: &WeightSettings,
    exclude: Option<&str>,
) -> Result<Vec<&'a SceneObject>> {
    match settings.mode {
        SelectionMode::SingleObject => match settings.target.as_deref() {
            Some(name) => Ok(resolve_targets(iter::once(scene.require(name)?), exclude)),
            None => Ok(Vec::new()),
        },
        SelectionMode::Collection => match settings.targets.as_deref() {
            Some(name) => Ok(resolve_targets(scene.collection_objects(name)?, exclude)),
            None => Ok(Vec::new()),
        },
    }
}

/// Source and targets taken from the scene selection.
///
/// The active object is the source, falling back to the most recently
/// selected object when nothing is active. Every other selected mesh is a
/// target. Returns `None` when there is no mesh source.
pub fn resolve_selection(scene: &Scene) -> Option<(&SceneObject, Vec<&SceneObject>)> {
    let selected = scene.selected_objects();
    let source = scene
        .active_object()
        .or_else(|| selected.last().copied())
        .filter(|object| object.is_mesh())?;
    let targets = resolve_targets(selected, Some(source.name.as_str()));
    Some((source, targets))
}
