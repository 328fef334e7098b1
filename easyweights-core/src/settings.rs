//! Weight tool settings

use serde::{Deserialize, Serialize};
use std::fmt;

/// How targets are chosen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionMode {
    /// A single target object
    #[default]
    SingleObject,
    /// Every mesh of a collection
    Collection,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::SingleObject => f.write_str("Object"),
            SelectionMode::Collection => f.write_str("Collection"),
        }
    }
}

/// Settings shared by the transfer and clean operators
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct WeightSettings {
    /// Object providing the weights
    pub source: Option<String>,
    /// Target object in `SingleObject` mode
    pub target: Option<String>,
    /// Target collection in `Collection` mode
    pub targets: Option<String>,
    pub mode: SelectionMode,
    /// Remove unused vertex groups from targets after transferring
    pub clean: bool,
    /// Reserved. Not read by any operator.
    pub smooth: bool,
}

impl WeightSettings {
    /// Settings for a single source and target object
    pub fn single(source: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            target: Some(target.into()),
            ..Self::default()
        }
    }

    /// Settings for a source object and a target collection
    pub fn collection(source: impl Into<String>, targets: impl Into<String>) -> Self {
        Self {
            source: Some(source.into()),
            targets: Some(targets.into()),
            mode: SelectionMode::Collection,
            ..Self::default()
        }
    }

    pub fn with_clean(mut self, clean: bool) -> Self {
        self.clean = clean;
        self
    }

    pub fn has_source(&self) -> bool {
        self.source.is_some()
    }

    /// Whether the field the current mode reads targets from is set
    pub fn has_targets(&self) -> bool {
        match self.mode {
            SelectionMode::SingleObject => self.target.is_some(),
            SelectionMode::Collection => self.targets.is_some(),
        }
    }
}
