//! Side panel model
//!
//! Describes what the "Easy Weights" panel shows for a scene and settings:
//! the source, the target selection, and which actions are enabled. The
//! panel is only shown while the scene has an active object.

use crate::operators::{CleanVertexGroups, Operator, TransferWeights};
use crate::targets::resolve_from_settings;
use crate::transfer::MappedTransfer;
use easyweights_core::{Scene, SelectionMode, WeightSettings};
use itertools::Itertools;
use std::fmt;

pub const PANEL_LABEL: &str = "Easy Weights";
pub const NO_SOURCE_LABEL: &str = "No object selected";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelModel {
    /// Whether the scene has an active object
    pub visible: bool,
    pub source_label: String,
    pub mode: SelectionMode,
    /// Name of the TARGET object or TARGETS collection, if set
    pub target_field: Option<String>,
    /// Mesh targets the operators would act on
    pub targets: Vec<String>,
    /// Why targets could not be resolved
    pub target_error: Option<String>,
    pub clean: bool,
    pub transfer_enabled: bool,
    pub clean_enabled: bool,
}

impl PanelModel {
    pub fn describe(scene: &Scene, settings: &WeightSettings) -> Self {
        let source_label = settings
            .source
            .clone()
            .unwrap_or_else(|| NO_SOURCE_LABEL.to_string());

        let target_field = match settings.mode {
            SelectionMode::SingleObject => settings.target.clone(),
            SelectionMode::Collection => settings.targets.clone(),
        };

        let (targets, target_error) = match resolve_from_settings(scene, settings) {
            Ok(objects) => (objects.into_iter().map(|o| o.name.clone()).collect(), None),
            Err(e) => (Vec::new(), Some(e.to_string())),
        };

        Self {
            visible: scene.active_object().is_some(),
            source_label,
            mode: settings.mode,
            target_field,
            targets,
            target_error,
            clean: settings.clean,
            transfer_enabled: TransferWeights::new(MappedTransfer::default()).poll(settings),
            clean_enabled: CleanVertexGroups.poll(settings),
        }
    }
}

fn checkbox(enabled: bool) -> &'static str {
    if enabled {
        "[x]"
    } else {
        "[ ]"
    }
}

impl fmt::Display for PanelModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.visible {
            return write!(f, "{} (hidden: no active object)", PANEL_LABEL);
        }
        writeln!(f, "{}", PANEL_LABEL)?;
        writeln!(f, "  Source Object: {}", self.source_label)?;
        match &self.target_field {
            Some(field) => writeln!(f, "  Mode: {} ({})", self.mode, field)?,
            None => writeln!(f, "  Mode: {} (not set)", self.mode)?,
        }
        match &self.target_error {
            Some(error) => writeln!(f, "  Targets: {}", error)?,
            None if self.targets.is_empty() => writeln!(f, "  Targets: none")?,
            None => writeln!(f, "  Targets: {}", self.targets.iter().join(", "))?,
        }
        writeln!(f, "  {} Clean after transfer", checkbox(self.clean))?;
        writeln!(
            f,
            "  {} {}",
            checkbox(self.transfer_enabled),
            <TransferWeights<MappedTransfer> as Operator>::LABEL
        )?;
        write!(
            f,
            "  {} {}",
            checkbox(self.clean_enabled),
            CleanVertexGroups::LABEL
        )
    }
}
