use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Start-up description of a drum, as written in the configuration file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrumDefinition {
    /// Display label, also used as the lookup key (e.g. "DRUM 1 (AZ EBR200G+)").
    pub name: String,
    /// Install timestamp in effect until an operator records a new one.
    pub installed_at: NaiveDateTime,
    /// Offset, in cycle steps, applied by the synthetic level source.
    #[serde(default)]
    pub phase_offset: u32,
}

/// The live service record of one drum.
///
/// `replaced_at` stays `None` until an operator records an install/replace
/// event; from then on it always equals `installed_at`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrumRecord {
    pub name: String,
    pub installed_at: NaiveDateTime,
    pub replaced_at: Option<NaiveDateTime>,
}

impl DrumRecord {
    pub fn from_definition(definition: &DrumDefinition) -> Self {
        Self {
            name: definition.name.clone(),
            installed_at: definition.installed_at,
            replaced_at: None,
        }
    }
}

/// An operator action that put a fresh drum into service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstallEvent {
    /// Wall-clock time at which the operator saved the change.
    pub recorded_at: NaiveDateTime,
    pub drum: String,
    pub installed_at: NaiveDateTime,
}
