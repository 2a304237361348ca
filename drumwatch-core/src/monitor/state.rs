use crate::error::DrumwatchError;
use chrono::NaiveDateTime;
use drumwatch_schemas::drum::{DrumDefinition, DrumRecord};
use std::collections::HashSet;

/// Owned, ordered set of drum service records.
///
/// Order follows the definitions the registry was built from and is the order
/// the dashboard pairs drums for display.
#[derive(Debug, Clone)]
pub struct DrumRegistry {
    drums: Vec<DrumRecord>,
}

impl DrumRegistry {
    pub fn new(definitions: &[DrumDefinition]) -> Result<Self, DrumwatchError> {
        if definitions.is_empty() {
            return Err(DrumwatchError::NoDrumsDefined);
        }

        let mut seen = HashSet::new();
        for definition in definitions {
            if !seen.insert(definition.name.as_str()) {
                return Err(DrumwatchError::DuplicateDrum(definition.name.clone()));
            }
        }

        Ok(Self {
            drums: definitions.iter().map(DrumRecord::from_definition).collect(),
        })
    }

    pub fn drums(&self) -> &[DrumRecord] {
        &self.drums
    }

    pub fn get(&self, name: &str) -> Option<&DrumRecord> {
        self.drums.iter().find(|d| d.name == name)
    }

    /// Puts a fresh drum into service: both `installed_at` and `replaced_at`
    /// become `installed_at`. Any timestamp is accepted, past or future.
    pub fn record_install(
        &mut self,
        name: &str,
        installed_at: NaiveDateTime,
    ) -> Result<&DrumRecord, DrumwatchError> {
        let drum = self
            .drums
            .iter_mut()
            .find(|d| d.name == name)
            .ok_or_else(|| DrumwatchError::DrumNotFound(name.to_string()))?;

        drum.installed_at = installed_at;
        drum.replaced_at = Some(installed_at);
        Ok(&*drum)
    }

    pub fn len(&self) -> usize {
        self.drums.len()
    }

    pub fn is_empty(&self) -> bool {
        self.drums.is_empty()
    }
}
