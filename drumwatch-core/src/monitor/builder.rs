use crate::{
    error::DrumwatchError,
    level::{LevelSource, SyntheticLevelSource},
    logger::InstallLogger,
    monitor::{engine::DrumMonitor, state::DrumRegistry},
};
use drumwatch_schemas::drum::DrumDefinition;

/// A fluent builder for constructing a `DrumMonitor`.
///
/// Without an explicit level source the monitor falls back to the synthetic
/// sawtooth, using each definition's phase offset.
#[derive(Default)]
pub struct MonitorBuilder {
    drums: Vec<DrumDefinition>,
    source: Option<Box<dyn LevelSource>>,
    log_path: Option<String>,
}

impl MonitorBuilder {
    /// Creates a new, empty `MonitorBuilder`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the drums to track, in display order.
    pub fn with_drums(mut self, drums: Vec<DrumDefinition>) -> Self {
        self.drums = drums;
        self
    }

    /// Replaces the synthetic signal with another level source.
    pub fn with_level_source<S: LevelSource + 'static>(mut self, source: S) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Appends every recorded install to the specified CSV file.
    pub fn with_install_logging_to_file(mut self, path: &str) -> Self {
        self.log_path = Some(path.to_string());
        self
    }

    /// Consumes the builder and returns a ready `DrumMonitor`.
    ///
    /// # Errors
    ///
    /// Returns a `DrumwatchError` if no drums were given, a drum name repeats,
    /// or the install log cannot be opened.
    pub fn build(self) -> Result<DrumMonitor, DrumwatchError> {
        let registry = DrumRegistry::new(&self.drums)?;

        let source = match self.source {
            Some(source) => source,
            None => Box::new(SyntheticLevelSource::from_definitions(&self.drums)),
        };

        let logger = match self.log_path {
            Some(path) => Some(
                InstallLogger::new(&path).map_err(|e| DrumwatchError::FileIO(path.clone(), e))?,
            ),
            None => None,
        };

        Ok(DrumMonitor {
            registry,
            source,
            logger,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn definition(name: &str, phase_offset: u32) -> DrumDefinition {
        DrumDefinition {
            name: name.to_string(),
            installed_at: NaiveDate::from_ymd_opt(2025, 11, 1)
                .unwrap()
                .and_hms_opt(9, 0, 0)
                .unwrap(),
            phase_offset,
        }
    }

    #[test]
    fn test_build_requires_drums() {
        assert!(matches!(MonitorBuilder::new().build(), Err(DrumwatchError::NoDrumsDefined)));
    }

    #[test]
    fn test_default_source_uses_phase_offsets() {
        let monitor = MonitorBuilder::new()
            .with_drums(vec![definition("A", 0), definition("B", 40)])
            .build()
            .unwrap();
        let now = NaiveDate::from_ymd_opt(2025, 11, 3).unwrap().and_hms_opt(9, 0, 10).unwrap();
        let readings = monitor.sample_all(now);
        assert_eq!(readings[0].percent, 90);
        assert_eq!(readings[1].percent, 50);
    }

    #[test]
    fn test_unopenable_install_log_fails_build() {
        let path = std::env::temp_dir().join("drumwatch-no-such-dir").join("log.csv");
        let result = MonitorBuilder::new()
            .with_drums(vec![definition("A", 0)])
            .with_install_logging_to_file(path.to_str().unwrap())
            .build();
        assert!(matches!(result, Err(DrumwatchError::FileIO(_, _))));
    }
}
