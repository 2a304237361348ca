use super::state::DrumRegistry;
use crate::{
    error::DrumwatchError, level::LevelSource, logger::InstallLogger, projection::project,
    status::fleet_status,
};
use chrono::NaiveDateTime;
use drumwatch_schemas::{
    drum::{DrumRecord, InstallEvent},
    reading::Reading,
    status::{DrumStatus, Snapshot},
};
use tracing::{debug, info, warn};

/// Ties the drum registry to a level source and answers every dashboard query.
pub struct DrumMonitor {
    pub(super) registry: DrumRegistry,
    pub(super) source: Box<dyn LevelSource>,
    pub(super) logger: Option<InstallLogger>,
}

impl DrumMonitor {
    /// One reading per drum, in registry order.
    pub fn sample_all(&self, now: NaiveDateTime) -> Vec<Reading> {
        self.registry
            .drums()
            .iter()
            .map(|drum| self.source.sample(&drum.name, now))
            .collect()
    }

    pub fn snapshot(&self, now: NaiveDateTime) -> Snapshot {
        let readings = self.sample_all(now);
        let fleet = fleet_status(&readings);

        let drums: Vec<DrumStatus> = self
            .registry
            .drums()
            .iter()
            .zip(readings)
            .map(|(record, reading)| DrumStatus {
                projection: project(record.installed_at, now, f64::from(reading.percent)),
                record: record.clone(),
                reading,
            })
            .collect();

        debug!(drums = drums.len(), ?fleet, "sampled drums");

        Snapshot {
            taken_at: now,
            fleet,
            drums,
        }
    }

    /// Records that a fresh drum went into service at `installed_at`.
    /// `recorded_at` is the wall-clock time of the operator action.
    ///
    /// The registry is updated before the audit log is written; a failed log
    /// write is reported but does not undo the change.
    pub fn record_install(
        &mut self,
        name: &str,
        installed_at: NaiveDateTime,
        recorded_at: NaiveDateTime,
    ) -> Result<DrumRecord, DrumwatchError> {
        let record = self.registry.record_install(name, installed_at)?.clone();
        info!(drum = %name, %installed_at, "recorded drum install");

        if let Some(logger) = &mut self.logger {
            let event = InstallEvent {
                recorded_at,
                drum: name.to_string(),
                installed_at,
            };
            if let Err(e) = logger.log_install(&event) {
                warn!(drum = %name, error = %e, "failed to append install log");
            }
        }

        Ok(record)
    }

    pub fn get_registry(&self) -> &DrumRegistry {
        &self.registry
    }
}
