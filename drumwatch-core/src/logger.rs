use crate::error::DrumwatchError;
use csv::{Writer, WriterBuilder};
use drumwatch_schemas::drum::InstallEvent;
use serde::Serialize;
use std::fs::{self, OpenOptions};
use std::io;
use std::path::Path;

const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

#[derive(Debug, Serialize)]
struct LogEntry {
    recorded_at: String,
    drum: String,
    installed_at: String,
}

/// Appends every recorded install to a CSV audit file.
///
/// The file is only ever written; the registry is not rebuilt from it.
pub struct InstallLogger {
    path: String,
    writer: Writer<fs::File>,
}

impl InstallLogger {
    pub fn new(path: &str) -> Result<Self, io::Error> {
        let has_content = Path::new(path).metadata().map_or(false, |m| m.len() > 0);
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        let writer = WriterBuilder::new()
            .has_headers(!has_content)
            .from_writer(file);
        Ok(Self {
            path: path.to_string(),
            writer,
        })
    }

    pub fn log_install(&mut self, event: &InstallEvent) -> Result<(), DrumwatchError> {
        let entry = LogEntry {
            recorded_at: event.recorded_at.format(TIMESTAMP_FORMAT).to_string(),
            drum: event.drum.clone(),
            installed_at: event.installed_at.format(TIMESTAMP_FORMAT).to_string(),
        };

        self.writer
            .serialize(entry)
            .map_err(|e| DrumwatchError::CsvError(self.path.clone(), e))?;
        self.writer
            .flush()
            .map_err(|e| DrumwatchError::FileIO(self.path.clone(), e))?;
        Ok(())
    }
}
