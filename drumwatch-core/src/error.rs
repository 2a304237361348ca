use thiserror::Error;

#[derive(Debug, Error)]
pub enum DrumwatchError {
    #[error("Drum '{0}' not found in registry")]
    DrumNotFound(String),

    #[error("Drum '{0}' is defined more than once")]
    DuplicateDrum(String),

    #[error("At least one drum must be defined")]
    NoDrumsDefined,

    #[error("I/O error for file '{0}': {1}")]
    FileIO(String, #[source] std::io::Error),

    #[error("Failed to write install log '{0}': {1}")]
    CsvError(String, #[source] csv::Error),
}
