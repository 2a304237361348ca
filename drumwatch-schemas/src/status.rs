use crate::{drum::DrumRecord, projection::Projection, reading::Reading};
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Worst-case summary over every drum in the deployment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FleetStatus {
    /// At least one drum is LOW.
    RefillRequired,
    /// No drum is LOW but at least one is MID.
    PlanReplacement,
    /// Every drum is above MID.
    AllSafe,
}

/// Everything the dashboard shows for a single drum.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DrumStatus {
    pub record: DrumRecord,
    pub reading: Reading,
    pub projection: Projection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub taken_at: NaiveDateTime,
    pub fleet: FleetStatus,
    pub drums: Vec<DrumStatus>,
}
