use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Projected calendar date at which a drum runs dry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmptyDate {
    Estimated(NaiveDate),
    /// No consumption observed yet, the drum already reads empty, or the
    /// projected date falls outside the representable calendar.
    Unavailable,
}

impl fmt::Display for EmptyDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EmptyDate::Estimated(date) => write!(f, "{}", date.format("%Y-%m-%d")),
            EmptyDate::Unavailable => f.write_str("N/A"),
        }
    }
}

/// Linear consumption model for one drum at one instant.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projection {
    /// Whole days since install, never less than 1.
    pub days_in_service: i64,
    /// Average percent of capacity consumed per day since install.
    pub usage_rate: f64,
    /// Days until empty at `usage_rate`, when a projection is possible.
    pub days_left: Option<f64>,
    pub estimated_empty_date: EmptyDate,
}
