use serde::{Deserialize, Serialize};
use std::fmt;

/// Discrete fill band of a drum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum LevelState {
    /// 30 % or less.
    Low,
    /// Above 30 % up to and including 60 %.
    Mid,
    /// Above 60 %.
    AboveMid,
}

impl LevelState {
    pub fn as_str(&self) -> &'static str {
        match self {
            LevelState::Low => "LOW",
            LevelState::Mid => "MID",
            LevelState::AboveMid => "ABOVE_MID",
        }
    }
}

impl fmt::Display for LevelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One level sample for one drum.
///
/// `low_sensor` and `mid_sensor` mirror the two discrete sensor lines fitted to
/// the drums: each reads 1 only while the level sits inside its own band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reading {
    pub name: String,
    /// Fill level in percent, always within `1..=100`.
    pub percent: u8,
    pub level_state: LevelState,
    pub low_sensor: u8,
    pub mid_sensor: u8,
}
