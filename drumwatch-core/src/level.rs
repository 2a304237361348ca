//! Level sources: where fill percentages come from, and how they are banded.

use chrono::{NaiveDateTime, Timelike};
use drumwatch_schemas::{
    drum::DrumDefinition,
    reading::{LevelState, Reading},
};
use std::collections::HashMap;

/// Highest percentage still classified as LOW.
pub const LOW_THRESHOLD: u8 = 30;
/// Highest percentage still classified as MID.
pub const MID_THRESHOLD: u8 = 60;
/// Length of the synthetic sawtooth, in seconds.
pub const CYCLE_LENGTH: u32 = 100;

/// A provider of drum fill levels.
///
/// Implementors only supply the raw percentage; `sample` clamps it to
/// `1..=100` and derives the band and sensor lines, so every source yields the
/// same `Reading` shape.
pub trait LevelSource: Send + Sync {
    /// Raw fill level in percent. May fall outside `1..=100`.
    fn read_percent(&self, drum: &str, now: NaiveDateTime) -> i32;

    fn sample(&self, drum: &str, now: NaiveDateTime) -> Reading {
        reading_for(drum, clamp_percent(self.read_percent(drum, now)))
    }
}

/// Clamps a raw level into `1..=100`. Zero is lifted to 1.
pub fn clamp_percent(raw: i32) -> u8 {
    raw.clamp(1, 100) as u8
}

pub fn classify(percent: u8) -> LevelState {
    if percent <= LOW_THRESHOLD {
        LevelState::Low
    } else if percent <= MID_THRESHOLD {
        LevelState::Mid
    } else {
        LevelState::AboveMid
    }
}

/// Builds the full reading for an already clamped percentage.
pub fn reading_for(name: &str, percent: u8) -> Reading {
    let level_state = classify(percent);
    Reading {
        name: name.to_string(),
        percent,
        level_state,
        low_sensor: u8::from(level_state == LevelState::Low),
        mid_sensor: u8::from(level_state == LevelState::Mid),
    }
}

/// Position of `now` within the synthetic cycle, in `0..CYCLE_LENGTH`.
pub fn cycle_phase(now: NaiveDateTime) -> u32 {
    (now.minute() * 60 + now.second()) % CYCLE_LENGTH
}

/// Demo source: a sawtooth driven by the wall-clock minute and second.
///
/// Each drum ramps from 100 % down to 1 % over one cycle. Drums with a phase
/// offset run ahead of the primary drum by that many steps.
#[derive(Debug, Clone, Default)]
pub struct SyntheticLevelSource {
    phase_offsets: HashMap<String, u32>,
}

impl SyntheticLevelSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_definitions(definitions: &[DrumDefinition]) -> Self {
        definitions
            .iter()
            .fold(Self::new(), |source, d| source.with_phase_offset(&d.name, d.phase_offset))
    }

    pub fn with_phase_offset(mut self, drum: &str, offset: u32) -> Self {
        self.phase_offsets.insert(drum.to_string(), offset % CYCLE_LENGTH);
        self
    }
}

impl LevelSource for SyntheticLevelSource {
    fn read_percent(&self, drum: &str, now: NaiveDateTime) -> i32 {
        let offset = self.phase_offsets.get(drum).copied().unwrap_or(0);
        let t = (cycle_phase(now) + offset) % CYCLE_LENGTH;
        (100 - t as i32).max(1)
    }
}

/// Source returning fixed levels, for hosts that push readings in and for tests.
#[derive(Debug, Clone)]
pub struct FixedLevelSource {
    levels: HashMap<String, i32>,
    fallback: i32,
}

impl FixedLevelSource {
    pub fn new(fallback: i32) -> Self {
        Self {
            levels: HashMap::new(),
            fallback,
        }
    }

    pub fn with_level(mut self, drum: &str, percent: i32) -> Self {
        self.levels.insert(drum.to_string(), percent);
        self
    }
}

impl LevelSource for FixedLevelSource {
    fn read_percent(&self, drum: &str, _now: NaiveDateTime) -> i32 {
        self.levels.get(drum).copied().unwrap_or(self.fallback)
    }
}
