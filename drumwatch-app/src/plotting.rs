//! Renders the semicircular level gauge shown on every drum card.

use anyhow::Result;
use drumwatch_core::level::{LOW_THRESHOLD, MID_THRESHOLD};
use drumwatch_schemas::reading::LevelState;
use plotters::prelude::*;
use std::f64::consts::PI;

pub const LOW_COLOUR: RGBColor = RGBColor(0xef, 0x44, 0x44);
pub const MID_COLOUR: RGBColor = RGBColor(0xea, 0xb3, 0x08);
pub const SAFE_COLOUR: RGBColor = RGBColor(0x22, 0xc5, 0x5e);

const LOW_ZONE: RGBColor = RGBColor(0xfe, 0xe2, 0xe2);
const MID_ZONE: RGBColor = RGBColor(0xfe, 0xf3, 0xc7);
const SAFE_ZONE: RGBColor = RGBColor(0xdc, 0xfc, 0xe7);

const WIDTH: u32 = 260;
const HEIGHT: u32 = 140;
const CENTRE: (f64, f64) = (130.0, 130.0);
const ZONE_RADII: (f64, f64) = (120.0, 80.0);
const BAR_RADII: (f64, f64) = (112.0, 88.0);

pub fn state_colour(state: LevelState) -> RGBColor {
    match state {
        LevelState::Low => LOW_COLOUR,
        LevelState::Mid => MID_COLOUR,
        LevelState::AboveMid => SAFE_COLOUR,
    }
}

pub fn hex(colour: RGBColor) -> String {
    format!("#{:02x}{:02x}{:02x}", colour.0, colour.1, colour.2)
}

/// Draws the gauge as a standalone SVG document.
///
/// The dial runs from 0 % on the left to 100 % on the right, with the LOW,
/// MID and safe zones shaded behind a bar in the current state colour.
pub fn render_gauge_svg(percent: u8, state: LevelState) -> Result<String> {
    let percent = f64::from(percent.min(100));
    let low = f64::from(LOW_THRESHOLD);
    let mid = f64::from(MID_THRESHOLD);

    let mut svg = String::new();
    {
        let root = SVGBackend::with_string(&mut svg, (WIDTH, HEIGHT)).into_drawing_area();
        root.fill(&WHITE)?;

        let zones = [(0.0, low, LOW_ZONE), (low, mid, MID_ZONE), (mid, 100.0, SAFE_ZONE)];
        for (from, to, colour) in zones {
            root.draw(&Polygon::new(annular_sector(from, to, ZONE_RADII), colour.filled()))?;
        }

        if percent > 0.0 {
            root.draw(&Polygon::new(
                annular_sector(0.0, percent, BAR_RADII),
                state_colour(state).filled(),
            ))?;
        }

        root.present()?;
    }
    Ok(svg)
}

/// Outline of the ring segment between two gauge values, outer arc first.
fn annular_sector(from: f64, to: f64, (outer, inner): (f64, f64)) -> Vec<(i32, i32)> {
    let steps = ((to - from).ceil() as usize).max(1);
    let values: Vec<f64> = (0..=steps)
        .map(|i| from + (to - from) * i as f64 / steps as f64)
        .collect();

    let mut points: Vec<(i32, i32)> = values.iter().map(|&v| dial_point(v, outer)).collect();
    points.extend(values.iter().rev().map(|&v| dial_point(v, inner)));
    points
}

fn dial_point(value: f64, radius: f64) -> (i32, i32) {
    let angle = PI * (1.0 - value / 100.0);
    (
        (CENTRE.0 + radius * angle.cos()).round() as i32,
        (CENTRE.1 - radius * angle.sin()).round() as i32,
    )
}
