//! Plain-text reports for the one-shot CLI commands.

use crate::dashboard::{fleet_message, status_text};
use chrono::NaiveDateTime;
use drumwatch_schemas::{projection::Projection, status::Snapshot};

pub fn format_status_report(snapshot: &Snapshot) -> String {
    let mut report = String::new();
    report.push_str("--- [Drum Status] ---\n");
    report.push_str("========================================\n");
    report.push_str(&format!("Taken at: {}\n", snapshot.taken_at.format("%Y-%m-%d %H:%M:%S")));
    report.push_str(&format!("{}\n", fleet_message(snapshot.fleet)));
    report.push_str("----------------------------------------\n");

    for drum in &snapshot.drums {
        let reading = &drum.reading;
        report.push_str(&format!("{}\n", drum.record.name));
        report.push_str(&format!(
            "  - Level:                {:>3} % ({})\n",
            reading.percent, reading.level_state
        ));
        report.push_str(&format!(
            "  - Status:               {}\n",
            status_text(reading.level_state)
        ));
        report.push_str(&format!(
            "  - Sensors:              MID={} LOW={}\n",
            reading.mid_sensor, reading.low_sensor
        ));
        report.push_str(&format!(
            "  - Installed on:         {}\n",
            drum.record.installed_at.format("%Y-%m-%d %H:%M")
        ));
        report.push_str(&format!(
            "  - Last replaced:        {}\n",
            drum.record
                .replaced_at
                .map_or_else(|| "N/A".to_string(), |t| t.format("%Y-%m-%d %H:%M").to_string())
        ));
        report.push_str(&format_projection_lines(&drum.projection));
    }

    report.push_str("========================================\n");
    report
}

pub fn format_projection_report(
    installed_at: NaiveDateTime,
    now: NaiveDateTime,
    percent: f64,
    projection: &Projection,
) -> String {
    let mut report = String::new();
    report.push_str("--- [Refill Projection] ---\n");
    report.push_str(&format!(
        "  - Installed at:         {}\n",
        installed_at.format("%Y-%m-%d %H:%M")
    ));
    report.push_str(&format!("  - Evaluated at:         {}\n", now.format("%Y-%m-%d %H:%M")));
    report.push_str(&format!("  - Current level:        {:.0} %\n", percent));
    report.push_str(&format_projection_lines(projection));
    report
}

fn format_projection_lines(projection: &Projection) -> String {
    let days_left = projection
        .days_left
        .map_or_else(|| "N/A".to_string(), |d| format!("{:.2}", d));
    format!(
        "  - Days in service:      {} day(s)\n  - Usage rate:           {:.2} %/day\n  - Days left:            {}\n  - Estimated empty date: {}\n",
        projection.days_in_service,
        projection.usage_rate,
        days_left,
        projection.estimated_empty_date
    )
}
