//! HTML rendering for the dashboard page.

use crate::config::AppConfig;
use crate::plotting::{hex, render_gauge_svg, state_colour};
use anyhow::Result;
use drumwatch_schemas::{
    reading::LevelState,
    status::{DrumStatus, FleetStatus, Snapshot},
};

const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M";

const STYLE: &str = r#"
body { font-family: sans-serif; background: #f3f4f6; color: #111111; margin: 0; }
main { max-width: 1100px; margin: 0 auto; padding: 16px; }
h1 { text-align: center; margin-bottom: 4px; }
.subtitle { text-align: center; color: #4b5563; margin-top: 0; }
.banner { padding: 12px 16px; border-radius: 8px; margin: 16px 0; }
.banner.refill_required { background: #fee2e2; }
.banner.plan_replacement { background: #fef3c7; }
.banner.all_safe { background: #dcfce7; }
.notice { padding: 8px 16px; border-radius: 8px; background: #e0f2fe; }
.notice.error { background: #fee2e2; }
.drums { display: grid; grid-template-columns: repeat(auto-fit, minmax(320px, 1fr)); gap: 16px; }
.drum-card { background: #ffffff; border-radius: 12px; padding: 16px; }
.gauge { text-align: center; }
.gauge .value { font-size: 28px; font-weight: bold; margin-top: -8px; }
.metric-label { font-weight: bold; }
.admin-box { background: #ffffff; border-top: 1px solid #e5e7eb; margin-top: 12px; padding-top: 8px; }
"#;

/// A one-off message shown above the drum cards after an operator action.
#[derive(Debug, Clone, PartialEq)]
pub enum Notice {
    Saved(String),
    Error(String),
}

pub fn render_page(
    config: &AppConfig,
    snapshot: &Snapshot,
    notice: Option<&Notice>,
) -> Result<String> {
    let mut page = String::with_capacity(16 * 1024);

    page.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n<meta charset=\"utf-8\">\n");
    page.push_str(&format!(
        "<meta http-equiv=\"refresh\" content=\"{}; url=/\">\n",
        config.refresh_secs
    ));
    page.push_str(&format!("<title>{}</title>\n", escape_html(&config.title)));
    page.push_str(&format!("<style>{}</style>\n</head>\n<body>\n<main>\n", STYLE));

    page.push_str(&format!("<h1>🧪 {}</h1>\n", escape_html(&config.title)));
    page.push_str(&format!("<p class=\"subtitle\">{}</p>\n", escape_html(&config.subtitle)));

    page.push_str(&format!(
        "<div class=\"banner {}\">{}</div>\n",
        fleet_class(snapshot.fleet),
        fleet_message(snapshot.fleet)
    ));

    if let Some(notice) = notice {
        page.push_str(&render_notice(notice));
    }

    page.push_str(&format!(
        "<p>🕒 Last update: <strong>{}</strong></p>\n<hr>\n",
        snapshot.taken_at.format("%Y-%m-%d %H:%M:%S")
    ));

    page.push_str("<h2>🏭 Drum Overview</h2>\n<div class=\"drums\">\n");
    for drum in &snapshot.drums {
        page.push_str(&render_drum_card(drum)?);
    }
    page.push_str("</div>\n<hr>\n");

    page.push_str(
        "<p class=\"info-text\">This dashboard is using simulated level data. Real MID and LOW \
         sensor readings can replace the simulation without changing the monitoring logic.</p>\n",
    );
    page.push_str("</main>\n</body>\n</html>\n");
    Ok(page)
}

fn render_drum_card(drum: &DrumStatus) -> Result<String> {
    let record = &drum.record;
    let reading = &drum.reading;
    let projection = &drum.projection;
    let name = escape_html(&record.name);

    let gauge = render_gauge_svg(reading.percent, reading.level_state)?;
    let replaced = record
        .replaced_at
        .map_or_else(|| "N/A".to_string(), |t| t.format(DATETIME_FORMAT).to_string());

    let mut card = String::new();
    card.push_str("<section class=\"drum-card\">\n");
    card.push_str(&format!("<h4>{}</h4>\n", name));
    card.push_str(&format!(
        "<div class=\"gauge\"><div>Drum Level</div>{}<div class=\"value\" style=\"color:{}\">{} %</div></div>\n",
        gauge,
        hex(state_colour(reading.level_state)),
        reading.percent
    ));
    card.push_str(&format!(
        "<p class=\"info-text\"><span class=\"metric-label\">Status:</span> {}</p>\n",
        status_text(reading.level_state)
    ));
    card.push_str(&format!(
        "<p class=\"info-text\"><span class=\"metric-label\">MID sensor:</span> {} &nbsp;&nbsp; \
         <span class=\"metric-label\">LOW sensor:</span> {}</p>\n",
        reading.mid_sensor, reading.low_sensor
    ));
    card.push_str(&format!(
        "<p class=\"info-text\">\
         <span class=\"metric-label\">Current level:</span> {}%<br>\
         <span class=\"metric-label\">Installed on:</span> {}<br>\
         <span class=\"metric-label\">Last replaced:</span> {}<br>\
         <span class=\"metric-label\">Days in service:</span> {} day(s)<br>\
         <span class=\"metric-label\">Usage rate:</span> {:.2} %/day<br>\
         <span class=\"metric-label\">Estimated empty date:</span> {}</p>\n",
        reading.percent,
        record.installed_at.format(DATETIME_FORMAT),
        replaced,
        projection.days_in_service,
        projection.usage_rate,
        projection.estimated_empty_date
    ));

    card.push_str("<div class=\"admin-box\">\n");
    card.push_str("<p><strong>🛠 Admin – Set installation / replacement datetime</strong></p>\n");
    card.push_str(
        "<p class=\"info-text\">After changing a drum, update the installation date &amp; time \
         here so usage rate and prediction are recalculated.</p>\n",
    );
    card.push_str(&format!(
        "<form method=\"post\" action=\"/install\">\n\
         <input type=\"hidden\" name=\"drum\" value=\"{name}\">\n\
         <label>Installation date <input type=\"date\" name=\"date\" value=\"{date}\" required></label>\n\
         <label>Installation time <input type=\"time\" name=\"time\" value=\"{time}\" required></label>\n\
         <button type=\"submit\">Save for {name}</button>\n\
         </form>\n",
        name = name,
        date = record.installed_at.format("%Y-%m-%d"),
        time = record.installed_at.format("%H:%M"),
    ));
    card.push_str("</div>\n</section>\n");
    Ok(card)
}

fn render_notice(notice: &Notice) -> String {
    match notice {
        Notice::Saved(drum) => format!(
            "<div class=\"notice\">✅ Updated installation/replacement datetime for {}</div>\n",
            escape_html(drum)
        ),
        Notice::Error(message) => format!(
            "<div class=\"notice error\">⚠️ {}</div>\n",
            escape_html(message)
        ),
    }
}

pub fn status_text(state: LevelState) -> &'static str {
    match state {
        LevelState::Low => "🔴 LOW – Refill required immediately.",
        LevelState::Mid => "🟡 MID – Monitor closely and plan refill.",
        LevelState::AboveMid => "🟢 ABOVE MID – Drum level is in a safe range.",
    }
}

pub fn fleet_message(status: FleetStatus) -> &'static str {
    match status {
        FleetStatus::RefillRequired => "⚠️ WARNING: At least one drum is at LOW level. Please refill immediately.",
        FleetStatus::PlanReplacement => "🟡 Notice: One or more drums are at MID level. Plan for replacement soon.",
        FleetStatus::AllSafe => "✅ All drums are currently above MID level (safe).",
    }
}

fn fleet_class(status: FleetStatus) -> &'static str {
    match status {
        FleetStatus::RefillRequired => "refill_required",
        FleetStatus::PlanReplacement => "plan_replacement",
        FleetStatus::AllSafe => "all_safe",
    }
}

pub fn escape_html(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for c in input.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
