//! HTTP host for the dashboard: page, JSON snapshot and the install form.

use crate::config::AppConfig;
use crate::dashboard::{render_page, Notice};
use anyhow::Context;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::{get, post},
    Form, Json, Router,
};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use drumwatch_core::{error::DrumwatchError, monitor::engine::DrumMonitor};
use drumwatch_schemas::status::Snapshot;
use serde::Deserialize;
use std::{net::SocketAddr, sync::Arc};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

#[derive(Clone)]
pub struct AppState {
    monitor: Arc<Mutex<DrumMonitor>>,
    config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(config: AppConfig, monitor: DrumMonitor) -> Self {
        Self {
            monitor: Arc::new(Mutex::new(monitor)),
            config: Arc::new(config),
        }
    }
}

#[derive(Debug)]
pub enum AppError {
    NotFound(String),
    Internal(anyhow::Error),
}

impl From<anyhow::Error> for AppError {
    fn from(e: anyhow::Error) -> Self {
        AppError::Internal(e)
    }
}

impl From<DrumwatchError> for AppError {
    fn from(e: DrumwatchError) -> Self {
        match e {
            DrumwatchError::DrumNotFound(_) => AppError::NotFound(e.to_string()),
            other => AppError::Internal(other.into()),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match self {
            AppError::NotFound(message) => (StatusCode::NOT_FOUND, message).into_response(),
            AppError::Internal(e) => {
                error!(error = %format!("{:#}", e), "request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error").into_response()
            }
        }
    }
}

/// Operator input from a drum card's admin form.
#[derive(Debug, Deserialize)]
pub struct InstallForm {
    pub drum: String,
    pub date: String,
    pub time: String,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/api/drums", get(api_drums))
        .route("/install", post(record_install))
        .with_state(state)
}

pub async fn serve(state: AppState, addr: SocketAddr) -> anyhow::Result<()> {
    let app = router(state);

    info!("listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}

fn now() -> NaiveDateTime {
    Local::now().naive_local()
}

pub async fn dashboard(State(state): State<AppState>) -> Result<Html<String>, AppError> {
    let snapshot = state.monitor.lock().await.snapshot(now());
    Ok(Html(render_page(&state.config, &snapshot, None)?))
}

pub async fn api_drums(State(state): State<AppState>) -> Json<Snapshot> {
    Json(state.monitor.lock().await.snapshot(now()))
}

/// Saves an install from the admin form and re-renders the dashboard.
/// Unparseable input leaves the registry alone and comes back as a 400 page
/// carrying the error notice.
pub async fn record_install(
    State(state): State<AppState>,
    Form(form): Form<InstallForm>,
) -> Result<(StatusCode, Html<String>), AppError> {
    let (status, notice, snapshot) = match parse_install_form(&form.date, &form.time) {
        Ok(installed_at) => {
            let mut monitor = state.monitor.lock().await;
            let recorded_at = now();
            monitor.record_install(&form.drum, installed_at, recorded_at)?;
            let snapshot = monitor.snapshot(recorded_at);
            (StatusCode::OK, Notice::Saved(form.drum.clone()), snapshot)
        }
        Err(message) => {
            warn!(drum = %form.drum, %message, "rejected install form");
            let snapshot = state.monitor.lock().await.snapshot(now());
            (StatusCode::BAD_REQUEST, Notice::Error(message), snapshot)
        }
    };

    let page = render_page(&state.config, &snapshot, Some(&notice))?;
    Ok((status, Html(page)))
}

/// Combines the separate date and time inputs into one timestamp.
/// Browsers send the time as `HH:MM`, or `HH:MM:SS` when seconds are shown.
pub fn parse_install_form(date: &str, time: &str) -> Result<NaiveDateTime, String> {
    let date = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Invalid installation date '{}'", date))?;
    let time = NaiveTime::parse_from_str(time.trim(), "%H:%M:%S")
        .or_else(|_| NaiveTime::parse_from_str(time.trim(), "%H:%M"))
        .map_err(|_| format!("Invalid installation time '{}'", time))?;
    Ok(date.and_time(time))
}
