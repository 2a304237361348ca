use anyhow::{bail, ensure, Context, Result};
use chrono::{NaiveDate, NaiveDateTime};
use drumwatch_core::monitor::{builder::MonitorBuilder, engine::DrumMonitor};
use drumwatch_schemas::drum::DrumDefinition;
use serde::{Deserialize, Serialize};
use std::{collections::HashSet, fs, net::SocketAddr, path::Path};
use tracing::info;

/// Everything the dashboard host needs, loaded from a YAML file.
/// Missing keys fall back to the stock two-drum deployment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub title: String,
    pub subtitle: String,
    /// Socket address the HTTP dashboard listens on.
    pub bind: String,
    /// Browser auto-refresh period for the dashboard page.
    pub refresh_secs: u64,
    /// Optional CSV file receiving one row per recorded install.
    pub install_log: Option<String>,
    pub drums: Vec<DrumDefinition>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            title: "Smart Chemical Drum Monitoring".to_string(),
            subtitle: "1 Company • 2 Drums (AZ EBR200G+) • Real-time level, usage rate & refill prediction"
                .to_string(),
            bind: "0.0.0.0:8080".to_string(),
            refresh_secs: 5,
            install_log: None,
            drums: default_drums(),
        }
    }
}

fn default_drums() -> Vec<DrumDefinition> {
    let at_nine = |day| {
        NaiveDate::from_ymd_opt(2025, 11, day)
            .and_then(|d| d.and_hms_opt(9, 0, 0))
            .unwrap_or_default()
    };
    vec![
        DrumDefinition {
            name: "DRUM 1 (AZ EBR200G+)".to_string(),
            installed_at: at_nine(1),
            phase_offset: 0,
        },
        DrumDefinition {
            name: "DRUM 2 (AZ EBR200G+)".to_string(),
            installed_at: at_nine(2),
            phase_offset: 40,
        },
    ]
}

impl AppConfig {
    /// Loads the configuration from `path`, or the defaults when no path is given.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let config = match path {
            Some(path) => {
                info!("Loading configuration from '{}'...", path.display());
                let content = fs::read_to_string(path)
                    .with_context(|| format!("Failed to read config file: {:?}", path))?;
                Self::from_yaml_str(&content)
                    .with_context(|| format!("Failed to parse YAML from {:?}", path))?
            }
            None => Self::default(),
        };
        config.validate()?;
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.drums.is_empty(), "Configuration must define at least one drum");
        ensure!(self.refresh_secs > 0, "refresh_secs must be greater than zero");

        let mut names = HashSet::new();
        for drum in &self.drums {
            if !names.insert(drum.name.as_str()) {
                bail!("Drum '{}' is defined more than once", drum.name);
            }
        }
        Ok(())
    }

    /// Picks the listen address: the CLI flag wins, then the `PORT`
    /// environment value (applied to the configured host), then `bind`.
    pub fn resolve_bind(
        &self,
        cli_bind: Option<&str>,
        port_env: Option<&str>,
    ) -> Result<SocketAddr> {
        if let Some(bind) = cli_bind {
            return bind
                .parse()
                .with_context(|| format!("Invalid --bind address '{}'", bind));
        }

        let mut addr: SocketAddr = self
            .bind
            .parse()
            .with_context(|| format!("Invalid bind address '{}' in configuration", self.bind))?;
        if let Some(port) = port_env.and_then(|p| p.parse::<u16>().ok()) {
            addr.set_port(port);
        }
        Ok(addr)
    }

    pub fn build_monitor(&self) -> Result<DrumMonitor> {
        let mut builder = MonitorBuilder::new().with_drums(self.drums.clone());
        if let Some(path) = &self.install_log {
            builder = builder.with_install_logging_to_file(path);
        }
        builder.build().context("Failed to build drum monitor")
    }
}

/// Accepts `YYYY-MM-DD HH:MM[:SS]` or the ISO `T`-separated form.
pub fn parse_timestamp(input: &str) -> Result<NaiveDateTime, String> {
    let input = input.trim();
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M", "%Y-%m-%d %H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(input, fmt).ok())
        .ok_or_else(|| format!("'{}' is not a timestamp like 2025-11-01 09:00", input))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_stock_deployment() {
        let config = AppConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.drums.len(), 2);
        assert_eq!(config.drums[0].name, "DRUM 1 (AZ EBR200G+)");
        assert_eq!(config.drums[0].installed_at, parse_timestamp("2025-11-01 09:00").unwrap());
        assert_eq!(config.drums[1].installed_at, parse_timestamp("2025-11-02 09:00").unwrap());
        assert_ne!(config.drums[0].phase_offset, config.drums[1].phase_offset);
        assert_eq!(config.refresh_secs, 5);
    }

    #[test]
    fn test_partial_yaml_keeps_defaults() {
        let config =
            AppConfig::from_yaml_str("refresh_secs: 10\ninstall_log: installs.csv\n").unwrap();
        assert_eq!(config.refresh_secs, 10);
        assert_eq!(config.install_log.as_deref(), Some("installs.csv"));
        assert_eq!(config.drums, AppConfig::default().drums);
    }

    #[test]
    fn test_yaml_drum_list() {
        let yaml = r#"
drums:
  - name: "TANK A"
    installed_at: "2025-10-01T06:30:00"
  - name: "TANK B"
    installed_at: "2025-10-02T06:30:00"
    phase_offset: 35
"#;
        let config = AppConfig::from_yaml_str(yaml).unwrap();
        assert!(config.validate().is_ok());
        assert_eq!(config.drums[0].phase_offset, 0);
        assert_eq!(config.drums[1].phase_offset, 35);
        assert_eq!(config.drums[1].installed_at, parse_timestamp("2025-10-02T06:30").unwrap());
    }

    #[test]
    fn test_validation_rejects_bad_configs() {
        let mut config = AppConfig::default();
        config.drums.clear();
        assert!(config.validate().is_err());

        let mut config = AppConfig::default();
        config.drums[1].name = config.drums[0].name.clone();
        assert!(config.validate().is_err());

        let config = AppConfig {
            refresh_secs: 0,
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_resolve_bind_precedence() {
        let config = AppConfig::default();
        assert_eq!(
            config.resolve_bind(None, None).unwrap(),
            "0.0.0.0:8080".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            config.resolve_bind(None, Some("9000")).unwrap(),
            "0.0.0.0:9000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            config.resolve_bind(Some("127.0.0.1:3000"), Some("9000")).unwrap(),
            "127.0.0.1:3000".parse::<SocketAddr>().unwrap()
        );
        assert_eq!(
            config.resolve_bind(None, Some("not-a-port")).unwrap().port(),
            8080
        );
        assert!(config.resolve_bind(Some("nowhere"), None).is_err());
    }

    #[test]
    fn test_parse_timestamp_formats() {
        let expected = NaiveDate::from_ymd_opt(2025, 11, 1).unwrap().and_hms_opt(9, 0, 0).unwrap();
        for input in [
            "2025-11-01 09:00",
            "2025-11-01T09:00",
            "2025-11-01 09:00:00",
            " 2025-11-01T09:00:00 ",
        ] {
            assert_eq!(parse_timestamp(input).unwrap(), expected, "input {:?}", input);
        }
        assert!(parse_timestamp("yesterday").is_err());
    }

    #[test]
    fn test_build_monitor_from_defaults() {
        let monitor = AppConfig::default().build_monitor().unwrap();
        assert_eq!(monitor.get_registry().len(), 2);
    }
}
