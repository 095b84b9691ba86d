use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::{env, fs, path::Path, time::Duration};

use crate::history::DEFAULT_HISTORY_CAPACITY;

pub const SETTINGS_PATH_ENV: &str = "FRESHWATCH_SETTINGS";
pub const HOST_ENV: &str = "FRESHWATCH_HOST";
pub const PORT_ENV: &str = "FRESHWATCH_PORT";
pub const TICK_ENV: &str = "FRESHWATCH_TICK_MS";
pub const DEBUG_ENV: &str = "FRESHWATCH_DEBUG";

pub const MAX_TICK_INTERVAL_MS: u64 = 60 * 60 * 1_000;
pub const MAX_HISTORY_CAPACITY: usize = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase", default)]
pub struct DashboardSettings {
    pub tick_interval_ms: u64,
    pub history_capacity: usize,
    pub host: String,
    pub port: u16,
    /// Fixes the simulated walk for reproducible demos.
    pub simulation_seed: Option<u64>,
    /// Options shown in the (decorative) port selector. The first entry starts selected.
    pub serial_ports: Vec<String>,
    /// Options shown in the (decorative) model selector. The first entry starts selected.
    pub models: Vec<String>,
}

impl Default for DashboardSettings {
    fn default() -> Self {
        Self {
            tick_interval_ms: 800,
            history_capacity: DEFAULT_HISTORY_CAPACITY,
            host: "127.0.0.1".into(),
            port: 8080,
            simulation_seed: None,
            serial_ports: vec!["COM3".into(), "COM4".into(), "/dev/ttyUSB0".into()],
            models: vec![
                "Random Forest".into(),
                "Decision Tree".into(),
                "Logistic Regression".into(),
            ],
        }
    }
}

impl DashboardSettings {
    /// Defaults, overlaid by the JSON file named in `FRESHWATCH_SETTINGS`, then by env overrides.
    pub fn load() -> Result<Self> {
        let mut settings = match env::var(SETTINGS_PATH_ENV) {
            Ok(path) if !path.trim().is_empty() => Self::from_file(Path::new(&path))?,
            _ => Self::default(),
        };
        settings.apply_env_overrides()?;
        settings.validate()?;
        Ok(settings)
    }

    /// A missing file falls back to defaults; a malformed one is an error.
    pub fn from_file(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::warn!(
                "Settings file {} not found; using defaults",
                path.display()
            );
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings from {}", path.display()))?;
        serde_json::from_str(&contents)
            .with_context(|| format!("Failed to parse settings in {}", path.display()))
    }

    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(host) = env::var(HOST_ENV) {
            self.host = host;
        }
        if let Ok(port) = env::var(PORT_ENV) {
            self.port = port
                .trim()
                .parse()
                .with_context(|| format!("{PORT_ENV} must be a port number, got '{port}'"))?;
        }
        if let Ok(tick) = env::var(TICK_ENV) {
            self.tick_interval_ms = tick
                .trim()
                .parse()
                .with_context(|| format!("{TICK_ENV} must be milliseconds, got '{tick}'"))?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 || self.tick_interval_ms > MAX_TICK_INTERVAL_MS {
            bail!(
                "tickIntervalMs must be between 1 and {MAX_TICK_INTERVAL_MS}, got {}",
                self.tick_interval_ms
            );
        }
        if self.history_capacity == 0 || self.history_capacity > MAX_HISTORY_CAPACITY {
            bail!(
                "historyCapacity must be between 1 and {MAX_HISTORY_CAPACITY}, got {}",
                self.history_capacity
            );
        }
        if self.serial_ports.is_empty() {
            bail!("serialPorts must list at least one port");
        }
        if self.models.is_empty() {
            bail!("models must list at least one model");
        }
        Ok(())
    }

    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    pub fn default_port(&self) -> &str {
        self.serial_ports.first().map(String::as_str).unwrap_or_default()
    }

    pub fn default_model(&self) -> &str {
        self.models.first().map(String::as_str).unwrap_or_default()
    }
}

/// `FRESHWATCH_DEBUG=1` or `true` turns on debug logging.
pub fn debug_mode() -> bool {
    env::var(DEBUG_ENV)
        .map(|value| value == "1" || value.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_valid() {
        let settings = DashboardSettings::default();
        settings.validate().unwrap();
        assert_eq!(settings.tick_interval(), Duration::from_millis(800));
        assert_eq!(settings.history_capacity, 20);
        assert_eq!(settings.default_port(), "COM3");
        assert_eq!(settings.default_model(), "Random Forest");
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let settings: DashboardSettings =
            serde_json::from_str(r#"{"tickIntervalMs": 250, "port": 9000}"#).unwrap();
        assert_eq!(settings.tick_interval_ms, 250);
        assert_eq!(settings.port, 9000);
        assert_eq!(settings.history_capacity, 20);
        assert_eq!(settings.bind_addr(), "127.0.0.1:9000");
    }

    #[test]
    fn rejects_zero_tick_and_empty_lists() {
        let mut settings = DashboardSettings {
            tick_interval_ms: 0,
            ..DashboardSettings::default()
        };
        assert!(settings.validate().is_err());

        settings.tick_interval_ms = 800;
        settings.models.clear();
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_oversized_tick_and_capacity() {
        let settings = DashboardSettings {
            tick_interval_ms: u64::MAX,
            ..DashboardSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = DashboardSettings {
            history_capacity: usize::MAX,
            ..DashboardSettings::default()
        };
        assert!(settings.validate().is_err());

        let settings = DashboardSettings {
            tick_interval_ms: MAX_TICK_INTERVAL_MS,
            history_capacity: MAX_HISTORY_CAPACITY,
            ..DashboardSettings::default()
        };
        settings.validate().unwrap();
    }

    #[test]
    fn missing_file_falls_back_to_defaults() {
        let path = std::env::temp_dir().join("freshwatch-settings-does-not-exist.json");
        let settings = DashboardSettings::from_file(&path).unwrap();
        assert_eq!(settings, DashboardSettings::default());
    }

    #[test]
    fn malformed_file_is_an_error() {
        let path = std::env::temp_dir().join(format!(
            "freshwatch-settings-malformed-{}.json",
            std::process::id()
        ));
        fs::write(&path, "{ not json").unwrap();
        let result = DashboardSettings::from_file(&path);
        let _ = fs::remove_file(&path);
        assert!(result.is_err());
    }
}
