//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `fabline.toml` in the working directory. Every field has a
//! sensible default so the file is optional. Environment variables take
//! precedence over file values.

use std::time::Duration;

use serde::Deserialize;

use fabline_app::services::production_line::LineConfig;
use fabline_domain::id::DeviceId;
use fabline_domain::machine::IndustrialMachine;

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Production line identity and location.
    pub line: LineSettings,
    /// Machines attached to the line.
    pub fleet: FleetConfig,
    /// Monitoring loop settings.
    pub monitoring: MonitoringConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Production line identity.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LineSettings {
    pub id: String,
    pub name: String,
    pub latitude: f64,
    pub longitude: f64,
}

/// Fleet composition.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct FleetConfig {
    /// Number of machines to build.
    pub machines: usize,
    /// Accelerometers fitted to each machine.
    pub accelerometers_per_machine: usize,
    /// Machine ids are `{machine_prefix}_{n}`, `n` starting at 1.
    pub machine_prefix: String,
}

/// Monitoring loop configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct MonitoringConfig {
    /// Number of ticks to run between start and stop.
    pub ticks: u32,
    /// Delay between ticks, in milliseconds.
    pub tick_interval_ms: u64,
    /// Seed for the random source. OS entropy when absent.
    pub seed: Option<u64>,
}

/// Logging configuration.
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Config {
    /// Load configuration from `fabline.toml` (if present) then apply
    /// environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML file exists but is malformed, or if the
    /// resulting configuration is invalid.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::from_file("fabline.toml")?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    fn from_file(path: &str) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(Self::default()),
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_env_overrides(&mut self) {
        if let Ok(val) = std::env::var("FABLINE_LINE_ID") {
            self.line.id = val;
        }
        if let Ok(val) = std::env::var("FABLINE_MACHINES") {
            if let Ok(machines) = val.parse() {
                self.fleet.machines = machines;
            }
        }
        if let Ok(val) = std::env::var("FABLINE_TICKS") {
            if let Ok(ticks) = val.parse() {
                self.monitoring.ticks = ticks;
            }
        }
        if let Ok(val) = std::env::var("FABLINE_TICK_INTERVAL_MS") {
            if let Ok(ms) = val.parse() {
                self.monitoring.tick_interval_ms = ms;
            }
        }
        if let Ok(val) = std::env::var("FABLINE_SEED") {
            if let Ok(seed) = val.parse() {
                self.monitoring.seed = Some(seed);
            }
        }
        if let Ok(val) = std::env::var("FABLINE_LOG") {
            self.logging.filter = val;
        }
        if let Ok(val) = std::env::var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.line.id.is_empty() {
            return Err(ConfigError::Validation("line id must not be empty".to_string()));
        }
        if self.fleet.machines == 0 {
            return Err(ConfigError::Validation(
                "fleet must contain at least one machine".to_string(),
            ));
        }
        if self.monitoring.tick_interval_ms == 0 {
            return Err(ConfigError::Validation(
                "tick interval must be non-zero".to_string(),
            ));
        }
        if !(-90.0..=90.0).contains(&self.line.latitude) {
            return Err(ConfigError::Validation(format!(
                "latitude {} out of range",
                self.line.latitude
            )));
        }
        if !(-180.0..=180.0).contains(&self.line.longitude) {
            return Err(ConfigError::Validation(format!(
                "longitude {} out of range",
                self.line.longitude
            )));
        }
        Ok(())
    }

    /// Identity of the production line.
    #[must_use]
    pub fn line_config(&self) -> LineConfig {
        LineConfig {
            line_id: DeviceId::new(self.line.id.clone()),
            name: self.line.name.clone(),
            latitude: self.line.latitude,
            longitude: self.line.longitude,
        }
    }

    /// Build the configured machines.
    #[must_use]
    pub fn machines(&self) -> Vec<IndustrialMachine> {
        (1..=self.fleet.machines)
            .map(|n| {
                IndustrialMachine::new(
                    DeviceId::new(format!("{}_{n}", self.fleet.machine_prefix)),
                    self.fleet.accelerometers_per_machine,
                )
            })
            .collect()
    }

    /// Delay between monitoring ticks.
    #[must_use]
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.monitoring.tick_interval_ms)
    }
}

impl Default for LineSettings {
    fn default() -> Self {
        Self {
            id: "production_line_1".to_string(),
            name: "TestProductionLine".to_string(),
            latitude: 44.613_310_387_452_27,
            longitude: 10.892_943_550_441_561,
        }
    }
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            machines: 3,
            accelerometers_per_machine: IndustrialMachine::DEFAULT_ACCELEROMETERS,
            machine_prefix: "industrial_machine".to_string(),
        }
    }
}

impl Default for MonitoringConfig {
    fn default() -> Self {
        Self {
            ticks: 10,
            tick_interval_ms: 1000,
            seed: None,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "fablined=info,fabline_app=info".to_string(),
        }
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
    /// Semantic validation failure.
    #[error("invalid configuration: {0}")]
    Validation(String),
}
