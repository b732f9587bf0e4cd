//! Application configuration management.

use rust_decimal::Decimal;
use serde::Deserialize;

use crate::types::MONEY_DECIMAL_PLACES;

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Computation engine configuration.
    #[serde(default)]
    pub engine: EngineConfig,
    /// Form-layer validation configuration.
    #[serde(default)]
    pub validation: ValidationConfig,
    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// Computation engine configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// Decimal places for per-line monetary amounts.
    #[serde(default = "default_line_decimal_places")]
    pub line_decimal_places: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            line_decimal_places: default_line_decimal_places(),
        }
    }
}

fn default_line_decimal_places() -> u32 {
    MONEY_DECIMAL_PLACES
}

/// Form-layer validation configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ValidationConfig {
    /// Reject GST rates outside `standard_slabs`.
    #[serde(default)]
    pub enforce_standard_slabs: bool,
    /// Statutory GST slab rates, in percent.
    #[serde(default = "default_standard_slabs")]
    pub standard_slabs: Vec<Decimal>,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            enforce_standard_slabs: false,
            standard_slabs: default_standard_slabs(),
        }
    }
}

fn default_standard_slabs() -> Vec<Decimal> {
    [0, 5, 12, 18, 28].into_iter().map(Decimal::from).collect()
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Default `tracing` filter directive when `RUST_LOG` is unset.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "voucher=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(
                config::Environment::with_prefix("VOUCHER")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }
}
