//! Configuration loading and config file resolution
//!
//! Every field has a compiled default, so a missing file is never an error.
//! The logistic model itself is compiled into `geoprov-infer`; the optional
//! `[model]` table only overrides it.

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "GEOPROV_CONFIG";

/// Environment variable overriding `server.bind`
pub const BIND_ENV_VAR: &str = "GEOPROV_BIND";

/// Environment variable overriding `logging.level`
pub const LOG_LEVEL_ENV_VAR: &str = "GEOPROV_LOG_LEVEL";

/// Top-level TOML configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TomlConfig {
    pub logging: LoggingConfig,
    pub server: ServerConfig,
    pub producers: ProducerConfig,
    /// Optional override of the compiled-in logistic model
    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<ModelConfig>,
}

/// Logging configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Default tracing level ("trace", "debug", "info", "warn", "error")
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}

/// HTTP service configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    pub bind: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind: "127.0.0.1:5740".to_string(),
        }
    }
}

/// Signal producer settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ProducerConfig {
    /// Per-producer deadline; a producer still running afterwards is reported as failed
    pub timeout_secs: Option<u64>,
    /// User-Agent sent with every outbound HTTP request
    pub user_agent: String,
    /// Nominatim-compatible reverse geocoding endpoint
    pub nominatim_url: String,
    /// IP geolocation endpoint; the resolved address is appended as a path segment
    pub ip_geolocation_url: String,
    /// WHOIS server queried first (referrals are followed from there)
    pub whois_server: String,
    /// TSV (`domain<TAB>lat,lon`) or JSON (`{"domain": "lat,lon"}`) coordinate table
    pub wikidata_coords_path: Option<PathBuf>,
    /// Signal names that are not registered with the orchestrator
    pub disabled: Vec<String>,
}

impl Default for ProducerConfig {
    fn default() -> Self {
        Self {
            timeout_secs: Some(30),
            user_agent: format!("geoprov/{}", env!("CARGO_PKG_VERSION")),
            nominatim_url: "https://nominatim.openstreetmap.org/reverse".to_string(),
            ip_geolocation_url: "http://ip-api.com/json".to_string(),
            whois_server: "whois.iana.org".to_string(),
            wikidata_coords_path: None,
            disabled: Vec::new(),
        }
    }
}

/// Logistic model override
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelConfig {
    pub intercept: f64,
    #[serde(default = "default_calibration_exponent")]
    pub calibration_exponent: f64,
    /// Coefficient per coefficient key (signal name or evidence variant)
    pub weights: BTreeMap<String, f64>,
}

fn default_calibration_exponent() -> f64 {
    1.2
}

/// Resolve the config file path following priority order:
/// 1. Command-line argument (highest priority)
/// 2. Environment variable
/// 3. Platform config directory (`<config_dir>/geoprov/config.toml`), if it exists
///
/// Returns `None` when no file applies and compiled defaults should be used.
pub fn resolve_config_path(cli_arg: Option<&Path>) -> Option<PathBuf> {
    // Priority 1: Command-line argument
    if let Some(path) = cli_arg {
        return Some(path.to_path_buf());
    }

    // Priority 2: Environment variable
    if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
        if !path.trim().is_empty() {
            return Some(PathBuf::from(path));
        }
    }

    // Priority 3: Platform default, only when present
    default_config_path().filter(|path| path.exists())
}

/// Platform config file location (`~/.config/geoprov/config.toml` on Linux)
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("geoprov").join("config.toml"))
}

/// Load configuration from a TOML file
pub fn load_toml_config(path: &Path) -> Result<TomlConfig> {
    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::Config(format!("Read {} failed: {}", path.display(), e)))?;
    let config: TomlConfig = toml::from_str(&content)
        .map_err(|e| Error::Config(format!("Parse {} failed: {}", path.display(), e)))?;
    config.validate()?;
    debug!("Loaded configuration from {}", path.display());
    Ok(config)
}

/// Load configuration (file if resolvable, else defaults) and apply ENV overrides
pub fn load_config(cli_arg: Option<&Path>) -> Result<TomlConfig> {
    let mut config = match resolve_config_path(cli_arg) {
        Some(path) => {
            info!("Configuration file: {}", path.display());
            load_toml_config(&path)?
        }
        None => {
            info!("No configuration file found, using compiled defaults");
            TomlConfig::default()
        }
    };

    if let Ok(bind) = std::env::var(BIND_ENV_VAR) {
        if !bind.trim().is_empty() {
            config.server.bind = bind;
        }
    }
    if let Ok(level) = std::env::var(LOG_LEVEL_ENV_VAR) {
        if !level.trim().is_empty() {
            config.logging.level = level;
        }
    }

    Ok(config)
}

/// Write configuration to a TOML file atomically (temp file + rename)
pub fn write_toml_config(config: &TomlConfig, path: &Path) -> Result<()> {
    let content = toml::to_string_pretty(config)
        .map_err(|e| Error::Config(format!("Serialize TOML failed: {}", e)))?;

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let tmp_path = path.with_extension("toml.tmp");
    std::fs::write(&tmp_path, content)?;
    std::fs::rename(&tmp_path, path)?;
    Ok(())
}

impl TomlConfig {
    /// Reject values that cannot work at runtime
    pub fn validate(&self) -> Result<()> {
        if self.producers.timeout_secs == Some(0) {
            return Err(Error::Config(
                "producers.timeout_secs must be greater than zero".to_string(),
            ));
        }
        for name in &self.producers.disabled {
            name.parse::<crate::SignalName>()
                .map_err(|_| Error::Config(format!("producers.disabled: unknown signal '{}'", name)))?;
        }
        if let Some(model) = &self.model {
            let all_finite = model.intercept.is_finite()
                && model.calibration_exponent.is_finite()
                && model.weights.values().all(|w| w.is_finite());
            if !all_finite {
                return Err(Error::Config("model values must be finite numbers".to_string()));
            }
            if model.calibration_exponent <= 0.0 {
                return Err(Error::Config(
                    "model.calibration_exponent must be positive".to_string(),
                ));
            }
        }
        Ok(())
    }
}
