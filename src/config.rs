//! Configuration System
//!
//! Handles loading configuration from files and environment variables.
//! Supports TOML config files and environment variable overrides.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,

    #[serde(default)]
    pub session: SessionConfig,

    #[serde(default)]
    pub ui: UiConfig,

    #[serde(default)]
    pub animation: AnimationConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

/// REST API connection settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// Base URL including the version prefix, e.g. `http://127.0.0.1:5000/api/v1`
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Unset means requests never time out
    #[serde(default)]
    pub request_timeout_secs: Option<u64>,
}

pub const DEFAULT_API_BASE: &str = "http://127.0.0.1:5000/api/v1";

fn default_base_url() -> String {
    DEFAULT_API_BASE.to_string()
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: None,
        }
    }
}

/// Where the session token lives on the client
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    #[serde(default = "default_cookie_name")]
    pub cookie_name: String,

    #[serde(default = "default_cookie_path")]
    pub cookie_path: String,
}

fn default_cookie_name() -> String {
    "token".to_string()
}

fn default_cookie_path() -> String {
    "/".to_string()
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: default_cookie_name(),
            cookie_path: default_cookie_path(),
        }
    }
}

/// Page behaviour settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UiConfig {
    /// How long transient notices stay visible
    #[serde(default = "default_error_hide_ms")]
    pub error_hide_ms: u64,

    #[serde(default = "default_home_page")]
    pub home_page: String,

    /// Where a successful login navigates to
    #[serde(default = "default_home_page")]
    pub login_redirect: String,

    /// Maxima offered by the price filter, in addition to "All"
    #[serde(default = "default_price_options")]
    pub price_options: Vec<u32>,
}

fn default_error_hide_ms() -> u64 {
    5000
}

fn default_home_page() -> String {
    "index.html".to_string()
}

fn default_price_options() -> Vec<u32> {
    vec![10, 50, 100]
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            error_hide_ms: default_error_hide_ms(),
            home_page: default_home_page(),
            login_redirect: default_home_page(),
            price_options: default_price_options(),
        }
    }
}

/// Inclusive `[min, max]` range sampled uniformly at spawn time
pub type SpawnRange = [f64; 2];

/// Shadow animation tuning
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct AnimationConfig {
    /// Upper bound on live shadows
    #[serde(default = "default_capacity")]
    pub capacity: usize,

    /// Probability per frame that one shadow is born while below capacity
    #[serde(default = "default_spawn_chance")]
    pub spawn_chance: f64,

    #[serde(default = "default_radius")]
    pub radius: SpawnRange,

    /// Oscillation amplitude in pixels, used for both axes
    #[serde(default = "default_amplitude")]
    pub amplitude: SpawnRange,

    /// Angular speed in radians per second
    #[serde(default = "default_speed")]
    pub speed: SpawnRange,

    /// Base alpha before the age fade
    #[serde(default = "default_alpha")]
    pub alpha: SpawnRange,

    /// Blur radius in pixels
    #[serde(default = "default_blur")]
    pub blur: SpawnRange,

    /// Lifetime in seconds
    #[serde(default = "default_lifetime")]
    pub lifetime: SpawnRange,

    /// Lateral drift magnitude in pixels per second
    #[serde(default = "default_lateral_drift")]
    pub lateral_drift: SpawnRange,

    /// Vertical drift in pixels per second, may be negative
    #[serde(default = "default_vertical_drift")]
    pub vertical_drift: SpawnRange,

    /// Delta used for the very first frame, in seconds
    #[serde(default = "default_nominal_dt")]
    pub nominal_dt: f64,

    /// Largest delta a single frame may advance, in seconds
    #[serde(default = "default_max_dt")]
    pub max_dt: f64,

    #[serde(default = "default_color")]
    pub color: String,
}

fn default_capacity() -> usize {
    7
}

fn default_spawn_chance() -> f64 {
    0.04
}

fn default_radius() -> SpawnRange {
    [120.0, 350.0]
}

fn default_amplitude() -> SpawnRange {
    [40.0, 140.0]
}

fn default_speed() -> SpawnRange {
    [0.08, 0.3]
}

fn default_alpha() -> SpawnRange {
    [0.05, 0.14]
}

fn default_blur() -> SpawnRange {
    [30.0, 70.0]
}

fn default_lifetime() -> SpawnRange {
    [18.0, 32.0]
}

fn default_lateral_drift() -> SpawnRange {
    [2.0, 8.0]
}

fn default_vertical_drift() -> SpawnRange {
    [-3.0, 3.0]
}

fn default_nominal_dt() -> f64 {
    1.0 / 60.0
}

fn default_max_dt() -> f64 {
    0.25
}

fn default_color() -> String {
    "#0b0b14".to_string()
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            capacity: default_capacity(),
            spawn_chance: default_spawn_chance(),
            radius: default_radius(),
            amplitude: default_amplitude(),
            speed: default_speed(),
            alpha: default_alpha(),
            blur: default_blur(),
            lifetime: default_lifetime(),
            lateral_drift: default_lateral_drift(),
            vertical_drift: default_vertical_drift(),
            nominal_dt: default_nominal_dt(),
            max_dt: default_max_dt(),
            color: default_color(),
        }
    }
}

impl AnimationConfig {
    /// Check ranges and probabilities for values the animation cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::Invalid("animation.capacity must be at least 1".into()));
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return Err(ConfigError::Invalid(format!(
                "animation.spawn_chance must be within [0, 1], got {}",
                self.spawn_chance
            )));
        }

        let ranges = [
            ("radius", self.radius),
            ("amplitude", self.amplitude),
            ("speed", self.speed),
            ("alpha", self.alpha),
            ("blur", self.blur),
            ("lifetime", self.lifetime),
            ("lateral_drift", self.lateral_drift),
            ("vertical_drift", self.vertical_drift),
        ];
        for (name, [min, max]) in ranges {
            if !(min.is_finite() && max.is_finite()) || min > max {
                return Err(ConfigError::Invalid(format!(
                    "animation.{} must be an ordered [min, max] pair, got [{}, {}]",
                    name, min, max
                )));
            }
        }

        if self.lifetime[0] <= 0.0 {
            return Err(ConfigError::Invalid("animation.lifetime must be positive".into()));
        }
        if self.alpha[0] <= 0.0 || self.alpha[1] > 1.0 {
            return Err(ConfigError::Invalid("animation.alpha must lie within (0, 1]".into()));
        }
        if self.nominal_dt <= 0.0 || self.max_dt < self.nominal_dt {
            return Err(ConfigError::Invalid(
                "animation.nominal_dt must be positive and not exceed max_dt".into(),
            ));
        }

        Ok(())
    }
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,

    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: None,
            error: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from a file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            error: e.to_string(),
        })?;

        let config: Config = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: Some(path.to_path_buf()),
            error: e.to_string(),
        })?;
        config.validate()?;

        Ok(config)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Result<Self, ConfigError> {
        let mut config = Config::default();
        config.apply_overrides(env_var);
        config.validate()?;
        Ok(config)
    }

    /// Load configuration with environment variable overrides
    pub fn load_with_env(path: &Path) -> Result<Self, ConfigError> {
        Self::load_with_overrides(path, env_var)
    }

    /// Load a file, then apply overrides looked up by variable name. The
    /// result is validated after the overrides.
    pub fn load_with_overrides(
        path: &Path,
        var: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = Self::load(path)?;
        config.apply_overrides(var);
        config.validate()?;
        Ok(config)
    }

    /// Load from default locations or environment
    #[cfg(feature = "native")]
    pub fn load_default() -> Self {
        let config_paths = [
            dirs::config_dir().map(|p| p.join("hbnb").join("config.toml")),
            Some(PathBuf::from("./hbnb.toml")),
        ];

        for path in config_paths.iter().flatten() {
            if path.exists() {
                match Self::load_with_env(path) {
                    Ok(config) => {
                        tracing::info!("Loaded config from {:?}", path);
                        return config;
                    }
                    Err(e) => {
                        tracing::warn!("Failed to load config from {:?}: {}", path, e);
                    }
                }
            }
        }

        tracing::info!("Using default config with environment overrides");
        Self::from_env().unwrap_or_else(|e| {
            tracing::warn!("Ignoring environment overrides: {}", e);
            Self::default()
        })
    }

    /// Reject values no component can run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.api.base_url.trim().is_empty() {
            return Err(ConfigError::Invalid("api.base_url must not be empty".into()));
        }
        if self.session.cookie_name.trim().is_empty() {
            return Err(ConfigError::Invalid("session.cookie_name must not be empty".into()));
        }
        self.animation.validate()
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(url) = var("HBNB_API_URL") {
            self.api.base_url = url;
        }
        if let Some(secs) = var("HBNB_API_TIMEOUT_SECS") {
            if let Ok(s) = secs.parse() {
                self.api.request_timeout_secs = Some(s);
            }
        }

        if let Some(level) = var("HBNB_LOG_LEVEL") {
            self.logging.level = level;
        }
        if let Some(format) = var("HBNB_LOG_FORMAT") {
            self.logging.format = format;
        }
    }
}

fn env_var(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {error}")]
    Io { path: PathBuf, error: String },

    #[error("Failed to parse config {path:?}: {error}")]
    Parse { path: Option<PathBuf>, error: String },

    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Generate a default config file content
pub fn generate_default_config() -> String {
    r##"# HBnB front end configuration
#
# Environment variables override these settings:
# - HBNB_API_URL
# - HBNB_API_TIMEOUT_SECS
# - HBNB_LOG_LEVEL
# - HBNB_LOG_FORMAT

[api]
# REST API base URL, including the version prefix
base_url = "http://127.0.0.1:5000/api/v1"

# Request timeout in seconds (omit for no timeout)
# request_timeout_secs = 30

[session]
cookie_name = "token"
cookie_path = "/"

[ui]
# How long transient error messages stay visible (ms)
error_hide_ms = 5000
home_page = "index.html"
login_redirect = "index.html"
price_options = [10, 50, 100]

[animation]
# Maximum number of shadows alive at once
capacity = 7

# Chance per frame that a new shadow is born while below capacity
spawn_chance = 0.04

radius = [120.0, 350.0]
amplitude = [40.0, 140.0]
speed = [0.08, 0.3]
alpha = [0.05, 0.14]
blur = [30.0, 70.0]
lifetime = [18.0, 32.0]
lateral_drift = [2.0, 8.0]
vertical_drift = [-3.0, 3.0]
nominal_dt = 0.016666666666666666
max_dt = 0.25
color = "#0b0b14"

[logging]
# Log level: trace, debug, info, warn, error
level = "info"

# Log format: pretty (for development) or json (for production)
format = "pretty"
"##
    .to_string()
}
