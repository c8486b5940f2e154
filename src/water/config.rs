//! Configuration loading and config directory discovery

use std::env;
use std::fs;
use std::path::PathBuf;

use chrono::FixedOffset;
use log::{debug, info};

use crate::water::catalog::{ActivityCatalog, CatalogError};
use crate::water::models::AppConfig;

/// Environment variable overriding the config directory
pub const CONFIG_DIR_ENV: &str = "WATER_TRACKER_CONFIG_DIR";

const CONFIG_FILE_NAME: &str = "config.json";

/// Largest accepted UTC offset, in minutes
const MAX_OFFSET_MINUTES: i32 = 14 * 60;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("JSON parse error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Daily budget must be a positive number of gallons, got {0}")]
    InvalidBudget(f64),
    #[error("Ring radius must be positive, got {0}")]
    InvalidRadius(f64),
    #[error("Rolling series needs at least one day")]
    InvalidRollingDays,
    #[error("UTC offset out of range: {0} minutes")]
    InvalidOffset(i32),
    #[error("Invalid activity catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Get the config directory path
/// Priority: 1. Custom path, 2. WATER_TRACKER_CONFIG_DIR env var, 3. Platform config dir
pub fn get_config_dir(custom_path: Option<&str>) -> PathBuf {
    if let Some(path) = custom_path {
        return PathBuf::from(path);
    }

    if let Ok(env_path) = env::var(CONFIG_DIR_ENV) {
        return PathBuf::from(env_path);
    }

    if let Some(dir) = dirs::config_dir() {
        return dir.join("water-usage-tracker");
    }

    PathBuf::from(".")
}

/// Get the config file path within the config directory
pub fn get_config_path(custom_path: Option<&str>) -> PathBuf {
    get_config_dir(custom_path).join(CONFIG_FILE_NAME)
}

/// Load and validate the config, falling back to defaults when no file exists
pub fn load_config(custom_path: Option<&str>) -> Result<AppConfig, ConfigError> {
    let path = get_config_path(custom_path);

    if !path.exists() {
        debug!("No config at {:?}, using defaults", path);
        return Ok(AppConfig::default());
    }

    let raw = fs::read_to_string(&path)?;
    let config: AppConfig = serde_json::from_str(&raw)?;
    validate_config(&config)?;

    info!(
        "Loaded config from {:?}: budget {} gal, {} day series",
        path, config.daily_budget_gallons, config.rolling_days
    );
    Ok(config)
}

/// Check value ranges that would otherwise produce meaningless output
pub fn validate_config(config: &AppConfig) -> Result<(), ConfigError> {
    if !config.daily_budget_gallons.is_finite() || config.daily_budget_gallons <= 0.0 {
        return Err(ConfigError::InvalidBudget(config.daily_budget_gallons));
    }
    if !config.ring_radius.is_finite() || config.ring_radius <= 0.0 {
        return Err(ConfigError::InvalidRadius(config.ring_radius));
    }
    if config.rolling_days == 0 {
        return Err(ConfigError::InvalidRollingDays);
    }
    if let Some(minutes) = config.utc_offset_minutes {
        if minutes.abs() > MAX_OFFSET_MINUTES {
            return Err(ConfigError::InvalidOffset(minutes));
        }
    }
    if let Some(activities) = &config.activities {
        ActivityCatalog::new(activities.clone())?;
    }
    Ok(())
}

impl AppConfig {
    /// Catalog from the config override, or the built-in one
    pub fn catalog(&self) -> Result<ActivityCatalog, CatalogError> {
        match &self.activities {
            Some(activities) => ActivityCatalog::new(activities.clone()),
            None => Ok(ActivityCatalog::household()),
        }
    }

    /// Fixed offset for day boundaries, if one is configured
    pub fn fixed_offset(&self) -> Option<FixedOffset> {
        self.utc_offset_minutes
            .and_then(|minutes| FixedOffset::east_opt(minutes * 60))
    }
}
