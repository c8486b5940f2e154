//! Water Usage Tracker - daily water budget dashboard core

pub mod commands;
pub mod water;

use water::{ActivityCatalog, AppConfig, ConfigError, EventLog};

/// Session state: the catalog and config fixed at startup plus the live log.
///
/// Owned by the caller and passed explicitly to every command; there is no
/// global log.
#[derive(Debug, Clone, Default)]
pub struct AppState {
    pub catalog: ActivityCatalog,
    pub config: AppConfig,
    pub log: EventLog,
}

impl AppState {
    pub fn new(catalog: ActivityCatalog, config: AppConfig) -> Self {
        Self {
            catalog,
            config,
            log: EventLog::new(),
        }
    }

    /// Build state from a config file in `custom_path` (or the default
    /// config directory), with an empty log
    pub fn from_config_dir(custom_path: Option<&str>) -> Result<Self, ConfigError> {
        let config = water::load_config(custom_path)?;
        let catalog = config.catalog()?;
        log::info!("Session started with {} activities", catalog.len());
        Ok(Self::new(catalog, config))
    }
}
