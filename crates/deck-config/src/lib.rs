//! # deck-config
//!
//! Layered configuration loading for TaskDeck using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`TASKDECK_*` prefix, `__` as separator)
//! 2. Project-level `.taskdeck/config.toml`
//! 3. User-level `~/.config/taskdeck/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `TASKDECK_PAGINATION__MAX_PAGE_SIZE` -> `pagination.max_page_size`,
//! `TASKDECK_SCORING__SCHEME` -> `scoring.scheme`, and so on.
//!
//! ```no_run
//! use deck_config::DeckConfig;
//!
//! let config = DeckConfig::load_with_dotenv().expect("config");
//! println!("page size: {}", config.pagination.default_page_size);
//! ```

mod auth;
mod database;
mod error;
mod pagination;
mod server;

pub use auth::AuthConfig;
pub use database::DatabaseConfig;
pub use deck_core::scoring::{PriorityWeights, ScoringConfig, ScoringScheme};
pub use error::ConfigError;
pub use pagination::PaginationConfig;
pub use server::ServerConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const ENV_PREFIX: &str = "TASKDECK_";
pub const PROJECT_DIR: &str = ".taskdeck";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct DeckConfig {
    #[serde(default)]
    pub database: DatabaseConfig,
    #[serde(default)]
    pub pagination: PaginationConfig,
    #[serde(default)]
    pub scoring: ScoringConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub server: ServerConfig,
}

impl DeckConfig {
    /// Load configuration from all sources (TOML files + environment variables)
    /// and validate it.
    ///
    /// Does NOT call `dotenvy`; use [`Self::load_with_dotenv`] for `.env` support.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Figment` when a source fails to parse, or
    /// `ConfigError::InvalidValue` when a value is out of range.
    pub fn load() -> Result<Self, ConfigError> {
        Self::from_figment(&Self::figment())
    }

    /// Load configuration with `.env` file support.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        let _ = dotenvy::dotenv();
        Self::load()
    }

    /// Extract and validate from an arbitrary figment.
    ///
    /// # Errors
    ///
    /// See [`Self::load`].
    pub fn from_figment(figment: &Figment) -> Result<Self, ConfigError> {
        let config: Self = figment.extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Build the figment provider chain rooted at the current directory.
    #[must_use]
    pub fn figment() -> Figment {
        Self::figment_at(Path::new("."))
    }

    /// Build the figment provider chain with the project config under `root`.
    #[must_use]
    pub fn figment_at(root: &Path) -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        let local_path = root.join(PROJECT_DIR).join("config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        figment.merge(Env::prefixed(ENV_PREFIX).split("__"))
    }

    /// Check cross-field constraints that serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` naming the first offending field.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.pagination.validate()?;
        self.auth.validate()?;

        let weights = &self.scoring.priority_weights;
        for (name, value) in [
            ("critical", weights.critical),
            ("high", weights.high),
            ("medium", weights.medium),
            ("low", weights.low),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ConfigError::invalid(
                    &format!("scoring.priority_weights.{name}"),
                    format!("{value} is not a non-negative number"),
                ));
            }
        }
        Ok(())
    }

    /// Path to the user-global config file.
    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("taskdeck").join("config.toml"))
    }
}
