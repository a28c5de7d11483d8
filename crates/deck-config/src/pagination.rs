//! Page size limits and the incremental-loading window.

use deck_core::pipeline::paginate::{DEFAULT_PAGE_SIZE, MAX_PAGE_SIZE};
use deck_core::pipeline::window::{DEFAULT_TRIM_TO, DEFAULT_WINDOW_SIZE};
use deck_core::pipeline::{PageLimits, WindowConfig};
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

const fn default_page_size() -> usize {
    DEFAULT_PAGE_SIZE
}

const fn default_max_page_size() -> usize {
    MAX_PAGE_SIZE
}

const fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

const fn default_trim_to() -> usize {
    DEFAULT_TRIM_TO
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PaginationConfig {
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,

    /// Hard cap applied to every requested page size.
    #[serde(default = "default_max_page_size")]
    pub max_page_size: usize,

    /// Buffer length that triggers trimming during windowed loading.
    #[serde(default = "default_window_size")]
    pub window_size: usize,

    /// Buffer length kept after a trim.
    #[serde(default = "default_trim_to")]
    pub trim_to: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            default_page_size: default_page_size(),
            max_page_size: default_max_page_size(),
            window_size: default_window_size(),
            trim_to: default_trim_to(),
        }
    }
}

impl PaginationConfig {
    #[must_use]
    pub const fn limits(&self) -> PageLimits {
        PageLimits {
            default_page_size: self.default_page_size,
            max_page_size: self.max_page_size,
        }
    }

    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` unless `0 < trim_to < window_size`.
    pub fn window(&self) -> Result<WindowConfig, ConfigError> {
        WindowConfig::new(self.window_size, self.trim_to)
            .map_err(|e| ConfigError::invalid("pagination.trim_to", e.to_string()))
    }

    pub(crate) fn validate(&self) -> Result<(), ConfigError> {
        if self.default_page_size == 0 {
            return Err(ConfigError::invalid(
                "pagination.default_page_size",
                "must be at least 1",
            ));
        }
        if self.default_page_size > self.max_page_size {
            return Err(ConfigError::invalid(
                "pagination.default_page_size",
                format!(
                    "{} exceeds max_page_size {}",
                    self.default_page_size, self.max_page_size
                ),
            ));
        }
        self.window().map(|_| ())
    }
}
