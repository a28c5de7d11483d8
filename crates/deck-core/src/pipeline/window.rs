use serde::{Deserialize, Serialize};

use crate::errors::CoreError;

pub const DEFAULT_WINDOW_SIZE: usize = 120;
pub const DEFAULT_TRIM_TO: usize = 100;

/// Bounds for the incremental-loading buffer. Always `0 < trim_to < window_size`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "WindowBounds")]
pub struct WindowConfig {
    window_size: usize,
    trim_to: usize,
}

#[derive(Deserialize)]
struct WindowBounds {
    window_size: usize,
    trim_to: usize,
}

impl TryFrom<WindowBounds> for WindowConfig {
    type Error = CoreError;

    fn try_from(bounds: WindowBounds) -> Result<Self, Self::Error> {
        Self::new(bounds.window_size, bounds.trim_to)
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            trim_to: DEFAULT_TRIM_TO,
        }
    }
}

impl WindowConfig {
    /// # Errors
    ///
    /// Returns `CoreError::Validation` unless `0 < trim_to < window_size`.
    pub fn new(window_size: usize, trim_to: usize) -> Result<Self, CoreError> {
        if trim_to == 0 || trim_to >= window_size {
            return Err(CoreError::Validation(format!(
                "trim_to ({trim_to}) must be positive and below window_size ({window_size})"
            )));
        }
        Ok(Self {
            window_size,
            trim_to,
        })
    }

    #[must_use]
    pub const fn window_size(self) -> usize {
        self.window_size
    }

    #[must_use]
    pub const fn trim_to(self) -> usize {
        self.trim_to
    }
}

/// What one append did to the buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppendOutcome {
    pub appended: usize,
    /// Items evicted from the front. Non-zero means earlier positions shifted.
    pub trimmed: usize,
    pub exhausted: bool,
}

/// Accumulating buffer for "load more" paging.
///
/// Each append adds the next page. Once the buffer grows past
/// `window_size`, the oldest items are dropped until `trim_to` remain, and
/// `offset` advances by the number dropped so absolute positions stay
/// addressable.
#[derive(Debug, Clone)]
pub struct WindowBuffer<T> {
    config: WindowConfig,
    items: Vec<T>,
    offset: usize,
    next_page: usize,
    exhausted: bool,
}

impl<T> WindowBuffer<T> {
    #[must_use]
    pub const fn new(config: WindowConfig) -> Self {
        Self {
            config,
            items: Vec::new(),
            offset: 0,
            next_page: 1,
            exhausted: false,
        }
    }

    /// Append one fetched page. A short page marks the source exhausted.
    pub fn append(&mut self, batch: Vec<T>, page_size: usize) -> AppendOutcome {
        let appended = batch.len();
        if appended < page_size {
            self.exhausted = true;
        }
        if appended > 0 {
            self.next_page += 1;
        }
        self.items.extend(batch);

        let mut trimmed = 0;
        if self.items.len() > self.config.window_size {
            trimmed = self.items.len().saturating_sub(self.config.trim_to);
            self.items.drain(..trimmed);
            self.offset += trimmed;
        }

        AppendOutcome {
            appended,
            trimmed,
            exhausted: self.exhausted,
        }
    }

    /// Drop everything and start again from page 1 (after a filter change).
    pub fn reset(&mut self) {
        self.items.clear();
        self.offset = 0;
        self.next_page = 1;
        self.exhausted = false;
    }

    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.items.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Absolute index of the first buffered item.
    #[must_use]
    pub const fn offset(&self) -> usize {
        self.offset
    }

    #[must_use]
    pub const fn next_page(&self) -> usize {
        self.next_page
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        self.exhausted
    }

    #[must_use]
    pub const fn config(&self) -> WindowConfig {
        self.config
    }
}
