use serde::{Deserialize, Serialize};

use deck_core::enums::{Category, Priority};
use deck_core::filter::{Selection, StatusFilter, TaskFilter};

const fn first_page() -> i64 {
    1
}

/// Remembered filters plus the page they were viewed at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSelection {
    #[serde(default)]
    pub filter: TaskFilter,
    #[serde(default = "first_page")]
    pub page: i64,
}

impl Default for FilterSelection {
    fn default() -> Self {
        Self {
            filter: TaskFilter::default(),
            page: first_page(),
        }
    }
}

impl FilterSelection {
    /// Replace the filter. A different filter starts over at page 1.
    #[must_use]
    pub fn with_filter(self, filter: TaskFilter) -> Self {
        if filter == self.filter {
            self
        } else {
            Self {
                filter,
                page: first_page(),
            }
        }
    }

    /// Overlay whichever predicates were given on the command line.
    #[must_use]
    pub fn with_flags(
        self,
        status: Option<StatusFilter>,
        category: Option<Selection<Category>>,
        priority: Option<Selection<Priority>>,
    ) -> Self {
        let filter = TaskFilter {
            status: status.unwrap_or(self.filter.status),
            category: category.unwrap_or(self.filter.category),
            priority: priority.unwrap_or(self.filter.priority),
        };
        self.with_filter(filter)
    }

    #[must_use]
    pub fn with_page(self, page: i64) -> Self {
        Self {
            page: page.max(1),
            ..self
        }
    }
}
