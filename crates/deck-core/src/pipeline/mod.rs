//! Ordering and slicing of scored tasks.
//!
//! - [`sort`]: score ordering and rank ordering, both stable
//! - [`paginate`]: discrete 1-indexed pages with clamping
//! - [`window`]: append-and-trim buffer for incremental loading
//! - [`guard`]: in-flight latch and cancellation for "load more" triggers

pub mod guard;
pub mod paginate;
pub mod sort;
pub mod window;

pub use guard::{LoadCoordinator, LoadTicket};
pub use paginate::{Page, PageLimits, PageRequest, paginate};
pub use sort::{SortOrder, sort_by_rank, sort_by_score, sort_tasks_by_priority};
pub use window::{AppendOutcome, WindowBuffer, WindowConfig};
