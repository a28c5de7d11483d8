//! Entity structs for TaskDeck domain objects.
//!
//! Each entity maps to a table in the libSQL database. All structs derive
//! `Serialize`, `Deserialize`, and `JsonSchema`; JSON field names are camelCase
//! to match the HTTP API.

mod session;
mod task;
mod user;

pub use session::Session;
pub use task::{NewTask, ScoredTask, Task};
pub use user::User;
