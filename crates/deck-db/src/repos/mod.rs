//! Repository modules.
//!
//! Each module adds methods to `DeckService` via `impl DeckService` blocks.

pub mod registration;
pub mod sessions;
pub mod tasks;
pub mod users;
