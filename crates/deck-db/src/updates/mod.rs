//! Partial-update payloads for repository methods.

pub mod task;
