//! # deck-core
//!
//! Core types and the task prioritization pipeline for TaskDeck.
//!
//! This crate has no I/O. It provides:
//! - Entity structs for tasks and users
//! - Priority, category, and complexity vocabularies
//! - The priority scoring engine and its weight tables
//! - Filter composition over tasks and a completion map
//! - Sorting, discrete pagination, windowed loading, and the load guard
//! - Completion statistics and API response shapes
//! - The engineering task catalogue seeded for new users

pub mod entities;
pub mod enums;
pub mod errors;
pub mod filter;
pub mod identity;
pub mod pipeline;
pub mod responses;
pub mod scoring;
pub mod seed;
pub mod stats;
