//! # lift-core
//!
//! Core types and pure computations for liftlog.
//!
//! This crate provides the foundational types shared across all liftlog crates:
//! - The [`Entry`](entry::Entry) record and collection ordering helpers
//! - ID prefix constants and generation
//! - Parsing of user-typed weight and reps text
//! - Derived views: per-exercise chart series, summaries, and the exercise catalog
//! - The lightweight owner identity passed between auth and storage
//! - Cross-cutting error types

pub mod catalog;
pub mod entry;
pub mod errors;
pub mod identity;
pub mod ids;
pub mod parse;
pub mod view;

pub use catalog::{BUILTIN_EXERCISES, exercise_catalog};
pub use entry::Entry;
pub use errors::CoreError;
pub use identity::OwnerIdentity;
pub use view::{ExerciseSummary, Series, SeriesPoint, exercise_summary, filtered_series};
