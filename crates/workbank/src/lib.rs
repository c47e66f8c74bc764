//! Aggregation and analysis pipeline for the WORKBank survey dataset.
//!
//! The `dataset` module loads the three raw survey tables (worker desire
//! responses, expert capability ratings, task metadata) from the Hugging Face
//! dataset repository, falling back to a built-in sample set when the remote
//! source is unavailable. The `analysis` module turns those tables into one
//! task-level analysis table and computes summary statistics from it.

pub mod analysis;
pub mod config;
pub mod dataset;
pub mod error;
pub mod telemetry;
