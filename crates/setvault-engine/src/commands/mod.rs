//! Command orchestration layer.
//!
//! Each pipeline is a straight line over the store crate. Lower layers only
//! emit `tracing::debug!`; the operation boundary is logged here.

pub mod engine_command;
pub mod export;
pub mod import;
