//! Data layer for label insights.
//!
//! Responsible for discovering and reading exported issue files, aggregating
//! label activity into tables and running the top-level analysis pipeline.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use insights_core as core;
