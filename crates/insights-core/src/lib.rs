//! Shared building blocks for label insights: the issue/event model, error
//! taxonomy, CLI settings, validated analysis configuration, calendar
//! bucketing and number formatting.

pub mod config;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod time_utils;
