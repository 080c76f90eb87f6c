//! Presentation layer for label insights.
//!
//! Turns aggregated tables into renderer-neutral chart specs, and renders
//! those as an interactive terminal chart built on [`ratatui`], a
//! self-contained HTML page or a plain-text table.

pub mod app;
pub mod chart_state;
pub mod chart_view;
pub mod components;
pub mod html;
pub mod presentation;
pub mod text;
pub mod themes;

pub use insights_core as core;
