//! Reusable line-oriented building blocks for the chart screen.

pub mod header;
pub mod legend;
