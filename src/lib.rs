//! Diwali sales dashboard.
//!
//! Loads a Windows-1252 sales export, lets the user narrow it by state,
//! gender and occupation, and shows metric cards and six charts in an egui
//! window.

pub mod app;
pub mod charts;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod metrics;
pub mod report;
pub mod state;
pub mod ui;

pub use error::{DashboardError, Result};
