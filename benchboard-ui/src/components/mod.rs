//! UI Components
//!
//! Reusable Leptos components for the dashboard.

pub mod chart;
pub mod header;
pub mod loading;

pub use chart::{Bar, BarChart};
pub use header::Header;
pub use loading::Ready;
