//! Pages
//!
//! Top-level page components for each route.

pub mod compare;
pub mod home;
pub mod result;

pub use compare::CompareFrameworks;
pub use home::Home;
pub use result::BenchmarkResult;
