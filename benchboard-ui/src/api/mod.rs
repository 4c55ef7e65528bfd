//! API Client
//!
//! Browser-side access to published benchmark runs.

pub mod client;

pub use client::GlooSource;
