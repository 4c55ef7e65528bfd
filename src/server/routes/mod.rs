//! Server Routes
//!
//! Route handlers organized by functionality.

pub mod api;
pub mod health;
pub mod pages;
