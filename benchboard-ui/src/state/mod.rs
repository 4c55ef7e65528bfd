//! State Management
//!
//! Reactive application state shared by every route.

pub mod global;

pub use global::{provide_global_state, GlobalState, UiController};
