//! Benchboard Dashboard
//!
//! Web framework benchmark results built with Leptos (WASM).
//!
//! # Features
//!
//! - Home view with the run date and benchmark hardware
//! - Result view with a bar chart per metric
//! - Side-by-side framework comparison
//! - Switching revisions without a page reload
//!
//! # Architecture
//!
//! This is a client-side rendered (CSR) Leptos application that compiles to
//! WebAssembly. The fetch cycle is the shared `benchboard` controller, writing
//! into signals instead of a lock.

use leptos::*;

mod api;
mod app;
mod components;
mod pages;
mod state;

fn main() {
    // Set up panic hook for better error messages in WASM
    console_error_panic_hook::set_once();

    mount_to_body(|| view! { <app::App /> });
}
