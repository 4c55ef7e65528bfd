//! App Root Component
//!
//! Main application component with routing and global providers.

use benchboard::View;
use leptos::*;
use leptos_router::*;

use crate::components::Header;
use crate::pages::{BenchmarkResult, CompareFrameworks, Home};
use crate::state::provide_global_state;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    let controller = provide_global_state();

    // Initial load for the revision in ?sha=, once per page load
    let query = web_sys::window()
        .and_then(|window| window.location().search().ok())
        .unwrap_or_default();
    spawn_local(async move {
        if let Err(e) = controller.mount(&query).await {
            web_sys::console::error_1(&format!("Initial load failed: {}", e).into());
        }
    });

    view! {
        <Router>
            <ScrollReset />
            <div class="min-h-screen bg-gray-900 text-white flex flex-col">
                <Header />

                <main class="flex-1 container mx-auto px-4 py-8">
                    <Routes>
                        <Route path=View::Home.path() view=Home />
                        <Route path=View::Result.path() view=BenchmarkResult />
                        <Route path=View::Compare.path() view=CompareFrameworks />
                        <Route path="/*any" view=NotFound />
                    </Routes>
                </main>

                <div style="height: 25vh" />
            </div>
        </Router>
    }
}

/// Scroll back to the top whenever the route changes
#[component]
fn ScrollReset() -> impl IntoView {
    let location = use_location();

    create_effect(move |_| {
        location.pathname.track();
        if let Some(window) = web_sys::window() {
            window.scroll_to_with_x_and_y(0.0, 0.0);
        }
    });
}

/// 404 Not Found page
#[component]
fn NotFound() -> impl IntoView {
    view! {
        <div class="flex flex-col items-center justify-center min-h-[60vh] text-center">
            <h1 class="text-3xl font-bold mb-2">"Page Not Found"</h1>
            <p class="text-gray-400 mb-6">"The page you're looking for doesn't exist."</p>
            <A
                href="/"
                class="px-6 py-3 bg-primary-600 hover:bg-primary-700 rounded-lg font-medium transition-colors"
            >
                "Back to home"
            </A>
        </div>
    }
}
