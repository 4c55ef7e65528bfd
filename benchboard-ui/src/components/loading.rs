//! Loading Component
//!
//! Loading spinner and the status gate every page renders through.

use leptos::*;

use crate::state::global::GlobalState;

/// Full-page loading spinner
#[component]
pub fn Loading() -> impl IntoView {
    view! {
        <div class="flex items-center justify-center py-12">
            <div class="loading-spinner w-8 h-8" />
            <span class="ml-3 text-gray-400">"Loading..."</span>
        </div>
    }
}

/// Spinner while a fetch is outstanding, otherwise the page behind an
/// error banner when the last fetch failed
#[component]
pub fn Ready(children: ChildrenFn) -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");

    view! {
        <Show when=move || !state.loading() fallback=|| view! { <Loading /> }>
            {move || state.error().map(|message| view! {
                <div role="alert" class="bg-red-900/50 border border-red-700 text-red-200 rounded-lg p-4 mb-6">
                    "Failed to load benchmark data: " {message}
                </div>
            })}
            {children()}
        </Show>
    }
}
