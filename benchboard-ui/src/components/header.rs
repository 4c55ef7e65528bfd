//! Header Component
//!
//! Navigation links and the revision switcher.

use benchboard::ROUTES;
use leptos::*;
use leptos_router::*;

use crate::state::global::{use_controller, GlobalState};

/// Navigation header component
#[component]
pub fn Header() -> impl IntoView {
    view! {
        <nav class="bg-gray-800 border-b border-gray-700">
            <div class="container mx-auto px-4">
                <div class="flex items-center justify-between h-16">
                    <A href="/" class="text-xl font-bold text-white">"Benchboard"</A>

                    <div class="flex items-center space-x-1">
                        {ROUTES
                            .iter()
                            .map(|view| view! { <NavLink href=view.path() label=view.title() /> })
                            .collect_view()}
                    </div>

                    <RevisionForm />
                </div>
            </div>
        </nav>
    }
}

/// Individual navigation link
#[component]
fn NavLink(href: &'static str, label: &'static str) -> impl IntoView {
    view! {
        <A
            href=href
            class="px-4 py-2 rounded-lg text-gray-300 hover:text-white hover:bg-gray-700 transition-colors"
            active_class="bg-gray-700 text-white"
            exact=true
        >
            {label}
        </A>
    }
}

/// Loads another revision in place; the displayed date is left alone
#[component]
fn RevisionForm() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let controller = use_controller();
    let input_ref = create_node_ref::<html::Input>();

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let Some(input) = input_ref.get() else {
            return;
        };
        let revision = input.value().trim().to_string();
        if revision.is_empty() {
            return;
        }

        let controller = controller.clone();
        spawn_local(async move {
            if let Err(e) = controller.fetch_benchmark_data(&revision, false).await {
                web_sys::console::error_1(&format!("Fetch for {} failed: {}", revision, e).into());
            }
        });
    };

    view! {
        <form on:submit=on_submit class="flex items-center space-x-2">
            <input
                node_ref=input_ref
                type="text"
                placeholder="revision"
                prop:value=move || state.revision().unwrap_or_default()
                class="bg-gray-700 border border-gray-600 rounded-lg px-3 py-1 text-sm"
            />
            <button
                type="submit"
                disabled=move || state.loading()
                class="px-3 py-1 bg-primary-600 hover:bg-primary-700 rounded-lg text-sm font-medium"
            >
                "Load"
            </button>
        </form>
    }
}
