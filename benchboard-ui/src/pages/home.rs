//! Home Page
//!
//! Run date and the hardware the benchmarks ran on.

use benchboard::HomeView;
use leptos::*;

use crate::components::Ready;
use crate::state::global::GlobalState;

#[component]
pub fn Home() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let home = create_memo(move |_| state.app.with(HomeView::from_state));

    view! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold">"Web Framework Benchmarks"</h1>

            <Ready>
                {move || {
                    let HomeView { updated_at, hardware } = home.get();
                    let date = (!updated_at.is_empty()).then(|| view! {
                        <p class="text-gray-400">"Last updated: " <time>{updated_at}</time></p>
                    });

                    view! {
                        {date}
                        <section class="bg-gray-800 rounded-xl p-6">
                            <h2 class="text-xl font-semibold mb-4">"Hardware"</h2>
                            <dl class="grid grid-cols-2 gap-2">
                                {hardware
                                    .into_iter()
                                    .map(|(key, value)| view! {
                                        <dt class="text-gray-400">{key}</dt>
                                        <dd>{value}</dd>
                                    })
                                    .collect_view()}
                            </dl>
                        </section>
                    }
                }}
            </Ready>
        </div>
    }
}
