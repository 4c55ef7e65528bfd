//! Result Page
//!
//! Every framework's results: a bar chart for one metric and the full table.

use benchboard::views::format_value;
use benchboard::ResultView;
use leptos::*;

use crate::components::{Bar, BarChart, Ready};
use crate::state::global::GlobalState;

#[component]
pub fn BenchmarkResult() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let result = create_memo(move |_| state.app.with(|app| ResultView::new(&app.benchmarks)));

    // Charted metric; falls back to the first one when unset or gone
    let (picked, set_picked) = create_signal(None::<String>);
    let metric = create_memo(move |_| {
        let names = result.with(|view| view.metric_names.clone());
        picked
            .get()
            .filter(|name| names.contains(name))
            .or_else(|| names.into_iter().next())
    });

    let bars = Signal::derive(move || match metric.get() {
        Some(name) => result.with(|view| Bar::series(view, &name)),
        None => Vec::new(),
    });

    view! {
        <div class="space-y-8">
            <div>
                <h1 class="text-3xl font-bold">"Results"</h1>
                <p class="text-gray-400 mt-1">
                    {move || format!("{} frameworks", result.with(|view| view.entries.len()))}
                </p>
            </div>

            <Ready>
                <div class="flex flex-wrap gap-2">
                    {move || {
                        result
                            .get()
                            .metric_names
                            .into_iter()
                            .map(|name| {
                                let class = if metric.get().as_deref() == Some(name.as_str()) {
                                    "px-3 py-1 rounded-lg text-sm bg-primary-600 text-white"
                                } else {
                                    "px-3 py-1 rounded-lg text-sm bg-gray-700 text-gray-300 hover:bg-gray-600"
                                };
                                let on_click = {
                                    let name = name.clone();
                                    move |_| set_picked.set(Some(name.clone()))
                                };
                                view! {
                                    <button on:click=on_click class=class>
                                        {name}
                                    </button>
                                }
                            })
                            .collect_view()
                    }}
                </div>

                <BarChart bars=bars />

                <ResultTable result=result />
            </Ready>
        </div>
    }
}

/// Full result table, one row per framework
#[component]
fn ResultTable(result: Memo<ResultView>) -> impl IntoView {
    view! {
        <div class="overflow-x-auto">
            {move || {
                let ResultView { entries, metric_names } = result.get();
                if entries.is_empty() {
                    return view! { <p class="text-gray-400">"No results."</p> }.into_view();
                }

                view! {
                    <table class="min-w-full text-sm">
                        <thead>
                            <tr>
                                <th class="text-left p-2">"Framework"</th>
                                {metric_names
                                    .iter()
                                    .map(|name| view! { <th class="text-right p-2">{name.clone()}</th> })
                                    .collect_view()}
                            </tr>
                        </thead>
                        <tbody>
                            {entries
                                .iter()
                                .map(|entry| view! {
                                    <tr class="border-t border-gray-700">
                                        <td class="p-2">
                                            <span
                                                class="inline-block w-3 h-3 mr-2 border"
                                                style=format!(
                                                    "background-color: {}; border-color: {}",
                                                    entry.background_color, entry.color
                                                )
                                            />
                                            {entry.label.clone()}
                                        </td>
                                        {metric_names
                                            .iter()
                                            .map(|name| view! {
                                                <td class="text-right p-2">{format_value(entry.metric(name))}</td>
                                            })
                                            .collect_view()}
                                    </tr>
                                })
                                .collect_view()}
                        </tbody>
                    </table>
                }
                .into_view()
            }}
        </div>
    }
}
