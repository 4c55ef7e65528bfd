//! Compare Page
//!
//! Side-by-side comparison of the frameworks picked with the checkboxes.
//! Nothing picked compares every framework.

use benchboard::views::format_value;
use benchboard::CompareView;
use leptos::*;

use crate::components::Ready;
use crate::state::global::GlobalState;

#[component]
pub fn CompareFrameworks() -> impl IntoView {
    let state = use_context::<GlobalState>().expect("GlobalState not found");
    let selected = create_rw_signal(Vec::<String>::new());

    let labels = create_memo(move |_| {
        state
            .app
            .with(|app| app.benchmarks.iter().map(|r| r.label.clone()).collect::<Vec<_>>())
    });
    let comparison = create_memo(move |_| {
        let selection = selected.get();
        state
            .app
            .with(|app| CompareView::new(&app.benchmarks, &selection))
    });

    let toggle = move |label: String| {
        selected.update(|picked| {
            if let Some(pos) = picked.iter().position(|l| *l == label) {
                picked.remove(pos);
            } else {
                picked.push(label);
            }
        })
    };

    view! {
        <div class="space-y-8">
            <h1 class="text-3xl font-bold">"Compare Frameworks"</h1>

            <Ready>
                <div class="flex flex-wrap gap-4">
                    {move || {
                        labels
                            .get()
                            .into_iter()
                            .map(|label| {
                                let checked = {
                                    let label = label.clone();
                                    move || selected.with(|picked| picked.contains(&label))
                                };
                                let on_change = {
                                    let label = label.clone();
                                    move |_| toggle(label.clone())
                                };
                                view! {
                                    <label class="flex items-center space-x-2 text-sm">
                                        <input type="checkbox" prop:checked=checked on:change=on_change />
                                        <span>{label}</span>
                                    </label>
                                }
                            })
                            .collect_view()
                    }}
                </div>

                {move || {
                    let CompareView { columns, rows } = comparison.get();
                    if columns.is_empty() {
                        return view! { <p class="text-gray-400">"No frameworks to compare."</p> }.into_view();
                    }

                    view! {
                        <div class="overflow-x-auto">
                            <table class="min-w-full text-sm">
                                <thead>
                                    <tr>
                                        <th class="text-left p-2">"Metric"</th>
                                        {columns
                                            .into_iter()
                                            .map(|column| view! {
                                                <th class="text-right p-2" style=format!("color: {}", column.color)>
                                                    {column.label}
                                                </th>
                                            })
                                            .collect_view()}
                                    </tr>
                                </thead>
                                <tbody>
                                    {rows
                                        .into_iter()
                                        .map(|row| view! {
                                            <tr class="border-t border-gray-700">
                                                <td class="p-2">{row.metric}</td>
                                                {row
                                                    .values
                                                    .into_iter()
                                                    .map(|value| view! {
                                                        <td class="text-right p-2">{format_value(value)}</td>
                                                    })
                                                    .collect_view()}
                                            </tr>
                                        })
                                        .collect_view()}
                                </tbody>
                            </table>
                        </div>
                    }
                    .into_view()
                }}
            </Ready>
        </div>
    }
}
