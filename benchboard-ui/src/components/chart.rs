//! Chart Component
//!
//! Horizontal bar chart on an HTML5 canvas, one bar per framework in its
//! record colors.

use benchboard::views::{format_value, ResultView};
use leptos::*;
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const BAR_HEIGHT: f64 = 22.0;
const BAR_GAP: f64 = 8.0;
const MARGIN_LEFT: f64 = 180.0;
const MARGIN_RIGHT: f64 = 90.0;
const MARGIN_Y: f64 = 16.0;

/// One bar: a framework's value for the charted metric
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub color: String,
    pub background_color: String,
    pub value: Option<f64>,
}

impl Bar {
    /// Bars for `metric`, in record order
    pub fn series(view: &ResultView, metric: &str) -> Vec<Bar> {
        view.series(metric)
            .into_iter()
            .map(|(entry, value)| Bar {
                label: entry.label.clone(),
                color: entry.color.clone(),
                background_color: entry.background_color.clone(),
                value,
            })
            .collect()
    }
}

/// Canvas height needed for `count` bars
pub fn chart_height(count: usize) -> f64 {
    MARGIN_Y * 2.0 + count as f64 * (BAR_HEIGHT + BAR_GAP)
}

/// Bar chart component
#[component]
pub fn BarChart(#[prop(into)] bars: Signal<Vec<Bar>>) -> impl IntoView {
    let canvas_ref = create_node_ref::<html::Canvas>();

    // Redraw whenever the bars change
    create_effect(move |_| {
        let bars = bars.get();
        if let Some(canvas) = canvas_ref.get() {
            canvas.set_height(chart_height(bars.len()) as u32);
            draw_bars(&canvas, &bars);
        }
    });

    view! {
        <canvas
            node_ref=canvas_ref
            width="800"
            class="w-full rounded-lg"
        />
    }
}

/// Draw the bars on canvas
fn draw_bars(canvas: &HtmlCanvasElement, bars: &[Bar]) {
    let ctx = match canvas.get_context("2d") {
        Ok(Some(ctx)) => match ctx.dyn_into::<CanvasRenderingContext2d>() {
            Ok(ctx) => ctx,
            Err(_) => return,
        },
        _ => return,
    };

    let width = canvas.width() as f64;
    let height = canvas.height() as f64;
    let chart_width = width - MARGIN_LEFT - MARGIN_RIGHT;

    ctx.set_fill_style(&"#1f2937".into()); // gray-800
    ctx.fill_rect(0.0, 0.0, width, height);

    let max = bars
        .iter()
        .filter_map(|bar| bar.value)
        .fold(0.0_f64, f64::max);

    if bars.is_empty() || max <= 0.0 {
        ctx.set_fill_style(&"#6b7280".into());
        ctx.set_font("16px sans-serif");
        let _ = ctx.fill_text("No data for this metric", width / 2.0 - 80.0, height / 2.0 + 6.0);
        return;
    }

    ctx.set_font("12px sans-serif");
    ctx.set_line_width(1.0);

    for (i, bar) in bars.iter().enumerate() {
        let y = MARGIN_Y + i as f64 * (BAR_HEIGHT + BAR_GAP);

        ctx.set_fill_style(&"#d1d5db".into()); // gray-300
        let _ = ctx.fill_text(&bar.label, 8.0, y + BAR_HEIGHT * 0.7);

        let value = bar.value.unwrap_or(0.0).max(0.0);
        let bar_width = (value / max) * chart_width;

        ctx.set_fill_style(&bar.background_color.as_str().into());
        ctx.fill_rect(MARGIN_LEFT, y, bar_width, BAR_HEIGHT);
        ctx.set_stroke_style(&bar.color.as_str().into());
        ctx.stroke_rect(MARGIN_LEFT, y, bar_width, BAR_HEIGHT);

        ctx.set_fill_style(&"#9ca3af".into()); // gray-400
        let _ = ctx.fill_text(
            &format_value(bar.value),
            MARGIN_LEFT + bar_width + 6.0,
            y + BAR_HEIGHT * 0.7,
        );
    }
}
