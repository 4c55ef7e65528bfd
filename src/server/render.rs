//! HTML Rendering
//!
//! Server-side markup for the three views. Pages are plain strings built
//! from the view models; every interpolated value goes through [`escape_html`].

use std::fmt::Write;

use crate::controller::AppState;
use crate::routes::{View, ROUTES};
use crate::views::{format_value, CompareView, HomeView, ResultView};

const HOME_HEADING: &str = "Web Framework Benchmarks";

/// Escape text for use in element content and quoted attributes
pub fn escape_html(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Full page for `view`, including header, status banners and body
pub fn page(view: View, state: &AppState, selection: &[String]) -> String {
    let body = if state.is_loading() {
        // Deferred views have nothing to show until data arrives; the eager
        // home view keeps its heading above the placeholder
        if view.is_deferred() {
            loading()
        } else {
            format!("<section class=\"home\"><h1>{}</h1>{}</section>", HOME_HEADING, loading())
        }
    } else {
        let mut body = String::new();
        if let Some(message) = state.error() {
            body.push_str(&error_banner(message));
        }
        body.push_str(&match view {
            View::Home => home(&HomeView::from_state(state)),
            View::Result => result(&ResultView::new(&state.benchmarks)),
            View::Compare => compare(&CompareView::new(&state.benchmarks, selection)),
        });
        body
    };

    layout(view.title(), Some(view), state.revision.as_deref(), &body)
}

/// 404 page
pub fn not_found(revision: Option<&str>) -> String {
    let body = format!(
        r#"<section class="not-found"><h1>Page Not Found</h1><p><a href="{}">Back to home</a></p></section>"#,
        link(View::Home, revision)
    );
    layout("Not Found", None, revision, &body)
}

fn layout(title: &str, active: Option<View>, revision: Option<&str>, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - Benchboard</title>
</head>
<body>
{header}
<main class="container">
{body}
</main>
<div style="height: 25vh"></div>
</body>
</html>
"#,
        title = escape_html(title),
        header = header(active, revision),
        body = body,
    )
}

fn header(active: Option<View>, revision: Option<&str>) -> String {
    let mut nav = String::new();
    for view in ROUTES {
        let class = if Some(view) == active { " class=\"active\"" } else { "" };
        let _ = write!(
            nav,
            r#"<a href="{}"{}>{}</a>"#,
            link(view, revision),
            class,
            view.title()
        );
    }

    // GET form: submitting reloads the current path with ?sha=
    format!(
        r#"<header><nav>{nav}</nav><form method="get"><input name="sha" placeholder="revision" value="{rev}"><button type="submit">Load</button></form></header>"#,
        nav = nav,
        rev = escape_html(revision.unwrap_or_default()),
    )
}

fn link(view: View, revision: Option<&str>) -> String {
    match revision {
        Some(rev) => format!(
            "{}?sha={}",
            view.path(),
            escape_html(&urlencoding::encode(rev))
        ),
        None => view.path().to_string(),
    }
}

fn loading() -> String {
    r#"<div class="loader">Loading...</div>"#.to_string()
}

fn error_banner(message: &str) -> String {
    format!(
        r#"<div class="error" role="alert">Failed to load benchmark data: {}</div>"#,
        escape_html(message)
    )
}

fn home(view: &HomeView) -> String {
    let mut out = format!("<section class=\"home\"><h1>{}</h1>", HOME_HEADING);
    if !view.updated_at.is_empty() {
        let _ = write!(
            out,
            "<p>Last updated: <time>{}</time></p>",
            escape_html(&view.updated_at)
        );
    }
    if !view.hardware.is_empty() {
        out.push_str("<h2>Hardware</h2><dl class=\"hardware\">");
        for (key, value) in &view.hardware {
            let _ = write!(
                out,
                "<dt>{}</dt><dd>{}</dd>",
                escape_html(key),
                escape_html(value)
            );
        }
        out.push_str("</dl>");
    }
    out.push_str("</section>");
    out
}

fn result(view: &ResultView) -> String {
    let mut out = format!(
        "<section class=\"result\"><h1>Results</h1><p>{} frameworks</p>",
        view.entries.len()
    );
    if view.entries.is_empty() {
        out.push_str("</section>");
        return out;
    }

    out.push_str("<table><thead><tr><th>Framework</th>");
    for metric in &view.metric_names {
        let _ = write!(out, "<th>{}</th>", escape_html(metric));
    }
    out.push_str("</tr></thead><tbody>");

    for entry in &view.entries {
        let _ = write!(
            out,
            r#"<tr><td><span class="swatch" style="background-color: {bg}; border-color: {fg}"></span>{label}</td>"#,
            bg = escape_html(&entry.background_color),
            fg = escape_html(&entry.color),
            label = escape_html(&entry.label),
        );
        for metric in &view.metric_names {
            let _ = write!(out, "<td>{}</td>", format_value(entry.metric(metric)));
        }
        out.push_str("</tr>");
    }

    out.push_str("</tbody></table></section>");
    out
}

fn compare(view: &CompareView) -> String {
    let mut out = String::from("<section class=\"compare\"><h1>Compare Frameworks</h1>");
    if view.columns.is_empty() {
        out.push_str("<p>No frameworks selected.</p></section>");
        return out;
    }

    out.push_str("<table><thead><tr><th>Metric</th>");
    for column in &view.columns {
        let _ = write!(
            out,
            r#"<th style="color: {}">{}</th>"#,
            escape_html(&column.color),
            escape_html(&column.label)
        );
    }
    out.push_str("</tr></thead><tbody>");

    for row in &view.rows {
        let _ = write!(out, "<tr><td>{}</td>", escape_html(&row.metric));
        for value in &row.values {
            let _ = write!(out, "<td>{}</td>", format_value(*value));
        }
        out.push_str("</tr>");
    }

    out.push_str("</tbody></table></section>");
    out
}
