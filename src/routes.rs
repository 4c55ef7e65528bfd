//! Route Table
//!
//! The three client-side routes and what each renders.

use std::fmt;

/// A routable view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum View {
    /// Update date and hardware descriptor
    Home,
    /// Every framework's results
    Result,
    /// Side-by-side comparison of selected frameworks
    Compare,
}

/// All routes, in navigation order
pub const ROUTES: [View; 3] = [View::Home, View::Result, View::Compare];

impl View {
    pub fn path(&self) -> &'static str {
        match self {
            View::Home => "/",
            View::Result => "/result",
            View::Compare => "/compare",
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            View::Home => "Home",
            View::Result => "Result",
            View::Compare => "Compare",
        }
    }

    /// Views whose code is loaded on first navigation rather than up front
    pub fn is_deferred(&self) -> bool {
        !matches!(self, View::Home)
    }

    /// Match a request path; a single trailing slash is ignored
    pub fn from_path(path: &str) -> Option<View> {
        let path = match path.strip_suffix('/') {
            Some("") | None => path,
            Some(trimmed) => trimmed,
        };
        ROUTES.into_iter().find(|view| view.path() == path)
    }
}

impl fmt::Display for View {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.title())
    }
}
