//! Global Application State
//!
//! The controller's [`AppState`] held in a Leptos signal.

use benchboard::{AppState, Controller, DisplayRecord, StateStore};
use leptos::*;
use std::rc::Rc;

use crate::api::GlooSource;

/// Controller wired to the browser source and the signal store
pub type UiController = Controller<GlooSource, GlobalState>;

/// Global application state provided to all components
#[derive(Clone, Copy)]
pub struct GlobalState {
    pub app: RwSignal<AppState>,
}

impl StateStore for GlobalState {
    fn update<F: FnOnce(&mut AppState)>(&self, f: F) {
        self.app.update(f);
    }
}

impl GlobalState {
    pub fn new() -> Self {
        Self {
            app: create_rw_signal(AppState::default()),
        }
    }

    pub fn loading(&self) -> bool {
        self.app.with(AppState::is_loading)
    }

    pub fn error(&self) -> Option<String> {
        self.app.with(|state| state.error().map(str::to_string))
    }

    pub fn benchmarks(&self) -> Vec<DisplayRecord> {
        self.app.with(|state| state.benchmarks.clone())
    }

    /// Revision the displayed data belongs to
    pub fn revision(&self) -> Option<String> {
        self.app.with(|state| state.revision.clone())
    }
}

/// Provide the state and its controller to the component tree
pub fn provide_global_state() -> Rc<UiController> {
    let state = GlobalState::new();
    let controller = Rc::new(Controller::new(GlooSource::from_storage(), state));

    provide_context(state);
    provide_context(controller.clone());
    controller
}

/// Look up the controller provided by [`provide_global_state`]
pub fn use_controller() -> Rc<UiController> {
    use_context::<Rc<UiController>>().expect("UiController not found")
}

#[cfg(test)]
mod tests {
    use super::*;
    use benchboard::{Benchmark, Framework, Hardware, SeededColors};

    #[test]
    fn test_store_updates_signal() {
        let runtime = create_runtime();
        let state = GlobalState::new();
        assert!(state.loading());

        state.update(AppState::begin_fetch);
        let records = benchboard::decorate(
            &[Benchmark::new(Framework::new("actix", "4"))],
            &SeededColors::new(1),
        );
        state.update(|app| app.finish_fetch("master", records, Hardware::default(), None));

        assert!(!state.loading());
        assert_eq!(state.benchmarks().len(), 1);
        assert_eq!(state.revision().as_deref(), Some("master"));
        runtime.dispose();
    }

    #[test]
    fn test_store_failure_sets_error() {
        let runtime = create_runtime();
        let state = GlobalState::new();

        state.update(AppState::begin_fetch);
        state.update(|app| app.fail_fetch("Unexpected status 404"));

        assert!(!state.loading());
        assert_eq!(state.error().as_deref(), Some("Unexpected status 404"));
        runtime.dispose();
    }
}
