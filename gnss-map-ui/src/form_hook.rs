//! Dioxus binding for the form-state reducer.

use dioxus::prelude::*;
use gnss_core::form_state::{FormAction, FormFields, FormReducer};

/// Copyable handle to one form's state, returned by [`use_form_reducer`].
pub struct FormHandle<F: FormFields + 'static> {
    state: Signal<F>,
    reducer: Signal<FormReducer<F>>,
}

impl<F: FormFields + 'static> Clone for FormHandle<F> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<F: FormFields + 'static> Copy for FormHandle<F> {}

impl<F: FormFields + 'static> FormHandle<F> {
    /// Current state. Reading inside a component or effect subscribes to it.
    pub fn value(&self) -> F {
        self.state.read().clone()
    }

    /// Apply an action. Rejected actions are logged and leave the state
    /// unchanged.
    pub fn dispatch(&mut self, action: FormAction<F>) {
        let next = {
            let reducer = self.reducer.peek();
            let state = self.state.peek();
            reducer.reduce(&state, action)
        };
        match next {
            Ok(next) => self.state.set(next),
            Err(e) => log::error!("Form action rejected: {}", e),
        }
    }
}

/// Hold a form's state for the lifetime of the component. `initial` runs
/// once; `FormAction::Clear` returns to its value.
pub fn use_form_reducer<F: FormFields + 'static>(initial: impl FnOnce() -> F) -> FormHandle<F> {
    let reducer = use_signal(|| FormReducer::new(initial()));
    let state = use_signal(|| reducer.peek().initial().clone());
    FormHandle { state, reducer }
}
