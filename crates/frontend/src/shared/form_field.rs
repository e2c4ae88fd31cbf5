use leptos::prelude::*;

use crate::shared::state::{Draft, FormState};

/// Inline message under an input, shown while the field has an error.
pub fn field_error<D>(state: RwSignal<FormState<D>>, field: &'static str) -> impl IntoView
where
    D: Draft + Send + Sync + 'static,
{
    move || {
        state
            .with(|s| s.error(field).map(str::to_string))
            .map(|msg| view! { <span class="error-msg">{msg}</span> })
    }
}

/// `error` class for inputs whose field failed validation.
pub fn input_class<D>(
    state: RwSignal<FormState<D>>,
    field: &'static str,
) -> impl Fn() -> &'static str + Send + Sync + Copy
where
    D: Draft + Send + Sync + 'static,
{
    move || {
        if state.with(|s| s.errors().contains(field)) {
            "error"
        } else {
            ""
        }
    }
}
