use futures::future::LocalBoxFuture;
use std::future::Future;
use std::rc::Rc;

use crate::shared::dialogs::Dialogs;
use crate::shared::http::ApiError;
use crate::shared::state::{Draft, FormMode, FormState, StateCell, SubmitBlocked};

/// What the owner of a form wants to happen around a save.
#[derive(Clone)]
pub struct FormCallbacks {
    /// Runs after a successful save, before the form closes.
    pub on_saved: Rc<dyn Fn() -> LocalBoxFuture<'static, ()>>,
    pub on_close: Rc<dyn Fn()>,
}

impl FormCallbacks {
    pub fn new(
        on_saved: impl Fn() -> LocalBoxFuture<'static, ()> + 'static,
        on_close: impl Fn() + 'static,
    ) -> Self {
        Self {
            on_saved: Rc::new(on_saved),
            on_close: Rc::new(on_close),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Client-side validation failed; nothing was sent.
    Invalid,
    Busy,
    Saved,
    /// The server returned field errors, now shown in the form.
    Rejected,
    /// Any other failure; an alert was shown.
    Failed,
}

/// Validate, send, then either close through the callbacks or put the
/// failure back into the form.
///
/// `send` receives the mode so it can pick create or update.
pub async fn submit_form<D, C, G, F, Fut>(
    state: &C,
    dialogs: &G,
    callbacks: &FormCallbacks,
    failure_message: &str,
    send: F,
) -> SubmitOutcome
where
    D: Draft,
    C: StateCell<FormState<D>>,
    G: Dialogs + ?Sized,
    F: FnOnce(FormMode, D::Payload) -> Fut,
    Fut: Future<Output = Result<(), ApiError>>,
{
    let started = state.modify(|s| s.begin_submit().map(|payload| (s.mode(), payload)));
    let (mode, payload) = match started {
        None => return SubmitOutcome::Busy,
        Some(Err(SubmitBlocked::Busy)) => return SubmitOutcome::Busy,
        Some(Err(SubmitBlocked::Invalid)) => return SubmitOutcome::Invalid,
        Some(Ok(started)) => started,
    };

    match send(mode, payload).await {
        Ok(()) => {
            (callbacks.on_saved)().await;
            (callbacks.on_close)();
            SubmitOutcome::Saved
        }
        Err(e) => match e.field_errors() {
            Some(errors) => {
                state.modify(|s| s.reject(errors));
                SubmitOutcome::Rejected
            }
            None => {
                state.modify(|s| s.fail());
                dialogs.alert(failure_message);
                SubmitOutcome::Failed
            }
        },
    }
}
