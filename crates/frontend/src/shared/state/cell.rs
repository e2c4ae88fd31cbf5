use leptos::prelude::*;
use std::cell::RefCell;
use std::rc::Rc;

/// Where a controller keeps its state.
///
/// Views hand controllers an `RwSignal` so every transition re-renders;
/// tests use a plain `Rc<RefCell<_>>`. `peek` never subscribes. Both
/// return `None` once the owner is gone, which controllers treat as
/// "nothing to do".
pub trait StateCell<S> {
    fn modify<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R>;
    fn peek<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R>;
}

impl<S> StateCell<S> for Rc<RefCell<S>> {
    fn modify<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }

    fn peek<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        Some(f(&self.borrow()))
    }
}

impl<S: Send + Sync + 'static> StateCell<S> for RwSignal<S> {
    fn modify<R>(&self, f: impl FnOnce(&mut S) -> R) -> Option<R> {
        self.try_update(f)
    }

    fn peek<R>(&self, f: impl FnOnce(&S) -> R) -> Option<R> {
        self.try_with_untracked(f)
    }
}
