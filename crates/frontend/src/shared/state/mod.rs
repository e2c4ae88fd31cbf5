//! Explicit UI state machines, independent of the reactive layer.

pub mod cell;
pub mod debounce;
pub mod form_state;
pub mod list_state;

pub use cell::StateCell;
pub use debounce::{Debounce, SEARCH_DEBOUNCE_MS};
pub use form_state::{Draft, FieldValue, FormMode, FormPhase, FormSlot, FormState, SubmitBlocked};
pub use list_state::{ListState, ListView, LoadOutcome, LoadStatus, LoadTicket};
