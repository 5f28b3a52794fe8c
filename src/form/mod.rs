//! Form controller: value and error stores, path addressing, input coercion
//! and per-field state.

pub mod coerce;
pub mod controller;
pub mod path;
pub mod state;
pub mod store;

pub use coerce::{coerce, RawInput};
pub use controller::{
    ChangeCallback, FieldValidation, FormController, SubmitCallback, SubmitOutcome, ValidateCallback,
};
pub use path::FieldPath;
pub use state::{FieldState, StateTracker};
pub use store::{ErrorStore, Values, ROOT_ERROR_PATH};
