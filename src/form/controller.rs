//! The form controller: owner of the value and error stores.
//!
//! All mutation funnels through [`FormController::set_field_value`], the
//! validate operations and [`FormController::submit`]. Callbacks fire only
//! after the stores are fully updated.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, trace, warn};

use super::coerce::{coerce, RawInput};
use super::path::{self, FieldPath};
use super::state::{FieldState, StateTracker};
use super::store::{ErrorStore, Values};
use crate::descriptor::{FieldDescriptor, Structure};
use crate::error::FormError;
use crate::schema::{self, Validate};

/// Change notification: full value store and full error store.
pub type ChangeCallback = Box<dyn FnMut(&Values, &ErrorStore)>;
/// Submit notification: the accepted value store.
pub type SubmitCallback = Box<dyn FnMut(&Values)>;
/// Fired after every whole-form validation pass.
pub type ValidateCallback = Box<dyn FnMut(bool)>;

// ---------------------------------------------------------------------------
// Outcomes
// ---------------------------------------------------------------------------

/// Result of validating one field.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FieldValidation {
    pub valid: bool,
    /// Violation messages in validator order; empty when `valid`.
    pub messages: Vec<String>,
}

impl FieldValidation {
    fn passed() -> Self {
        Self {
            valid: true,
            messages: Vec::new(),
        }
    }

    fn failed(messages: Vec<String>) -> Self {
        Self {
            valid: false,
            messages,
        }
    }
}

/// What happened to a submit attempt.
#[derive(Debug, Clone, PartialEq)]
#[must_use]
pub enum SubmitOutcome {
    /// Every check passed; the submit callback received these values.
    Submitted(Values),
    /// Submission refused; the error store at the time of refusal.
    Rejected(ErrorStore),
}

impl SubmitOutcome {
    pub fn is_submitted(&self) -> bool {
        matches!(self, SubmitOutcome::Submitted(_))
    }
}

// ---------------------------------------------------------------------------
// FormController
// ---------------------------------------------------------------------------

/// Path-addressed form state over a field descriptor tree.
pub struct FormController {
    structure: Structure,
    schema: Option<Arc<dyn Validate>>,
    values: Values,
    errors: ErrorStore,
    states: StateTracker,
    on_change: Option<ChangeCallback>,
    on_submit: Option<SubmitCallback>,
    on_validate: Option<ValidateCallback>,
}

impl FormController {
    /// A controller with empty stores over `structure`.
    pub fn new(structure: Structure) -> Self {
        Self {
            structure,
            schema: None,
            values: Values::new(),
            errors: ErrorStore::new(),
            states: StateTracker::new(),
            on_change: None,
            on_submit: None,
            on_validate: None,
        }
    }

    /// Attach a whole-schema validator run once per submit (builder).
    pub fn with_schema(mut self, schema: impl Validate + 'static) -> Self {
        self.schema = Some(Arc::new(schema));
        self
    }

    /// Attach an already shared whole-schema validator (builder).
    pub fn with_shared_schema(mut self, schema: Arc<dyn Validate>) -> Self {
        self.schema = Some(schema);
        self
    }

    pub fn with_on_change(mut self, callback: impl FnMut(&Values, &ErrorStore) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    pub fn with_on_submit(mut self, callback: impl FnMut(&Values) + 'static) -> Self {
        self.on_submit = Some(Box::new(callback));
        self
    }

    pub fn with_on_validate(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_validate = Some(Box::new(callback));
        self
    }

    pub(crate) fn set_callbacks(
        &mut self,
        on_change: Option<ChangeCallback>,
        on_submit: Option<SubmitCallback>,
        on_validate: Option<ValidateCallback>,
    ) {
        self.on_change = on_change;
        self.on_submit = on_submit;
        self.on_validate = on_validate;
    }

    /// The value-holding descriptor at `path`. Sections and boxes are rejected.
    fn leaf(&self, path: &str) -> Result<&FieldDescriptor, FormError> {
        let descriptor = self
            .structure
            .lookup(path)
            .ok_or_else(|| FormError::UnknownField(path.to_owned()))?;
        if descriptor.is_structural() {
            return Err(FormError::NotAField(path.to_owned()));
        }
        Ok(descriptor)
    }

    /// The descriptor tree this controller was built over.
    pub fn structure(&self) -> &Structure {
        &self.structure
    }

    // ── Mutation ─────────────────────────────────────────────────────

    /// Coerce `raw` for the field at `path`, store it and notify.
    ///
    /// Clears any error recorded for `path`; never validates.
    pub fn set_field_value(&mut self, path: &str, raw: impl Into<RawInput>) -> Result<(), FormError> {
        let field_path = FieldPath::parse(path)?;
        let kind = self.leaf(path)?.kind;

        let value = coerce(kind, raw.into());
        trace!(%path, %kind, ?value, "field changed");
        path::set(&mut self.values, &field_path, value)?;
        self.errors.clear(path);
        self.states.on_change(path);

        if let Some(on_change) = self.on_change.as_mut() {
            on_change(&self.values, &self.errors);
        }
        Ok(())
    }

    /// Replace the whole value store. Fires no callback.
    pub fn set_data(&mut self, values: Values) {
        debug!(fields = values.len(), "form data replaced");
        self.values = values;
    }

    // ── Reads ────────────────────────────────────────────────────────

    /// Copy of the value at `path`; `None` when unset or unaddressable.
    pub fn get_value(&self, path: &str) -> Option<Value> {
        let field_path = FieldPath::parse(path).ok()?;
        path::get(&self.values, &field_path).cloned()
    }

    /// Copy of the error store.
    pub fn get_errors(&self) -> ErrorStore {
        self.errors.clone()
    }

    /// Copy of the value store.
    pub fn get_data(&self) -> Values {
        self.values.clone()
    }

    pub fn values(&self) -> &Values {
        &self.values
    }

    pub fn errors(&self) -> &ErrorStore {
        &self.errors
    }

    pub fn field_state(&self, path: &str) -> FieldState {
        self.states.get(path)
    }

    // ── Validation ───────────────────────────────────────────────────

    /// Validate the current value at `path` with the field's validator.
    ///
    /// A field without a validator always passes and leaves the error store
    /// untouched.
    pub fn validate_field(&mut self, path: &str) -> Result<FieldValidation, FormError> {
        let field_path = FieldPath::parse(path)?;
        let validator = self.leaf(path)?.validator.clone();
        Ok(match validator {
            Some(validator) => self.run_validator(path, Some(&field_path), validator.as_ref()),
            None => FieldValidation::passed(),
        })
    }

    /// Validate every leaf that carries a validator, depth first.
    ///
    /// Afterwards the error store holds exactly the failing leaves.
    pub fn validate_all(&mut self) -> bool {
        let leaves: Vec<(String, Arc<dyn Validate>)> = self
            .structure
            .leaves()
            .into_iter()
            .filter_map(|(path, descriptor)| descriptor.validator.clone().map(|v| (path, v)))
            .collect();

        let validated: HashSet<&str> = leaves.iter().map(|(path, _)| path.as_str()).collect();
        self.errors.retain(|path| validated.contains(path));

        for (path, validator) in &leaves {
            let field_path = FieldPath::parse(path).ok();
            self.run_validator(path, field_path.as_ref(), validator.as_ref());
        }

        let valid = self.errors.is_empty();
        debug!(valid, failing = self.errors.len(), "form validated");
        if let Some(on_validate) = self.on_validate.as_mut() {
            on_validate(valid);
        }
        valid
    }

    fn run_validator(&mut self, path: &str, field_path: Option<&FieldPath>, validator: &dyn Validate) -> FieldValidation {
        let value = field_path.and_then(|p| path::get(&self.values, p));
        let outcome = match validator.validate(value) {
            Ok(()) => FieldValidation::passed(),
            Err(issues) if issues.is_empty() => FieldValidation::passed(),
            Err(issues) => FieldValidation::failed(schema::messages(&issues)),
        };
        trace!(%path, valid = outcome.valid, messages = ?outcome.messages, "field validated");

        self.errors.set(path, outcome.messages.clone());
        self.states.on_validated(path, outcome.valid);
        outcome
    }

    // ── Submission ───────────────────────────────────────────────────

    /// Validate everything, then the whole schema, then hand the values to
    /// the submit callback.
    pub fn submit(&mut self) -> SubmitOutcome {
        if !self.validate_all() {
            warn!(failing = self.errors.len(), "submission rejected by field validation");
            return SubmitOutcome::Rejected(self.errors.clone());
        }

        if let Some(schema) = self.schema.clone() {
            let whole = Value::Object(self.values.clone());
            if let Err(issues) = schema.validate(Some(&whole)) {
                if !issues.is_empty() {
                    for issue in &issues {
                        let path = issue.dotted_path();
                        self.states.on_validated(&path, false);
                        self.errors.push(path, issue.message.clone());
                    }
                    warn!(issues = issues.len(), "submission rejected by schema validation");
                    return SubmitOutcome::Rejected(self.errors.clone());
                }
            }
        }

        debug!(fields = self.values.len(), "form submitted");
        if let Some(on_submit) = self.on_submit.as_mut() {
            on_submit(&self.values);
        }
        SubmitOutcome::Submitted(self.values.clone())
    }
}

impl fmt::Debug for FormController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormController")
            .field("structure", &self.structure)
            .field("has_schema", &self.schema.is_some())
            .field("values", &self.values)
            .field("errors", &self.errors)
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
