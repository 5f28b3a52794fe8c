//! FormPilot: programmatic interaction with a headless form.
//!
//! The `FormPilot` owns a [`Form`] and a [`TextRenderer`]. Its methods queue
//! the events a real renderer would report (typing, checking, blurring,
//! submitting); [`FormPilot::process`] applies them and redraws.

use std::cell::RefCell;
use std::rc::Rc;

use serde_json::Value;

use super::snapshot::TextRenderer;
use crate::error::FormError;
use crate::event::FormEvent;
use crate::form::{ErrorStore, FieldState, RawInput, Values};
use crate::schema::ObjectSchema;
use crate::session::{EventOutcome, Form, FormConfig};

// ---------------------------------------------------------------------------
// FormPilot
// ---------------------------------------------------------------------------

/// A headless form driver for testing.
///
/// # Examples
///
/// ```
/// use clarify::schema;
/// use clarify::testing::FormPilot;
///
/// let mut pilot = FormPilot::from_schema(
///     schema::object().field("name", schema::string().min(2)),
/// );
/// pilot.type_text("name", "A");
/// pilot.blur("name");
/// pilot.process().unwrap();
/// assert!(pilot.output().contains("! String must contain at least 2 character(s)"));
/// ```
pub struct FormPilot {
    form: Form,
    renderer: TextRenderer,
    submissions: Rc<RefCell<Vec<Values>>>,
}

impl FormPilot {
    /// A pilot over a form introspected from `schema`, rendered unmounted.
    pub fn from_schema(schema: ObjectSchema) -> Self {
        let submissions = Rc::new(RefCell::new(Vec::new()));
        let config = Self::recording(FormConfig::new(), &submissions);
        let mut pilot = Self {
            form: Form::from_schema(schema, config),
            renderer: TextRenderer::new(),
            submissions,
        };
        pilot.form.refresh(&mut pilot.renderer);
        pilot
    }

    /// A pilot over `schema` with `config`, mounted on the config's target.
    ///
    /// The config's submit callback is replaced by the pilot's recorder.
    pub fn with_config(schema: ObjectSchema, config: FormConfig) -> Result<Self, FormError> {
        let submissions = Rc::new(RefCell::new(Vec::new()));
        let mut renderer = TextRenderer::new();
        if let Some(target) = &config.target {
            renderer = renderer.with_target(target.clone());
        }
        let config = Self::recording(config, &submissions);
        let mut form = Form::from_schema(schema, config);
        form.render(&mut renderer)?;
        Ok(Self {
            form,
            renderer,
            submissions,
        })
    }

    fn recording(config: FormConfig, submissions: &Rc<RefCell<Vec<Values>>>) -> FormConfig {
        let sink = Rc::clone(submissions);
        config.with_on_submit(move |values| sink.borrow_mut().push(values.clone()))
    }

    // ── Input simulation ─────────────────────────────────────────────

    /// Simulate typing `text` into the input at `path`.
    pub fn type_text(&mut self, path: &str, text: &str) {
        self.form.push(FormEvent::change(path, text));
    }

    /// Simulate toggling the checkbox at `path`.
    pub fn check(&mut self, path: &str, checked: bool) {
        self.form.push(FormEvent::change(path, checked));
    }

    /// Simulate choosing `value` in the select at `path`.
    pub fn select(&mut self, path: &str, value: &str) {
        self.form.push(FormEvent::change(path, value));
    }

    /// Simulate clearing the input at `path`.
    pub fn clear(&mut self, path: &str) {
        self.form.push(FormEvent::change(path, RawInput::Unset));
    }

    /// Simulate the input at `path` losing focus.
    pub fn blur(&mut self, path: &str) {
        self.form.push(FormEvent::blur(path));
    }

    /// Simulate activating the submit control.
    pub fn submit(&mut self) {
        self.form.push(FormEvent::Submit);
    }

    // ── Processing ───────────────────────────────────────────────────

    /// Apply every queued event, then redraw.
    pub fn process(&mut self) -> Result<Vec<EventOutcome>, FormError> {
        let outcomes = self.form.process();
        self.form.refresh(&mut self.renderer);
        outcomes
    }

    // ── Query ────────────────────────────────────────────────────────

    pub fn form(&self) -> &Form {
        &self.form
    }

    pub fn form_mut(&mut self) -> &mut Form {
        &mut self.form
    }

    /// The latest rendered outline.
    pub fn output(&self) -> &str {
        self.renderer.output()
    }

    pub fn renderer(&self) -> &TextRenderer {
        &self.renderer
    }

    pub fn value(&self, path: &str) -> Option<Value> {
        self.form.controller().get_value(path)
    }

    pub fn errors(&self) -> ErrorStore {
        self.form.get_errors()
    }

    pub fn state(&self, path: &str) -> FieldState {
        self.form.controller().field_state(path)
    }

    /// Every value snapshot the submit callback received.
    pub fn submissions(&self) -> Vec<Values> {
        self.submissions.borrow().clone()
    }
}

// ===========================================================================
// Tests
// ===========================================================================
