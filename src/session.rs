//! Form session: controller, render tree and renderer wiring.
//!
//! [`Form`] ties together the controller, the event queue and the render
//! tree. A renderer mounts the tree once, pushes [`FormEvent`]s as the user
//! interacts, and redraws from [`Form::tree`] after processing.

use std::fmt;
use std::sync::Arc;

use tracing::{debug, trace};

use crate::descriptor::Structure;
use crate::error::FormError;
use crate::event::{EventQueue, FormEvent};
use crate::form::{
    ChangeCallback, ErrorStore, FieldValidation, FormController, SubmitCallback, SubmitOutcome,
    ValidateCallback, Values,
};
use crate::introspect::introspect;
use crate::render::{self, ComponentRegistry, LayoutConfig, RenderTree, Renderer};
use crate::schema::{FormSchema, ObjectSchema, Schema, Validate};

// ---------------------------------------------------------------------------
// FormConfig
// ---------------------------------------------------------------------------

/// Configuration for a form session.
#[derive(Default)]
pub struct FormConfig {
    /// Hand-written descriptor tree (ignored by [`Form::from_schema`]).
    pub structure: Option<Structure>,
    /// Whole-schema validator run once per submit.
    pub schema: Option<Arc<dyn Validate>>,
    /// Mount target handed to the renderer.
    pub target: Option<String>,
    pub layout: LayoutConfig,
    pub components: ComponentRegistry,
    on_change: Option<ChangeCallback>,
    on_submit: Option<SubmitCallback>,
    on_validate: Option<ValidateCallback>,
}

impl FormConfig {
    /// Create a new default config.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the descriptor tree (builder).
    pub fn with_structure(mut self, structure: Structure) -> Self {
        self.structure = Some(structure);
        self
    }

    /// Set the whole-schema validator (builder).
    pub fn with_schema(mut self, schema: impl Validate + 'static) -> Self {
        self.schema = Some(Arc::new(schema));
        self
    }

    /// Set the mount target (builder).
    pub fn with_target(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Set the layout defaults (builder).
    pub fn with_layout(mut self, layout: LayoutConfig) -> Self {
        self.layout = layout;
        self
    }

    /// Set the component overrides (builder).
    pub fn with_components(mut self, components: ComponentRegistry) -> Self {
        self.components = components;
        self
    }

    /// Set the change callback (builder).
    pub fn with_on_change(mut self, callback: impl FnMut(&Values, &ErrorStore) + 'static) -> Self {
        self.on_change = Some(Box::new(callback));
        self
    }

    /// Set the submit callback (builder).
    pub fn with_on_submit(mut self, callback: impl FnMut(&Values) + 'static) -> Self {
        self.on_submit = Some(Box::new(callback));
        self
    }

    /// Set the whole-form validation callback (builder).
    pub fn with_on_validate(mut self, callback: impl FnMut(bool) + 'static) -> Self {
        self.on_validate = Some(Box::new(callback));
        self
    }
}

impl fmt::Debug for FormConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FormConfig")
            .field("structure", &self.structure)
            .field("has_schema", &self.schema.is_some())
            .field("target", &self.target)
            .field("layout", &self.layout)
            .field("components", &self.components)
            .finish_non_exhaustive()
    }
}

// ---------------------------------------------------------------------------
// EventOutcome
// ---------------------------------------------------------------------------

/// What applying one [`FormEvent`] did.
#[derive(Debug, Clone, PartialEq)]
pub enum EventOutcome {
    /// A value was stored.
    Changed,
    /// A field was validated.
    Validated(FieldValidation),
    /// A submit was attempted.
    Submitted(SubmitOutcome),
}

// ---------------------------------------------------------------------------
// Form
// ---------------------------------------------------------------------------

/// A live form: one controller plus its render tree.
pub struct Form {
    controller: FormController,
    queue: EventQueue,
    tree: RenderTree,
    layout: LayoutConfig,
    components: ComponentRegistry,
    target: Option<String>,
    mounted: bool,
}

impl Form {
    /// Introspect `schema` and build a form over it.
    ///
    /// The schema also becomes the whole-schema validator, replacing any set
    /// on `config`.
    pub fn from_schema(schema: ObjectSchema, config: FormConfig) -> Self {
        let structure = introspect(&schema);
        let schema: Arc<dyn Validate> = Arc::new(Schema::from(schema));
        Self::assemble(
            structure,
            FormConfig {
                schema: Some(schema),
                ..config
            },
        )
    }

    /// Build a form over the schema a type declares for itself.
    pub fn for_type<T: FormSchema>(config: FormConfig) -> Self {
        Self::from_schema(T::form_schema(), config)
    }

    /// Build a form over the config's hand-written structure.
    pub fn new(mut config: FormConfig) -> Self {
        let structure = config.structure.take().unwrap_or_default();
        Self::assemble(structure, config)
    }

    fn assemble(structure: Structure, config: FormConfig) -> Self {
        let mut controller = FormController::new(structure);
        if let Some(schema) = config.schema {
            controller = controller.with_shared_schema(schema);
        }
        controller.set_callbacks(config.on_change, config.on_submit, config.on_validate);

        let tree = render::build(controller.structure(), &config.layout, &config.components);
        debug!(fields = controller.structure().leaves().len(), "form created");
        Self {
            controller,
            queue: EventQueue::new(),
            tree,
            layout: config.layout,
            components: config.components,
            target: config.target,
            mounted: false,
        }
    }

    // ── Rendering ────────────────────────────────────────────────────

    /// Rebuild the render tree from the current stores and hand it to
    /// `renderer`: mounted onto the configured target, or as a refresh when
    /// there is none.
    pub fn render(&mut self, renderer: &mut dyn Renderer) -> Result<&RenderTree, FormError> {
        self.tree = render::build(self.controller.structure(), &self.layout, &self.components);
        self.sync_tree();
        match &self.target {
            Some(target) => {
                renderer.mount(&self.tree, target)?;
                self.mounted = true;
                debug!(%target, nodes = self.tree.len(), "form mounted");
            }
            None => renderer.refresh(&self.tree),
        }
        Ok(&self.tree)
    }

    /// Ask `renderer` to redraw the current tree.
    pub fn refresh(&self, renderer: &mut dyn Renderer) {
        renderer.refresh(&self.tree);
    }

    pub fn tree(&self) -> &RenderTree {
        &self.tree
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    fn sync_tree(&mut self) {
        render::apply_values(&mut self.tree, self.controller.values());
        render::apply_errors(&mut self.tree, self.controller.errors());
    }

    // ── Events ───────────────────────────────────────────────────────

    /// Queue `event` for the next [`process`](Self::process).
    pub fn push(&mut self, event: FormEvent) {
        self.queue.push(event);
    }

    pub fn pending_count(&self) -> usize {
        self.queue.pending_count()
    }

    /// Apply `event` immediately and update the render tree.
    pub fn dispatch(&mut self, event: FormEvent) -> Result<EventOutcome, FormError> {
        trace!(?event, "dispatching");
        let outcome = match event {
            FormEvent::Change { path, input } => {
                self.controller.set_field_value(&path, input)?;
                EventOutcome::Changed
            }
            FormEvent::Blur { path } => EventOutcome::Validated(self.controller.validate_field(&path)?),
            FormEvent::Submit => EventOutcome::Submitted(self.controller.submit()),
        };
        self.sync_tree();
        Ok(outcome)
    }

    /// Drain the queue and apply every event in arrival order.
    ///
    /// Stops at the first contract violation; events queued after it are
    /// discarded.
    pub fn process(&mut self) -> Result<Vec<EventOutcome>, FormError> {
        self.queue
            .drain()
            .into_iter()
            .map(|event| self.dispatch(event))
            .collect()
    }

    // ── Controller access ────────────────────────────────────────────

    pub fn controller(&self) -> &FormController {
        &self.controller
    }

    /// Replace all values and show them.
    pub fn set_data(&mut self, values: Values) {
        self.controller.set_data(values);
        self.sync_tree();
    }

    pub fn get_data(&self) -> Values {
        self.controller.get_data()
    }

    pub fn get_errors(&self) -> ErrorStore {
        self.controller.get_errors()
    }
}

impl fmt::Debug for Form {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Form")
            .field("controller", &self.controller)
            .field("pending", &self.queue.pending_count())
            .field("target", &self.target)
            .field("mounted", &self.mounted)
            .finish_non_exhaustive()
    }
}

// ===========================================================================
// Tests
// ===========================================================================

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use serde_json::json;

    use super::*;
    use crate::descriptor::{FieldDescriptor, FieldKind};
    use crate::render::RenderRole;
    use crate::schema;

    #[derive(Default)]
    struct Recorder {
        targets: Vec<&'static str>,
        mounts: Vec<String>,
        refreshes: usize,
    }

    impl Renderer for Recorder {
        fn mount(&mut self, _tree: &RenderTree, target: &str) -> Result<(), FormError> {
            if !self.targets.iter().any(|t| *t == target) {
                return Err(FormError::MountTargetNotFound(target.to_owned()));
            }
            self.mounts.push(target.to_owned());
            Ok(())
        }

        fn refresh(&mut self, _tree: &RenderTree) {
            self.refreshes += 1;
        }
    }

    fn signup() -> ObjectSchema {
        schema::object()
            .field("email", schema::string().email())
            .field("age", schema::number().min(18.0))
    }

    // ── Construction ─────────────────────────────────────────────────

    #[test]
    fn from_schema_builds_tree() {
        let form = Form::from_schema(signup(), FormConfig::new());
        assert_eq!(form.tree().with_role(RenderRole::Field).len(), 2);
        assert_eq!(form.tree().node_at("email").unwrap().component, "email");
        assert!(!form.is_mounted());
    }

    #[test]
    fn new_uses_hand_written_structure() {
        let structure = Structure::new()
            .with_field("notes", FieldDescriptor::new(FieldKind::Textarea).with_label("Notes"));
        let mut form = Form::new(FormConfig::new().with_structure(structure));
        assert_eq!(form.tree().node_at("notes").unwrap().component, "textarea");
        let outcome = form.dispatch(FormEvent::Submit).unwrap();
        assert!(matches!(outcome, EventOutcome::Submitted(SubmitOutcome::Submitted(_))));
    }

    // ── Mounting ─────────────────────────────────────────────────────

    #[test]
    fn mount_onto_known_target() {
        let mut form = Form::from_schema(signup(), FormConfig::new().with_target("#app"));
        let mut renderer = Recorder {
            targets: vec!["#app"],
            ..Recorder::default()
        };
        form.render(&mut renderer).unwrap();
        assert!(form.is_mounted());
        assert_eq!(renderer.mounts, vec!["#app"]);
    }

    #[test]
    fn mount_onto_missing_target_fails() {
        let mut form = Form::from_schema(signup(), FormConfig::new().with_target("#missing"));
        let mut renderer = Recorder::default();
        let err = form.render(&mut renderer).unwrap_err();
        assert_eq!(err, FormError::MountTargetNotFound("#missing".into()));
        assert!(!form.is_mounted());
    }

    #[test]
    fn render_without_target_refreshes() {
        let mut form = Form::from_schema(signup(), FormConfig::new());
        let mut renderer = Recorder::default();
        form.render(&mut renderer).unwrap();
        form.refresh(&mut renderer);
        assert_eq!(renderer.refreshes, 2);
        assert!(renderer.mounts.is_empty());
    }

    // ── Events ───────────────────────────────────────────────────────

    #[test]
    fn blur_projects_errors() {
        let mut form = Form::from_schema(signup(), FormConfig::new());
        form.dispatch(FormEvent::change("age", "12")).unwrap();
        let outcome = form.dispatch(FormEvent::blur("age")).unwrap();
        assert!(matches!(outcome, EventOutcome::Validated(ref v) if !v.valid));
        let age = form.tree().node_at("age").unwrap();
        assert_eq!(age.value, Some(json!(12)));
        assert_eq!(age.error_text().as_deref(), Some("Number must be greater than or equal to 18"));

        form.dispatch(FormEvent::change("age", "20")).unwrap();
        assert!(!form.tree().node_at("age").unwrap().has_error());
    }

    #[test]
    fn process_drains_in_order() {
        let submitted = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&submitted);
        let config = FormConfig::new().with_on_submit(move |values| sink.borrow_mut().push(values.clone()));
        let mut form = Form::from_schema(signup(), config);

        form.push(FormEvent::change("email", "ada@example.com"));
        form.push(FormEvent::change("age", "36"));
        form.push(FormEvent::Submit);
        assert_eq!(form.pending_count(), 3);

        let outcomes = form.process().unwrap();
        assert_eq!(outcomes.len(), 3);
        assert_eq!(form.pending_count(), 0);
        assert_eq!(submitted.borrow().len(), 1);
        assert_eq!(submitted.borrow()[0].get("age"), Some(&json!(36)));
    }

    #[test]
    fn process_stops_at_contract_violation() {
        let mut form = Form::from_schema(signup(), FormConfig::new());
        form.push(FormEvent::change("nope", "x"));
        form.push(FormEvent::change("age", "30"));
        assert_eq!(form.process(), Err(FormError::UnknownField("nope".into())));
        assert_eq!(form.pending_count(), 0);
    }

    #[test]
    fn set_data_shows_values() {
        let mut form = Form::from_schema(signup(), FormConfig::new());
        let serde_json::Value::Object(values) = json!({ "email": "x@y.io" }) else {
            unreachable!()
        };
        form.set_data(values);
        assert_eq!(form.tree().node_at("email").unwrap().value, Some(json!("x@y.io")));
        assert_eq!(form.get_data().get("email"), Some(&json!("x@y.io")));
    }
}
