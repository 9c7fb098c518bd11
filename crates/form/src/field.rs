//! Field controller
//!
//! A [`Field`] owns the validation lifecycle of one observed value. It
//! subscribes to the value (and to the optional external state), keeps the
//! sticky interaction flags, and republishes status, display state and
//! messages after every trigger:
//!
//! | trigger | flag change | `on_update` calls |
//! |---------|-------------|-------------------|
//! | construction | none | 1 |
//! | value change | sets `DIRTY` | 1 |
//! | external state change | none | 1 |
//! | [`touch`](Field::touch) | sets `TOUCHED` | 1 |
//! | [`form_validate`](Field::form_validate) | sets `VALIDATED` | 1 |
//! | [`reset`](Field::reset) | clears all | 1 |
//!
//! Each recompute evaluates every rule against the current value. Only the
//! visibility of messages depends on the flags.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::{Rc, Weak};

use nebula_validator::{ResolvedRule, RuleRegistry};

use crate::descriptor::FieldDescriptor;
use crate::dispatch::UpdateDispatcher;
use crate::error::Result;
use crate::messages::{Messages, ValidateOn, compute_messages, is_eligible};
use crate::observable::{Observable, ReadOnly, Subscription};
use crate::state::{FieldSnapshot, display_state};
use crate::status::{FieldFlags, Status, compute_status, evaluate_rules};

/// What caused a recompute.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Trigger {
    Init,
    Value,
    ExternalState,
    Touch,
    Validate,
    Reset,
}

impl Trigger {
    fn as_str(self) -> &'static str {
        match self {
            Self::Init => "init",
            Self::Value => "value",
            Self::ExternalState => "external_state",
            Self::Touch => "touch",
            Self::Validate => "validate",
            Self::Reset => "reset",
        }
    }
}

struct FieldInner {
    name: Option<String>,
    value: Observable<String>,
    external_state: Option<Observable<String>>,
    rules: Vec<ResolvedRule>,
    validate_on: ValidateOn,
    flags: Cell<FieldFlags>,
    status: Observable<Status>,
    state: Observable<String>,
    messages: Observable<Messages>,
    dispatcher: UpdateDispatcher,
    subscriptions: RefCell<Vec<Subscription>>,
    busy: Cell<bool>,
    queued: RefCell<VecDeque<Trigger>>,
}

impl FieldInner {
    /// Runs a recompute for `trigger`.
    ///
    /// Triggers raised while a recompute is publishing (from a status
    /// subscriber or the `on_update` callback) run after it, in order.
    fn recompute(&self, trigger: Trigger) {
        self.queued.borrow_mut().push_back(trigger);
        if self.busy.replace(true) {
            return;
        }
        loop {
            let next = self.queued.borrow_mut().pop_front();
            let Some(trigger) = next else { break };
            self.publish(trigger);
        }
        self.busy.set(false);
    }

    fn publish(&self, trigger: Trigger) {
        let flags = self.flags.get();
        let snapshot = self.snapshot_for(flags);

        tracing::trace!(
            field = self.name.as_deref().unwrap_or_default(),
            trigger = trigger.as_str(),
            valid = snapshot.status.valid,
            messages = snapshot.messages.len(),
            "Recomputed field"
        );

        self.status.set(snapshot.status.clone());
        self.state.set(snapshot.state.clone());
        self.messages.set(snapshot.messages.clone());
        self.dispatcher.dispatch(snapshot);
    }

    fn snapshot_for(&self, flags: FieldFlags) -> FieldSnapshot {
        let (status, messages) = self.value.with(|value| {
            let reports = evaluate_rules(value, &self.rules);
            let status = compute_status(value, &reports, flags);
            let messages = compute_messages(&status, &reports, self.validate_on, flags);
            (status, messages)
        });

        let eligible = is_eligible(self.validate_on, flags);
        let external = self.external_state.as_ref().map(Observable::get);
        let state = display_state(&status, eligible, external.as_deref());

        FieldSnapshot {
            status,
            state,
            messages,
        }
    }

    fn raise(&self, flag: FieldFlags, trigger: Trigger) {
        self.flags.set(self.flags.get() | flag);
        self.recompute(trigger);
    }
}

/// A descriptor whose rules resolved; building it cannot fail.
pub(crate) struct ResolvedDescriptor {
    descriptor: FieldDescriptor,
    rules: Vec<ResolvedRule>,
}

impl ResolvedDescriptor {
    pub(crate) fn name(&self) -> Option<&str> {
        self.descriptor.field_name()
    }
}

/// Handle to one validated field.
///
/// Clones share the same field. The field's subscriptions to its observed
/// values are released when the last clone is dropped.
///
/// ```rust
/// use nebula_form::{Field, FieldDescriptor, Observable};
///
/// let value = Observable::new(String::new());
/// let field = Field::new(FieldDescriptor::new(value.clone(), ["required"])).unwrap();
///
/// assert!(field.messages().get().is_empty());
///
/// field.touch();
/// assert_eq!(field.messages().get().get("required"), Some("This field is required"));
/// assert_eq!(field.state().get(), "invalid");
///
/// value.set("hello".to_owned());
/// assert!(field.is_valid());
/// ```
#[derive(Clone)]
pub struct Field {
    inner: Rc<FieldInner>,
}

impl Field {
    /// Builds a field and dispatches its initial update.
    ///
    /// Fails if a rule cannot be resolved against the descriptor's registry
    /// (the shared built-in registry by default).
    pub fn new(descriptor: FieldDescriptor) -> Result<Self> {
        Ok(Self::build(Self::resolve(descriptor)?))
    }

    /// Resolves the descriptor's rules without building anything.
    pub(crate) fn resolve(descriptor: FieldDescriptor) -> Result<ResolvedDescriptor> {
        let registry = descriptor
            .registry
            .clone()
            .unwrap_or_else(RuleRegistry::shared);
        let rules = registry.resolve_all(&descriptor.rules)?;
        Ok(ResolvedDescriptor { descriptor, rules })
    }

    /// Builds a field from resolved rules and dispatches its initial update.
    pub(crate) fn build(resolved: ResolvedDescriptor) -> Self {
        let ResolvedDescriptor { descriptor, rules } = resolved;
        let FieldDescriptor {
            value,
            name,
            external_state,
            options,
            on_update,
            ..
        } = descriptor;

        let inner = Rc::new(FieldInner {
            name,
            value,
            external_state,
            rules,
            validate_on: options.validate_on,
            flags: Cell::new(FieldFlags::empty()),
            status: Observable::default(),
            state: Observable::default(),
            messages: Observable::default(),
            dispatcher: UpdateDispatcher::new(on_update),
            subscriptions: RefCell::new(Vec::new()),
            busy: Cell::new(false),
            queued: RefCell::new(VecDeque::new()),
        });

        let mut subscriptions = Vec::with_capacity(2);
        let weak = Rc::downgrade(&inner);
        subscriptions.push(inner.value.subscribe(move |_| {
            if let Some(inner) = Weak::upgrade(&weak) {
                inner.raise(FieldFlags::DIRTY, Trigger::Value);
            }
        }));
        if let Some(external) = &inner.external_state {
            let weak = Rc::downgrade(&inner);
            subscriptions.push(external.subscribe(move |_| {
                if let Some(inner) = Weak::upgrade(&weak) {
                    inner.recompute(Trigger::ExternalState);
                }
            }));
        }
        *inner.subscriptions.borrow_mut() = subscriptions;

        tracing::debug!(
            field = inner.name.as_deref().unwrap_or_default(),
            rules = inner.rules.len(),
            validate_on = %inner.validate_on,
            external_state = inner.external_state.is_some(),
            "Created validated field"
        );

        inner.recompute(Trigger::Init);
        Self { inner }
    }

    /// The field's name, if configured.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        self.inner.name.as_deref()
    }

    /// The observed value.
    #[must_use]
    pub fn value(&self) -> Observable<String> {
        self.inner.value.clone()
    }

    /// Current validation status.
    #[must_use]
    pub fn status(&self) -> ReadOnly<Status> {
        self.inner.status.read_only()
    }

    /// Current display state (`""`, `"valid"`, `"invalid"` or the external override).
    #[must_use]
    pub fn state(&self) -> ReadOnly<String> {
        self.inner.state.read_only()
    }

    /// Currently surfaced messages.
    #[must_use]
    pub fn messages(&self) -> ReadOnly<Messages> {
        self.inner.messages.read_only()
    }

    /// The field's message surfacing policy.
    #[must_use]
    pub fn validate_on(&self) -> ValidateOn {
        self.inner.validate_on
    }

    /// Current interaction flags.
    #[must_use]
    pub fn flags(&self) -> FieldFlags {
        self.inner.flags.get()
    }

    /// Marks the field as touched (e.g. on blur).
    pub fn touch(&self) {
        self.inner.raise(FieldFlags::TOUCHED, Trigger::Touch);
    }

    /// Marks the field as validated (e.g. on form submit).
    pub fn form_validate(&self) {
        self.inner.raise(FieldFlags::VALIDATED, Trigger::Validate);
    }

    /// Clears every interaction flag and re-derives status and messages.
    ///
    /// The observed value is left as it is.
    pub fn reset(&self) {
        self.inner.flags.set(FieldFlags::empty());
        self.inner.recompute(Trigger::Reset);
    }

    /// Returns `true` if the field currently passes validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.inner.status.with(|status| status.valid)
    }

    /// The current status, state and messages.
    #[must_use]
    pub fn snapshot(&self) -> FieldSnapshot {
        FieldSnapshot {
            status: self.inner.status.get(),
            state: self.inner.state.get(),
            messages: self.inner.messages.get(),
        }
    }

    /// Number of `on_update` calls delivered so far.
    #[must_use]
    pub fn updates_dispatched(&self) -> u64 {
        self.inner.dispatcher.dispatched()
    }
}

impl fmt::Debug for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Field")
            .field("name", &self.inner.name)
            .field("rules", &self.inner.rules)
            .field("validate_on", &self.inner.validate_on)
            .field("flags", &self.inner.flags.get())
            .field("status", &self.inner.status)
            .field("state", &self.inner.state)
            .field("messages", &self.inner.messages)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn field(rules: &[&str]) -> (Observable<String>, Field) {
        let value = Observable::new(String::new());
        let field = Field::new(FieldDescriptor::new(value.clone(), rules.iter().copied())).unwrap();
        (value, field)
    }

    #[test]
    fn test_initial_snapshot() {
        let (_, field) = field(&["required"]);
        let snapshot = field.snapshot();

        assert_eq!(snapshot.state, "");
        assert!(snapshot.messages.is_empty());
        assert_eq!(snapshot.status.rule("required"), Some(false));
        assert!(!snapshot.status.valid);
        assert_eq!(field.flags(), FieldFlags::empty());
    }

    #[test]
    fn test_value_change_sets_dirty() {
        let (value, field) = field(&["required"]);
        value.set("a".into());

        assert!(field.status().get().dirty);
        assert!(field.is_valid());
        assert_eq!(field.state().get(), "valid");
    }

    #[test]
    fn test_dirty_is_sticky() {
        let (value, field) = field(&["required"]);
        value.set("a".into());
        value.set(String::new());

        let status = field.status().get();
        assert!(status.dirty);
        assert!(!status.valid);
        assert_eq!(
            field.messages().get().get("required"),
            Some("This field is required")
        );
    }

    #[test]
    fn test_reset_keeps_value() {
        let (value, field) = field(&["required"]);
        value.set("a".into());
        field.touch();
        field.form_validate();

        field.reset();

        let status = field.status().get();
        assert!(!status.touched && !status.dirty && !status.validated);
        assert!(status.valid);
        assert_eq!(value.get(), "a");
        assert_eq!(field.state().get(), "");
    }

    #[test]
    fn test_subscriptions_released_on_drop() {
        let (value, field) = field(&["required"]);
        assert_eq!(value.subscriber_count(), 1);

        let clone = field.clone();
        drop(field);
        assert_eq!(value.subscriber_count(), 1);

        drop(clone);
        assert_eq!(value.subscriber_count(), 0);
        value.set("still works".into());
    }
}
