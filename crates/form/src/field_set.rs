//! Field set aggregator
//!
//! Groups several [`Field`]s under their names, for multi-field forms, and
//! provides the single entry point [`use_validation`] that accepts either one
//! descriptor or a sequence of them.

use std::collections::HashSet;
use std::ops::Index;

use indexmap::IndexMap;

use crate::descriptor::FieldDescriptor;
use crate::error::{FormError, Result};
use crate::field::Field;

/// Named fields, in declaration order.
#[derive(Debug, Clone, Default)]
pub struct FieldSet {
    fields: IndexMap<String, Field>,
}

impl FieldSet {
    /// Builds one field per descriptor.
    ///
    /// Every descriptor needs a distinct name. Names and rules are checked
    /// for every descriptor before any field is built, so a set that fails
    /// to build dispatches no updates.
    pub fn new(descriptors: Vec<FieldDescriptor>) -> Result<Self> {
        check_names(&descriptors)?;

        let resolved = descriptors
            .into_iter()
            .map(Field::resolve)
            .collect::<Result<Vec<_>>>()?;

        let mut fields = IndexMap::with_capacity(resolved.len());
        for descriptor in resolved {
            let name = descriptor.name().unwrap_or_default().to_owned();
            fields.insert(name, Field::build(descriptor));
        }

        tracing::debug!(fields = fields.len(), "Created field set");
        Ok(Self { fields })
    }

    /// The field named `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Field> {
        self.fields.get(name)
    }

    /// Field names, in declaration order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// `(name, field)` pairs, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Field)> {
        self.fields.iter().map(|(name, field)| (name.as_str(), field))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Validates every field (submit) and returns whether all of them pass.
    pub fn form_validate(&self) -> bool {
        for field in self.fields.values() {
            field.form_validate();
        }
        self.is_valid()
    }

    /// Touches every field.
    pub fn touch_all(&self) {
        for field in self.fields.values() {
            field.touch();
        }
    }

    /// Resets every field.
    pub fn reset(&self) {
        for field in self.fields.values() {
            field.reset();
        }
    }

    /// Returns `true` if every field currently passes validation.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.fields.values().all(Field::is_valid)
    }
}

fn check_names(descriptors: &[FieldDescriptor]) -> Result<()> {
    let mut seen = HashSet::with_capacity(descriptors.len());
    for (index, descriptor) in descriptors.iter().enumerate() {
        let name = descriptor
            .field_name()
            .ok_or(FormError::MissingName { index })?;
        if !seen.insert(name) {
            return Err(FormError::DuplicateName {
                name: name.to_owned(),
            });
        }
    }
    Ok(())
}

impl Index<&str> for FieldSet {
    type Output = Field;

    /// # Panics
    ///
    /// Panics if no field is named `name`.
    fn index(&self, name: &str) -> &Field {
        &self.fields[name]
    }
}

impl<'a> IntoIterator for &'a FieldSet {
    type Item = (&'a String, &'a Field);
    type IntoIter = indexmap::map::Iter<'a, String, Field>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

// ============================================================================
// ENTRY POINT
// ============================================================================

/// Input of [`use_validation`].
#[derive(Debug)]
pub enum ValidationInput {
    /// One field; the name is optional.
    Single(FieldDescriptor),
    /// Several named fields.
    Many(Vec<FieldDescriptor>),
}

impl From<FieldDescriptor> for ValidationInput {
    fn from(descriptor: FieldDescriptor) -> Self {
        Self::Single(descriptor)
    }
}

impl From<Vec<FieldDescriptor>> for ValidationInput {
    fn from(descriptors: Vec<FieldDescriptor>) -> Self {
        Self::Many(descriptors)
    }
}

/// Output of [`use_validation`]: a single handle or a named set.
#[derive(Debug, Clone)]
pub enum Validation {
    Field(Field),
    Set(FieldSet),
}

impl Validation {
    /// The single field, if this is one.
    #[must_use]
    pub fn as_field(&self) -> Option<&Field> {
        match self {
            Self::Field(field) => Some(field),
            Self::Set(_) => None,
        }
    }

    /// The field set, if this is one.
    #[must_use]
    pub fn as_set(&self) -> Option<&FieldSet> {
        match self {
            Self::Field(_) => None,
            Self::Set(set) => Some(set),
        }
    }

    #[must_use]
    pub fn into_field(self) -> Option<Field> {
        match self {
            Self::Field(field) => Some(field),
            Self::Set(_) => None,
        }
    }

    #[must_use]
    pub fn into_set(self) -> Option<FieldSet> {
        match self {
            Self::Field(_) => None,
            Self::Set(set) => Some(set),
        }
    }
}

/// Builds validation for one descriptor or a sequence of them.
///
/// A single descriptor yields its [`Field`] handle directly. A sequence
/// yields a [`FieldSet`] keyed by name, even when it holds one descriptor.
///
/// ```rust
/// use nebula_form::{FieldDescriptor, Observable, use_validation};
///
/// let username = Observable::new(String::new());
/// let password = Observable::new(String::new());
///
/// let form = use_validation(vec![
///     FieldDescriptor::new(username, ["required"]).name("username"),
///     FieldDescriptor::new(password, ["required"]).name("password"),
/// ])
/// .unwrap()
/// .into_set()
/// .unwrap();
///
/// assert_eq!(form.names().collect::<Vec<_>>(), ["username", "password"]);
/// assert!(!form.form_validate());
/// ```
pub fn use_validation(input: impl Into<ValidationInput>) -> Result<Validation> {
    match input.into() {
        ValidationInput::Single(descriptor) => Field::new(descriptor).map(Validation::Field),
        ValidationInput::Many(descriptors) => FieldSet::new(descriptors).map(Validation::Set),
    }
}
