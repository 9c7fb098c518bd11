//! Field construction inputs
//!
//! [`FieldDescriptor`] is the programmatic builder. [`FieldSchema`] and
//! [`FieldOptions`] are its serializable half, for field definitions loaded
//! from JSON:
//!
//! ```rust
//! use nebula_form::{Field, FieldSchema, Observable};
//!
//! let schema: FieldSchema = serde_json::from_str(
//!     r#"{
//!         "name": "email",
//!         "rules": ["required", "email"],
//!         "options": { "validateOn": "blur" }
//!     }"#,
//! )
//! .unwrap();
//!
//! let field = Field::new(schema.bind(Observable::new(String::new()))).unwrap();
//! assert_eq!(field.name(), Some("email"));
//! ```

use std::fmt;
use std::sync::Arc;

use nebula_validator::{RuleRegistry, RuleSpec};
use serde::{Deserialize, Serialize};

use crate::dispatch::UpdateCallback;
use crate::messages::{Messages, ValidateOn};
use crate::observable::Observable;
use crate::status::Status;

/// Per-field behaviour options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct FieldOptions {
    /// When the field starts surfacing error messages.
    #[serde(default)]
    pub validate_on: ValidateOn,
}

/// Serializable field definition.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FieldSchema {
    /// Key of the field inside a field set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Ordered rule list.
    #[serde(default)]
    pub rules: Vec<RuleSpec>,
    #[serde(default)]
    pub options: FieldOptions,
}

impl FieldSchema {
    /// Binds the schema to the value it validates.
    #[must_use]
    pub fn bind(self, value: Observable<String>) -> FieldDescriptor {
        FieldDescriptor {
            value,
            rules: self.rules,
            name: self.name,
            external_state: None,
            options: self.options,
            on_update: None,
            registry: None,
        }
    }
}

/// Everything needed to construct a [`Field`](crate::Field).
pub struct FieldDescriptor {
    pub(crate) value: Observable<String>,
    pub(crate) rules: Vec<RuleSpec>,
    pub(crate) name: Option<String>,
    pub(crate) external_state: Option<Observable<String>>,
    pub(crate) options: FieldOptions,
    pub(crate) on_update: Option<Box<UpdateCallback>>,
    pub(crate) registry: Option<Arc<RuleRegistry>>,
}

impl FieldDescriptor {
    /// Describes a field validating `value` against `rules`.
    pub fn new<I, R>(value: Observable<String>, rules: I) -> Self
    where
        I: IntoIterator<Item = R>,
        R: Into<RuleSpec>,
    {
        Self {
            value,
            rules: rules.into_iter().map(Into::into).collect(),
            name: None,
            external_state: None,
            options: FieldOptions::default(),
            on_update: None,
            registry: None,
        }
    }

    /// Sets the field's name (its key inside a field set).
    #[must_use = "builder methods must be chained or built"]
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Adds a rule to the end of the rule list.
    #[must_use = "builder methods must be chained or built"]
    pub fn rule(mut self, rule: impl Into<RuleSpec>) -> Self {
        self.rules.push(rule.into());
        self
    }

    /// Lets an external value override the display state while non-empty.
    #[must_use = "builder methods must be chained or built"]
    pub fn external_state(mut self, external: Observable<String>) -> Self {
        self.external_state = Some(external);
        self
    }

    #[must_use = "builder methods must be chained or built"]
    pub fn options(mut self, options: FieldOptions) -> Self {
        self.options = options;
        self
    }

    /// Shorthand for setting [`FieldOptions::validate_on`].
    #[must_use = "builder methods must be chained or built"]
    pub fn validate_on(mut self, validate_on: ValidateOn) -> Self {
        self.options.validate_on = validate_on;
        self
    }

    /// Sets the change-notification callback.
    ///
    /// Called once when the field is constructed and once per trigger
    /// afterwards.
    #[must_use = "builder methods must be chained or built"]
    pub fn on_update<F>(mut self, callback: F) -> Self
    where
        F: FnMut(&Status, &str, &Messages) + 'static,
    {
        self.on_update = Some(Box::new(callback));
        self
    }

    /// Resolves rules against `registry` instead of the shared built-in one.
    #[must_use = "builder methods must be chained or built"]
    pub fn registry(mut self, registry: Arc<RuleRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    /// The configured name, if any.
    #[must_use]
    pub fn field_name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// The configured rule list.
    #[must_use]
    pub fn rules(&self) -> &[RuleSpec] {
        &self.rules
    }
}

impl fmt::Debug for FieldDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("rules", &self.rules)
            .field("options", &self.options)
            .field("has_external_state", &self.external_state.is_some())
            .field("has_on_update", &self.on_update.is_some())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_options_wire_format() {
        let options: FieldOptions =
            serde_json::from_value(json!({ "validateOn": "blur" })).unwrap();
        assert_eq!(options.validate_on, ValidateOn::Blur);

        let options: FieldOptions = serde_json::from_value(json!({})).unwrap();
        assert_eq!(options.validate_on, ValidateOn::Input);
    }

    #[test]
    fn test_options_reject_unknown_keys() {
        let result: Result<FieldOptions, _> = serde_json::from_value(json!({ "validate": "blur" }));
        assert!(result.is_err());
    }

    #[test]
    fn test_schema_binds_to_descriptor() {
        let schema: FieldSchema = serde_json::from_value(json!({
            "name": "username",
            "rules": ["required", { "minLength": 3 }],
        }))
        .unwrap();

        let descriptor = schema.bind(Observable::new(String::new()));
        assert_eq!(descriptor.field_name(), Some("username"));
        assert_eq!(
            descriptor.rules(),
            &[RuleSpec::from("required"), RuleSpec::with("minLength", 3)]
        );
        assert_eq!(descriptor.options, FieldOptions::default());
    }

    #[test]
    fn test_builder() {
        let descriptor = FieldDescriptor::new(Observable::new(String::new()), ["required"])
            .rule(("maxLength", 8))
            .name("password")
            .validate_on(ValidateOn::Blur);

        assert_eq!(descriptor.field_name(), Some("password"));
        assert_eq!(descriptor.rules().len(), 2);
        assert_eq!(descriptor.options.validate_on, ValidateOn::Blur);
    }
}
