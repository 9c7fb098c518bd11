//! Rule registry
//!
//! Maps rule identifiers to factories that build a validator from an
//! optional argument. Resolving a [`RuleSpec`] against the registry yields a
//! [`ResolvedRule`], whose [`evaluate`](ResolvedRule::evaluate) is total:
//! every way a rule can be misconfigured is reported by
//! [`RuleRegistry::resolve`] instead.
//!
//! # Examples
//!
//! ```rust
//! use nebula_validator::{RuleRegistry, RuleSpec};
//!
//! let registry = RuleRegistry::builtin();
//! let rule = registry.resolve(&RuleSpec::with("minLength", 3)).unwrap();
//!
//! assert!(rule.evaluate("abcd").valid);
//! assert_eq!(
//!     rule.evaluate("ab").message.as_deref(),
//!     Some("This field must be at least 3 characters long"),
//! );
//! ```

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, LazyLock};

use serde_json::Value;

use crate::error::{ArgumentError, RegistryError, Result};
use crate::foundation::{BoxedValidator, Validate};
use crate::rule::RuleSpec;
use crate::validators::{
    Alphabetic, Alphanumeric, Email, MatchesRegex, MaxLength, MinLength, Numeric, Required, Url,
};

/// Builds a validator from a rule argument.
pub type RuleFactory =
    dyn Fn(Option<&Value>) -> std::result::Result<BoxedValidator, ArgumentError> + Send + Sync;

static SHARED: LazyLock<Arc<RuleRegistry>> = LazyLock::new(|| Arc::new(RuleRegistry::builtin()));

// ============================================================================
// RULE OUTCOME
// ============================================================================

/// Result of evaluating one rule against one value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleOutcome {
    /// Whether the rule holds.
    pub valid: bool,
    /// Failure message; `None` when the rule holds.
    pub message: Option<String>,
}

impl RuleOutcome {
    /// A passing outcome.
    #[must_use]
    pub fn passed() -> Self {
        Self {
            valid: true,
            message: None,
        }
    }

    /// A failing outcome with its message.
    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            valid: false,
            message: Some(message.into()),
        }
    }
}

// ============================================================================
// RESOLVED RULE
// ============================================================================

/// A rule spec bound to its validator.
pub struct ResolvedRule {
    id: String,
    argument: Option<Value>,
    validator: BoxedValidator,
    message: Option<String>,
}

impl ResolvedRule {
    /// The rule identifier (status / message key).
    #[must_use]
    pub fn id(&self) -> &str {
        &self.id
    }

    /// The argument the rule was resolved with.
    #[must_use]
    pub fn argument(&self) -> Option<&Value> {
        self.argument.as_ref()
    }

    /// Returns `true` for the `required` rule.
    #[must_use]
    pub fn is_required(&self) -> bool {
        self.id == REQUIRED
    }

    /// Checks `value` against the rule.
    ///
    /// A message override registered for the rule takes precedence over the
    /// validator's own message.
    #[must_use]
    pub fn evaluate(&self, value: &str) -> RuleOutcome {
        match self.validator.validate(value) {
            Ok(()) => RuleOutcome::passed(),
            Err(error) => match &self.message {
                Some(message) => RuleOutcome::failed(message.clone()),
                None => RuleOutcome::failed(error.message.into_owned()),
            },
        }
    }
}

impl fmt::Debug for ResolvedRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ResolvedRule")
            .field("id", &self.id)
            .field("argument", &self.argument)
            .field("message", &self.message)
            .finish()
    }
}

// ============================================================================
// REGISTRY
// ============================================================================

const REQUIRED: &str = "required";

/// Identifier → validator factory table.
#[derive(Clone, Default)]
pub struct RuleRegistry {
    factories: HashMap<String, Arc<RuleFactory>>,
    messages: HashMap<String, String>,
}

impl RuleRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with every built-in rule.
    ///
    /// | id | argument |
    /// |----|----------|
    /// | `required`, `email`, `url`, `alphanumeric`, `alpha`, `numeric` | none |
    /// | `minLength`, `maxLength` | non-negative integer |
    /// | `pattern` | regular expression string |
    #[must_use]
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register_validator(REQUIRED, Required);
        registry.register_validator("email", Email);
        registry.register_validator("url", Url);
        registry.register_validator("alphanumeric", Alphanumeric::new());
        registry.register_validator("alpha", Alphabetic::new());
        registry.register_validator("numeric", Numeric);
        registry.register("minLength", |argument| {
            Ok(Box::new(MinLength::new(length_argument(argument)?)) as BoxedValidator)
        });
        registry.register("maxLength", |argument| {
            Ok(Box::new(MaxLength::new(length_argument(argument)?)) as BoxedValidator)
        });
        registry.register("pattern", |argument| {
            let pattern = string_argument(argument)?;
            Ok(Box::new(MatchesRegex::new(pattern)?) as BoxedValidator)
        });
        registry
    }

    /// The process-wide built-in registry.
    #[must_use]
    pub fn shared() -> Arc<Self> {
        Arc::clone(&SHARED)
    }

    /// Registers (or replaces) a rule factory.
    pub fn register<F>(&mut self, id: impl Into<String>, factory: F) -> &mut Self
    where
        F: Fn(Option<&Value>) -> std::result::Result<BoxedValidator, ArgumentError>
            + Send
            + Sync
            + 'static,
    {
        let id = id.into();
        tracing::debug!(rule = %id, "Registered validation rule");
        self.factories.insert(id, Arc::new(factory));
        self
    }

    /// Registers an argument-less rule backed by a cloneable validator.
    pub fn register_validator<V>(&mut self, id: impl Into<String>, validator: V) -> &mut Self
    where
        V: Validate<Input = str> + Clone + Send + Sync + 'static,
    {
        self.register(id, move |argument| {
            no_argument(argument)?;
            Ok(Box::new(validator.clone()) as BoxedValidator)
        })
    }

    /// Overrides the failure message of a rule kind.
    ///
    /// `{arg}` in `template` is replaced with the rule's argument.
    #[must_use = "builder methods must be chained or built"]
    pub fn with_message(mut self, id: impl Into<String>, template: impl Into<String>) -> Self {
        self.set_message(id, template);
        self
    }

    /// In-place form of [`with_message`](Self::with_message).
    pub fn set_message(&mut self, id: impl Into<String>, template: impl Into<String>) -> &mut Self {
        self.messages.insert(id.into(), template.into());
        self
    }

    /// Returns `true` if a rule is registered under `id`.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.factories.contains_key(id)
    }

    /// Registered rule identifiers, sorted.
    #[must_use]
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.factories.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Binds a rule spec to its validator.
    pub fn resolve(&self, spec: &RuleSpec) -> Result<ResolvedRule> {
        let (id, argument) = spec.normalize();
        let factory = self
            .factories
            .get(id)
            .ok_or_else(|| RegistryError::UnknownRule { id: id.to_owned() })?;

        let validator = factory(argument).map_err(|source| RegistryError::Argument {
            id: id.to_owned(),
            source,
        })?;

        let message = self
            .messages
            .get(id)
            .map(|template| render_template(template, argument));

        Ok(ResolvedRule {
            id: id.to_owned(),
            argument: argument.cloned(),
            validator,
            message,
        })
    }

    /// Resolves a whole rule list, failing on the first bad entry.
    pub fn resolve_all(&self, specs: &[RuleSpec]) -> Result<Vec<ResolvedRule>> {
        specs.iter().map(|spec| self.resolve(spec)).collect()
    }
}

impl fmt::Debug for RuleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RuleRegistry")
            .field("rules", &self.ids())
            .field("messages", &self.messages)
            .finish()
    }
}

// ============================================================================
// ARGUMENT HELPERS
// ============================================================================

/// Rejects any argument.
pub fn no_argument(argument: Option<&Value>) -> std::result::Result<(), ArgumentError> {
    match argument {
        None => Ok(()),
        Some(found) => Err(ArgumentError::Unexpected {
            found: found.to_string(),
        }),
    }
}

/// Reads a non-negative integer argument.
pub fn length_argument(argument: Option<&Value>) -> std::result::Result<usize, ArgumentError> {
    let value = argument.ok_or(ArgumentError::Missing)?;
    value
        .as_u64()
        .and_then(|n| usize::try_from(n).ok())
        .ok_or_else(|| ArgumentError::Invalid {
            expected: "a non-negative integer",
            found: value.to_string(),
        })
}

/// Reads a string argument.
pub fn string_argument(argument: Option<&Value>) -> std::result::Result<&str, ArgumentError> {
    let value = argument.ok_or(ArgumentError::Missing)?;
    value.as_str().ok_or_else(|| ArgumentError::Invalid {
        expected: "a string",
        found: value.to_string(),
    })
}

fn render_template(template: &str, argument: Option<&Value>) -> String {
    match argument {
        None => template.to_owned(),
        Some(Value::String(s)) => template.replace("{arg}", s),
        Some(other) => template.replace("{arg}", &other.to_string()),
    }
}
