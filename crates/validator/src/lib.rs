//! # nebula-validator
//!
//! Pluggable validation rules for Nebula form fields.
//!
//! A field declares its rules as a list of [`RuleSpec`]s (`"required"`,
//! `{ "minLength": 5 }`, ...). A [`RuleRegistry`] turns each spec into a
//! [`ResolvedRule`] that checks a string value and reports a
//! [`RuleOutcome`] with a human-readable message on failure.
//!
//! ## Quick Start
//!
//! ```rust
//! use nebula_validator::prelude::*;
//!
//! let registry = RuleRegistry::builtin();
//! let rules: Vec<RuleSpec> =
//!     serde_json::from_str(r#"["required", "email", { "minLength": 5 }]"#).unwrap();
//! let resolved = registry.resolve_all(&rules).unwrap();
//!
//! let failing: Vec<&str> = resolved
//!     .iter()
//!     .filter(|rule| !rule.evaluate("a").valid)
//!     .map(ResolvedRule::id)
//!     .collect();
//! assert_eq!(failing, ["email", "minLength"]);
//! ```
//!
//! ## Custom rules
//!
//! Implement [`Validate`](foundation::Validate) (or declare one with
//! [`validator!`]) and register it under an identifier with
//! [`RuleRegistry::register`] or [`RuleRegistry::register_validator`].

pub mod error;
pub mod foundation;
mod macros;
pub mod prelude;
pub mod registry;
pub mod rule;
pub mod validators;

pub use error::{ArgumentError, RegistryError, Result};
pub use registry::{ResolvedRule, RuleFactory, RuleOutcome, RuleRegistry};
pub use rule::RuleSpec;
