//! Prelude module for convenient imports.
//!
//! ```rust
//! use nebula_validator::prelude::*;
//!
//! assert!(min_length(3).validate("abc").is_ok());
//! ```

pub use crate::error::{ArgumentError, RegistryError};
pub use crate::foundation::{BoxedValidator, Validate, ValidationError, is_blank};
pub use crate::registry::{
    ResolvedRule, RuleOutcome, RuleRegistry, length_argument, no_argument, string_argument,
};
pub use crate::rule::RuleSpec;

#[allow(clippy::wildcard_imports)]
pub use crate::validators::*;
