//! Core traits for the validation system
//!
//! This module defines the trait every validator implements.

use crate::foundation::ValidationError;

// ============================================================================
// CORE VALIDATOR TRAIT
// ============================================================================

/// The core trait that all validators must implement.
///
/// The trait is object safe, so registries can store validators for the
/// same input type behind a `Box<dyn Validate<Input = str>>`.
///
/// # Examples
///
/// ```rust
/// use nebula_validator::foundation::{Validate, ValidationError};
///
/// struct Lowercase;
///
/// impl Validate for Lowercase {
///     type Input = str;
///
///     fn validate(&self, input: &str) -> Result<(), ValidationError> {
///         if input.chars().all(|c| !c.is_uppercase()) {
///             Ok(())
///         } else {
///             Err(ValidationError::new("lowercase", "Must be lowercase"))
///         }
///     }
/// }
///
/// assert!(Lowercase.validate("abc").is_ok());
/// assert!(Lowercase.validate("Abc").is_err());
/// ```
pub trait Validate {
    /// The type of input being validated.
    ///
    /// Use `?Sized` to allow validation of unsized types like `str`.
    type Input: ?Sized;

    /// Validates the input value.
    ///
    /// * `Ok(())` if the rule holds
    /// * `Err(ValidationError)` describing why it does not
    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError>;

    /// Returns `true` if `input` satisfies the rule.
    fn is_valid(&self, input: &Self::Input) -> bool {
        self.validate(input).is_ok()
    }
}

impl<V: Validate + ?Sized> Validate for Box<V> {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

impl<V: Validate + ?Sized> Validate for &V {
    type Input = V::Input;

    fn validate(&self, input: &Self::Input) -> Result<(), ValidationError> {
        (**self).validate(input)
    }
}

/// A type-erased string validator, as stored in a rule registry.
pub type BoxedValidator = Box<dyn Validate<Input = str> + Send + Sync>;
