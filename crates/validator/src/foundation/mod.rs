//! Core validation types and traits
//!
//! - **Traits**: [`Validate`]
//! - **Errors**: [`ValidationError`]
//! - **Helpers**: [`is_blank`]

pub mod error;
pub mod traits;

pub use error::ValidationError;
pub use traits::{BoxedValidator, Validate};

/// Returns `true` if the value counts as empty for form purposes.
///
/// Whitespace-only input is blank. Both the `required` rule and the form
/// layer's `optional` flag go through this one definition.
#[must_use]
pub fn is_blank(value: &str) -> bool {
    value.trim().is_empty()
}
