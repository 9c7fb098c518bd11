//! Form configuration errors
//!
//! Every variant is raised while fields are being constructed. Once a field
//! exists, failing rules are reported through its status and messages, not
//! through `Err`.

use nebula_validator::RegistryError;
use thiserror::Error;

/// Result type for field and field set construction
pub type Result<T> = std::result::Result<T, FormError>;

/// Error raised while building a field or a field set.
#[derive(Error, Debug)]
pub enum FormError {
    /// A rule in the field's rule list could not be resolved.
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A descriptor in a multi-field set has no name.
    #[error("field at index {index} has no name")]
    MissingName {
        /// Position of the descriptor in the input sequence.
        index: usize,
    },

    /// Two descriptors in a multi-field set share a name.
    #[error("duplicate field name '{name}'")]
    DuplicateName {
        /// The repeated name.
        name: String,
    },
}
