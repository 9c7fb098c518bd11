//! Error types for rule resolution
//!
//! These are configuration errors: they surface when a rule list is resolved
//! against a [`RuleRegistry`](crate::RuleRegistry), never while a value is
//! being checked.

use thiserror::Error;

/// Result type for registry operations
pub type Result<T> = std::result::Result<T, RegistryError>;

/// Why a rule argument was rejected by the rule's factory.
#[derive(Error, Debug)]
pub enum ArgumentError {
    /// The rule needs an argument and none was given.
    #[error("an argument is required")]
    Missing,

    /// The rule takes no argument but one was given.
    #[error("the rule takes no argument, found {found}")]
    Unexpected {
        /// The argument as written in the rule spec.
        found: String,
    },

    /// The argument has the wrong type or is out of range.
    #[error("expected {expected}, found {found}")]
    Invalid {
        /// What the rule accepts.
        expected: &'static str,
        /// The argument as written in the rule spec.
        found: String,
    },

    /// The argument is not a valid regular expression.
    #[error("invalid pattern: {0}")]
    Pattern(#[from] regex::Error),
}

/// Error raised while resolving a rule spec.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// No rule is registered under this identifier.
    #[error("unknown validation rule '{id}'")]
    UnknownRule {
        /// The unregistered identifier.
        id: String,
    },

    /// The rule exists but its argument was rejected.
    #[error("invalid argument for rule '{id}': {source}")]
    Argument {
        /// The rule identifier.
        id: String,
        /// The underlying argument error.
        #[source]
        source: ArgumentError,
    },
}

impl RegistryError {
    /// The identifier of the rule that failed to resolve.
    #[must_use]
    pub fn rule_id(&self) -> &str {
        match self {
            Self::UnknownRule { id } | Self::Argument { id, .. } => id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_rule_message() {
        let error = RegistryError::UnknownRule {
            id: "zipCode".into(),
        };
        assert_eq!(error.to_string(), "unknown validation rule 'zipCode'");
        assert_eq!(error.rule_id(), "zipCode");
    }

    #[test]
    fn test_argument_error_message() {
        let error = RegistryError::Argument {
            id: "minLength".into(),
            source: ArgumentError::Invalid {
                expected: "a non-negative integer",
                found: "\"five\"".into(),
            },
        };
        assert_eq!(
            error.to_string(),
            "invalid argument for rule 'minLength': expected a non-negative integer, found \"five\""
        );
    }
}
