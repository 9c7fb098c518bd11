//! String length validators
//!
//! Length is measured in Unicode scalar values (chars), so "héllo" is five
//! characters long regardless of its UTF-8 byte length.

use crate::foundation::ValidationError;

#[inline]
fn char_len(input: &str) -> usize {
    input.chars().count()
}

// ============================================================================
// MIN LENGTH
// ============================================================================

crate::validator! {
    /// Validates that a string has at least a minimum length.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MinLength { min: usize } for str;
    rule(self, input) { char_len(input) >= self.min }
    error(self, input) { ValidationError::min_length(self.min, char_len(input)) }
    fn min_length(min: usize);
}

// ============================================================================
// MAX LENGTH
// ============================================================================

crate::validator! {
    /// Validates that a string does not exceed a maximum length.
    #[derive(Copy, PartialEq, Eq, Hash)]
    pub MaxLength { max: usize } for str;
    rule(self, input) { char_len(input) <= self.max }
    error(self, input) { ValidationError::max_length(self.max, char_len(input)) }
    fn max_length(max: usize);
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;

    #[test]
    fn test_min_length() {
        let validator = min_length(5);
        assert!(validator.validate("hello").is_ok());
        assert!(validator.validate("hello world").is_ok());
        assert!(validator.validate("hi").is_err());
        assert!(validator.validate("").is_err());
    }

    #[test]
    fn test_max_length() {
        let validator = max_length(5);
        assert!(validator.validate("hello").is_ok());
        assert!(validator.validate("").is_ok());
        assert!(validator.validate("hello world").is_err());
    }

    #[test]
    fn test_counts_chars_not_bytes() {
        let validator = min_length(5);
        assert!(validator.validate("héllo").is_ok());
        assert!(max_length(5).validate("日本語です").is_ok());
    }

    #[test]
    fn test_min_length_error_params() {
        let error = min_length(5).validate("abc").unwrap_err();
        assert_eq!(error.code, "minLength");
        assert_eq!(error.param("min"), Some("5"));
        assert_eq!(error.param("actual"), Some("3"));
        assert_eq!(
            error.message,
            "This field must be at least 5 characters long"
        );
    }
}
