//! Character-class validators
//!
//! Each validator requires at least one character: an empty string does not
//! consist "only of letters", so it fails like any other mismatch.

use crate::foundation::ValidationError;

crate::validator! {
    /// Validates that a string contains only letters and digits.
    #[derive(Copy, PartialEq, Eq, Hash, Default)]
    pub Alphanumeric { allow_spaces: bool } for str;
    rule(self, input) {
        !input.is_empty()
            && input.chars().all(|c| c.is_alphanumeric() || (self.allow_spaces && c == ' '))
    }
    error(self, input) {
        ValidationError::new("alphanumeric", if self.allow_spaces {
            "This field may only contain letters, numbers and spaces"
        } else {
            "This field may only contain letters and numbers"
        })
    }
    new() { Self { allow_spaces: false } }
    fn alphanumeric();
}

crate::validator! {
    /// Validates that a string contains only letters.
    #[derive(Copy, PartialEq, Eq, Hash, Default)]
    pub Alphabetic { allow_spaces: bool } for str;
    rule(self, input) {
        !input.is_empty()
            && input.chars().all(|c| c.is_alphabetic() || (self.allow_spaces && c == ' '))
    }
    error(self, input) {
        ValidationError::new("alpha", if self.allow_spaces {
            "This field may only contain letters and spaces"
        } else {
            "This field may only contain letters"
        })
    }
    new() { Self { allow_spaces: false } }
    fn alphabetic();
}

crate::validator! {
    /// Validates that a string contains only decimal digits.
    pub Numeric for str;
    rule(input) { !input.is_empty() && input.chars().all(|c| c.is_ascii_digit()) }
    error(input) { ValidationError::new("numeric", "This field may only contain numbers") }
    fn numeric();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;

    #[test]
    fn test_alphanumeric() {
        let validator = alphanumeric();
        assert!(validator.validate("hello123").is_ok());
        assert!(validator.validate("hello_123").is_err());
        assert!(validator.validate("hello 123").is_err());
        assert!(validator.validate("").is_err());
    }

    #[test]
    fn test_alphanumeric_with_spaces() {
        let validator = Alphanumeric { allow_spaces: true };
        assert!(validator.validate("hello 123").is_ok());
        assert!(validator.validate("hello_123").is_err());
    }

    #[test]
    fn test_alphabetic() {
        let validator = alphabetic();
        assert!(validator.validate("hello").is_ok());
        assert!(validator.validate("hello123").is_err());
        assert_eq!(validator.validate("").unwrap_err().code, "alpha");
    }

    #[test]
    fn test_numeric() {
        let validator = numeric();
        assert!(validator.validate("12345").is_ok());
        assert!(validator.validate("12a45").is_err());
        assert!(validator.validate("-1").is_err());
        assert!(validator.validate("").is_err());
    }
}
