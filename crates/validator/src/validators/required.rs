//! Presence validator

use crate::foundation::{ValidationError, is_blank};

crate::validator! {
    /// Validates that a value is present (not blank).
    pub Required for str;
    rule(input) { !is_blank(input) }
    error(input) { ValidationError::required() }
    fn required();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::foundation::Validate;

    #[test]
    fn test_required() {
        assert!(required().validate("a").is_ok());
        assert!(required().validate("").is_err());
        assert!(required().validate("   ").is_err());
    }

    #[test]
    fn test_required_message() {
        let error = required().validate("").unwrap_err();
        assert_eq!(error.code, "required");
        assert_eq!(error.message, "This field is required");
    }
}
