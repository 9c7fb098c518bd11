//! Format validators
//!
//! `email` and `url` check a fixed shape; `pattern` compiles a caller-supplied
//! expression once, when the rule is resolved.

use std::sync::LazyLock;

use regex::Regex;

use crate::foundation::ValidationError;

/// `local@domain.tld`, no whitespace and exactly one `@`.
static EMAIL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@.]+(\.[^\s@.]+)+$").expect("email expression is valid")
});

/// Absolute `http`/`https` address with a dotted host.
static URL: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^https?://[^\s/?#.]+(\.[^\s/?#.]+)+(:\d+)?([/?#]\S*)?$")
        .expect("url expression is valid")
});

crate::validator! {
    /// Checks the input against a caller-supplied expression.
    ///
    /// The expression is unanchored; add `^`/`$` to match the whole value.
    pub MatchesRegex { regex: Regex } for str;
    rule(self, input) { self.regex.is_match(input) }
    error(self, input) {
        ValidationError::invalid_format("pattern", "This field does not match the expected format")
            .with_param("pattern", self.regex.as_str().to_owned())
    }
    new(pattern: &str) -> regex::Error {
        Regex::new(pattern).map(|regex| Self { regex })
    }
    fn matches_regex(pattern: &str) -> regex::Error;
}

crate::validator! {
    pub Email for str;
    rule(input) { EMAIL.is_match(input) }
    error(input) { ValidationError::invalid_format("email", "Please enter a valid email address") }
    fn email();
}

crate::validator! {
    pub Url for str;
    rule(input) { URL.is_match(input) }
    error(input) { ValidationError::invalid_format("url", "Please enter a valid URL") }
    fn url();
}
