//! Message engine
//!
//! Decides which failing rules are surfaced to the user. A rule's message is
//! shown only while the rule fails *and* the field is eligible to show errors
//! under its [`ValidateOn`] policy.

use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::status::{FieldFlags, RuleReport, Status};

/// When a field starts surfacing error messages.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ValidateOn {
    /// After the first edit, touch or bulk validation.
    #[default]
    Input,
    /// Only after a touch or bulk validation; edits alone never surface errors.
    Blur,
}

impl ValidateOn {
    /// Wire name (`"input"` / `"blur"`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Input => "input",
            Self::Blur => "blur",
        }
    }
}

impl fmt::Display for ValidateOn {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Returns `true` if a field with these flags may show error messages.
#[must_use]
pub fn is_eligible(validate_on: ValidateOn, flags: FieldFlags) -> bool {
    let triggers = match validate_on {
        ValidateOn::Input => FieldFlags::all(),
        ValidateOn::Blur => FieldFlags::TOUCHED | FieldFlags::VALIDATED,
    };
    flags.intersects(triggers)
}

/// Surfaced failure messages keyed by rule identifier.
///
/// An empty map means no visible errors.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Messages(IndexMap<String, String>);

impl Messages {
    /// Creates an empty message map.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Message for rule `id`, if surfaced.
    #[must_use]
    pub fn get(&self, id: &str) -> Option<&str> {
        self.0.get(id).map(String::as_str)
    }

    /// Returns `true` if rule `id` has a surfaced message.
    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.0.contains_key(id)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Surfaced rule identifiers, in declaration order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// `(rule id, message)` pairs, in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.0.iter().map(|(id, message)| (id.as_str(), message.as_str()))
    }

    /// The first surfaced message.
    #[must_use]
    pub fn first(&self) -> Option<&str> {
        self.0.first().map(|(_, message)| message.as_str())
    }
}

impl FromIterator<(String, String)> for Messages {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Computes the surfaced messages for a field.
///
/// Returns an empty map while the field is not eligible, or when it is valid
/// only because it is empty and optional. When a rule id repeats, the first
/// failing occurrence supplies the message.
#[must_use]
pub fn compute_messages(
    status: &Status,
    reports: &[RuleReport],
    validate_on: ValidateOn,
    flags: FieldFlags,
) -> Messages {
    if status.optional || !is_eligible(validate_on, flags) {
        return Messages::new();
    }

    let mut messages = IndexMap::new();
    for report in reports.iter().filter(|report| !report.passed()) {
        if let Some(message) = &report.outcome.message {
            messages
                .entry(report.id.clone())
                .or_insert_with(|| message.clone());
        }
    }
    Messages(messages)
}
