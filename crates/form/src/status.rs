//! Status engine
//!
//! Evaluates every configured rule against the current value and folds the
//! outcomes, together with the field's interaction flags, into a [`Status`].

use bitflags::bitflags;
use indexmap::IndexMap;
use nebula_validator::foundation::is_blank;
use nebula_validator::{ResolvedRule, RuleOutcome};
use serde::{Deserialize, Serialize};

bitflags! {
    /// Sticky interaction flags of a field.
    ///
    /// Each flag is set by its trigger and only cleared by a reset.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct FieldFlags: u8 {
        /// `touch()` has been called.
        const TOUCHED = 0b0000_0001;
        /// The value has changed since construction (or the last reset).
        const DIRTY = 0b0000_0010;
        /// `form_validate()` has been called.
        const VALIDATED = 0b0000_0100;
    }
}

/// Outcome of one configured rule against the current value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleReport {
    /// Rule identifier.
    pub id: String,
    /// Whether this is the `required` rule.
    pub required: bool,
    /// Validity and failure message.
    pub outcome: RuleOutcome,
}

impl RuleReport {
    /// Returns `true` if the rule holds.
    #[must_use]
    pub fn passed(&self) -> bool {
        self.outcome.valid
    }
}

/// Evaluates every rule, in declaration order.
///
/// No rule is skipped: per-rule results stay current whatever the field's
/// interaction state.
#[must_use]
pub fn evaluate_rules(value: &str, rules: &[ResolvedRule]) -> Vec<RuleReport> {
    rules
        .iter()
        .map(|rule| RuleReport {
            id: rule.id().to_owned(),
            required: rule.is_required(),
            outcome: rule.evaluate(value),
        })
        .collect()
}

/// Aggregate and per-rule validation status of a field.
///
/// Serializes to a flat object: the five fixed flags followed by one boolean
/// per rule identifier, in declaration order.
///
/// ```json
/// { "touched": true, "dirty": false, "valid": false, "optional": false,
///   "validated": false, "required": false }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Status {
    /// `touch()` has been called.
    pub touched: bool,
    /// The value has been edited.
    pub dirty: bool,
    /// Every rule passes, or the field is empty and optional.
    pub valid: bool,
    /// No `required` rule and the value is blank.
    pub optional: bool,
    /// `form_validate()` has been called.
    pub validated: bool,
    /// Per-rule results keyed by rule identifier.
    #[serde(flatten)]
    pub rules: IndexMap<String, bool>,
}

impl Status {
    /// Result of the rule `id`, or `None` if it is not configured.
    #[must_use]
    pub fn rule(&self, id: &str) -> Option<bool> {
        self.rules.get(id).copied()
    }

    /// Identifiers of the rules that currently fail.
    pub fn failing(&self) -> impl Iterator<Item = &str> {
        self.rules
            .iter()
            .filter(|(_, passed)| !**passed)
            .map(|(id, _)| id.as_str())
    }

    /// The interaction flags this status was computed with.
    #[must_use]
    pub fn flags(&self) -> FieldFlags {
        let mut flags = FieldFlags::empty();
        flags.set(FieldFlags::TOUCHED, self.touched);
        flags.set(FieldFlags::DIRTY, self.dirty);
        flags.set(FieldFlags::VALIDATED, self.validated);
        flags
    }
}

/// Folds rule reports and interaction flags into a [`Status`].
///
/// A rule id configured more than once is reported as the conjunction of its
/// occurrences.
#[must_use]
pub fn compute_status(value: &str, reports: &[RuleReport], flags: FieldFlags) -> Status {
    let mut rules: IndexMap<String, bool> = IndexMap::with_capacity(reports.len());
    for report in reports {
        rules
            .entry(report.id.clone())
            .and_modify(|passed| *passed &= report.passed())
            .or_insert(report.passed());
    }

    let optional = !reports.iter().any(|report| report.required) && is_blank(value);
    let valid = optional || rules.values().all(|passed| *passed);

    Status {
        touched: flags.contains(FieldFlags::TOUCHED),
        dirty: flags.contains(FieldFlags::DIRTY),
        valid,
        optional,
        validated: flags.contains(FieldFlags::VALIDATED),
        rules,
    }
}
