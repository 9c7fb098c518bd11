//! Display state and field snapshots

use serde::{Deserialize, Serialize};

use crate::messages::Messages;
use crate::status::Status;

/// Display state of a field that shows no verdict yet.
pub const STATE_NONE: &str = "";
/// Display state of an eligible field whose rules all pass.
pub const STATE_VALID: &str = "valid";
/// Display state of an eligible field with a failing rule.
pub const STATE_INVALID: &str = "invalid";

/// Derives the display state string of a field.
///
/// A non-empty `external` override always wins. Otherwise the state stays
/// empty until the field may show errors, then reads `"valid"` or
/// `"invalid"`.
#[must_use]
pub fn display_state(status: &Status, eligible: bool, external: Option<&str>) -> String {
    match external {
        Some(external) if !external.is_empty() => external.to_owned(),
        _ if !eligible => STATE_NONE.to_owned(),
        _ if status.valid => STATE_VALID.to_owned(),
        _ => STATE_INVALID.to_owned(),
    }
}

/// Status, display state and messages of a field at one point in time.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FieldSnapshot {
    pub status: Status,
    pub state: String,
    pub messages: Messages,
}
