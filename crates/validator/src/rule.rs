//! Rule specifications
//!
//! A field's rule list is written as a sequence of [`RuleSpec`]s. In JSON a
//! bare rule is a string and a parameterized rule is a single-entry object:
//!
//! ```json
//! ["required", "email", { "minLength": 5 }]
//! ```

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One entry of a field's rule list.
///
/// Order matters only for iteration order of status and message keys; every
/// rule is evaluated independently.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawRuleSpec", into = "RawRuleSpec")]
pub enum RuleSpec {
    /// A rule without an argument, e.g. `"required"`.
    Bare(String),
    /// A rule carrying an argument, e.g. `{ "minLength": 5 }`.
    Parameterized(String, Value),
}

impl RuleSpec {
    /// Creates a parameterized rule spec.
    pub fn with(id: impl Into<String>, argument: impl Into<Value>) -> Self {
        Self::Parameterized(id.into(), argument.into())
    }

    /// The rule identifier.
    #[must_use]
    pub fn id(&self) -> &str {
        match self {
            Self::Bare(id) | Self::Parameterized(id, _) => id,
        }
    }

    /// The rule argument, if any.
    #[must_use]
    pub fn argument(&self) -> Option<&Value> {
        match self {
            Self::Bare(_) => None,
            Self::Parameterized(_, argument) => Some(argument),
        }
    }

    /// Splits the spec into its uniform `(identifier, argument)` form.
    #[must_use]
    pub fn normalize(&self) -> (&str, Option<&Value>) {
        (self.id(), self.argument())
    }
}

impl From<&str> for RuleSpec {
    fn from(id: &str) -> Self {
        Self::Bare(id.to_owned())
    }
}

impl From<String> for RuleSpec {
    fn from(id: String) -> Self {
        Self::Bare(id)
    }
}

impl<V: Into<Value>> From<(&str, V)> for RuleSpec {
    fn from((id, argument): (&str, V)) -> Self {
        Self::with(id, argument)
    }
}

// ============================================================================
// WIRE FORMAT
// ============================================================================

#[derive(Serialize, Deserialize)]
#[serde(untagged)]
enum RawRuleSpec {
    Bare(String),
    Parameterized(Map<String, Value>),
}

impl TryFrom<RawRuleSpec> for RuleSpec {
    type Error = String;

    fn try_from(raw: RawRuleSpec) -> Result<Self, Self::Error> {
        match raw {
            RawRuleSpec::Bare(id) => Ok(Self::Bare(id)),
            RawRuleSpec::Parameterized(map) => {
                if map.len() != 1 {
                    return Err(format!(
                        "parameterized rule must have exactly one entry, found {}",
                        map.len()
                    ));
                }
                let mut entries = map.into_iter();
                match entries.next() {
                    Some((id, argument)) => Ok(Self::Parameterized(id, argument)),
                    None => Err("parameterized rule must have exactly one entry".to_owned()),
                }
            }
        }
    }
}

impl From<RuleSpec> for RawRuleSpec {
    fn from(spec: RuleSpec) -> Self {
        match spec {
            RuleSpec::Bare(id) => Self::Bare(id),
            RuleSpec::Parameterized(id, argument) => {
                let mut map = Map::new();
                map.insert(id, argument);
                Self::Parameterized(map)
            }
        }
    }
}
