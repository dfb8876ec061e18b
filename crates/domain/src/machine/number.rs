use serde::{Deserialize, Deserializer, Serialize};

/// A normalised machine number: trimmed and never empty.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct MachineNumber(String);

impl MachineNumber {
    /// Returns `None` when the trimmed input is empty ("no machine").
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MachineNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// What a submission says about the owner's machine number.
///
/// - field absent or `null` → `Unchanged`
/// - `""` (after trimming) → `Clear`, the owner gives up its machine
/// - anything else → `Assign`
///
/// Numbers may arrive as JSON strings or JSON numbers.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum MachineChange {
    #[default]
    Unchanged,
    Clear,
    Assign(MachineNumber),
}

impl MachineChange {
    pub fn from_raw(raw: &str) -> Self {
        match MachineNumber::parse(raw) {
            Some(number) => MachineChange::Assign(number),
            None => MachineChange::Clear,
        }
    }

    /// The number to attach on creation; `Clear` and `Unchanged` both mean
    /// no machine there.
    pub fn number(&self) -> Option<&MachineNumber> {
        match self {
            MachineChange::Assign(number) => Some(number),
            _ => None,
        }
    }
}

impl<'de> Deserialize<'de> for MachineChange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Text(String),
            Number(serde_json::Number),
        }

        Ok(match Option::<Raw>::deserialize(deserializer)? {
            None => MachineChange::Unchanged,
            Some(Raw::Text(s)) => MachineChange::from_raw(&s),
            Some(Raw::Number(n)) => MachineChange::from_raw(&n.to_string()),
        })
    }
}
