use crate::DomainError;
use serde::{Deserialize, Serialize};

/// A skill tag shared by users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Specialization {
    pub id: i32,
    pub name: String,
}

/// Lower-cased, trimmed name used as the de-duplication key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct SpecializationName(String);

impl SpecializationName {
    pub fn new(raw: &str) -> Result<Self, DomainError> {
        let name = raw.trim().to_lowercase();
        if name.is_empty() {
            return Err(DomainError::Validation(
                "Specialization name cannot be empty".to_string(),
            ));
        }
        Ok(Self(name))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
