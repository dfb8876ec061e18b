use crate::DomainError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Technician,
    Administrator,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Technician => "technician",
            Role::Administrator => "administrator",
        }
    }
}

impl std::str::FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "technician" => Ok(Role::Technician),
            "administrator" => Ok(Role::Administrator),
            other => Err(DomainError::Validation(format!("Unknown role: {}", other))),
        }
    }
}

/// A technician or administrator account.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub phone: Option<String>,
    pub cedula: String,
    pub role: Role,
    #[serde(skip_serializing)]
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewUser {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub phone: Option<String>,
    pub cedula: String,
    pub role: Role,
    pub password_hash: String,
}

/// Absent fields are left untouched.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UserPatch {
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub cedula: Option<String>,
    pub role: Option<Role>,
    pub password_hash: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!(" Technician ".parse::<Role>().unwrap(), Role::Technician);
        assert_eq!("administrator".parse::<Role>().unwrap(), Role::Administrator);
        assert!("worker".parse::<Role>().is_err());
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let user = User {
            id: 1,
            name: "Ana".into(),
            lastname: "Rojas".into(),
            email: "ana@example.com".into(),
            phone: None,
            cedula: "V-1".into(),
            role: Role::Technician,
            password_hash: "secret".into(),
            created_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert!(json.get("password_hash").is_none());
        assert_eq!(json["role"], "technician");
    }
}
