//! Password hashing backed by bcrypt.

use domain::DomainError;

#[derive(Debug, Clone, Copy)]
pub struct PasswordHasher {
    cost: u32,
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self::new(bcrypt::DEFAULT_COST)
    }
}

impl PasswordHasher {
    pub fn new(cost: u32) -> Self {
        Self { cost }
    }

    pub fn hash(&self, password: &str) -> Result<String, DomainError> {
        if password.is_empty() {
            return Err(DomainError::Validation(
                "Password cannot be empty".to_string(),
            ));
        }
        bcrypt::hash(password, self.cost)
            .map_err(|e| DomainError::Database(format!("Failed to hash password: {}", e)))
    }

    /// A malformed stored hash counts as a mismatch.
    pub fn verify(&self, password: &str, hash: &str) -> bool {
        bcrypt::verify(password, hash).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        // Minimum cost keeps the test fast
        let hasher = PasswordHasher::new(4);
        let hash = hasher.hash("s3cret").unwrap();

        assert_ne!(hash, "s3cret");
        assert!(hasher.verify("s3cret", &hash));
        assert!(!hasher.verify("wrong", &hash));
        assert!(!hasher.verify("s3cret", "not-a-bcrypt-hash"));
    }

    #[test]
    fn test_empty_password_rejected() {
        assert!(matches!(
            PasswordHasher::new(4).hash(""),
            Err(DomainError::Validation(_))
        ));
    }
}
