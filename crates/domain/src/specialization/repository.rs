use super::{Specialization, SpecializationName};
use crate::DomainError;
use async_trait::async_trait;

#[async_trait]
pub trait SpecializationRepository: Send + Sync {
    /// Returns the existing row with this name or inserts it.
    async fn find_or_create(&self, name: &SpecializationName)
    -> Result<Specialization, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Specialization>, DomainError>;
    async fn list(&self) -> Result<Vec<Specialization>, DomainError>;
    async fn rename(&self, id: i32, name: &SpecializationName)
    -> Result<Specialization, DomainError>;
    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    /// Idempotent.
    async fn assign_to_user(&self, id_user: i32, id_specialization: i32)
    -> Result<(), DomainError>;
    async fn unassign_from_user(
        &self,
        id_user: i32,
        id_specialization: i32,
    ) -> Result<(), DomainError>;
    async fn list_for_user(&self, id_user: i32) -> Result<Vec<Specialization>, DomainError>;
}
