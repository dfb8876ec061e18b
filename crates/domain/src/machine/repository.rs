use super::{Machine, MachineNumber};
use crate::pagination::{Page, PageRequest};
use crate::{DomainError, Owner};
use async_trait::async_trait;

#[async_trait]
pub trait MachineRepository: Send + Sync {
    async fn create(
        &self,
        number: &MachineNumber,
        owner: Option<Owner>,
    ) -> Result<Machine, DomainError>;

    async fn find_by_id(&self, id: i32) -> Result<Option<Machine>, DomainError>;

    /// Global exact match on the number, regardless of owner. Oldest row wins
    /// when duplicates exist.
    async fn find_by_number(&self, number: &MachineNumber)
    -> Result<Option<Machine>, DomainError>;

    /// The machine currently held by `owner`, if any.
    async fn find_by_owner(&self, owner: Owner) -> Result<Option<Machine>, DomainError>;

    async fn list(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Machine>, DomainError>;

    async fn update_number(&self, id: i32, number: &MachineNumber)
    -> Result<Machine, DomainError>;

    /// Reassigns the row to `owner`, clearing the other owner column.
    async fn set_owner(&self, id: i32, owner: Option<Owner>) -> Result<Machine, DomainError>;

    /// Nulls the owner columns on every row held by `owner`. Rows are kept.
    async fn unlink_owner(&self, owner: Owner) -> Result<u64, DomainError>;

    async fn delete(&self, id: i32) -> Result<(), DomainError>;

    async fn count_by_number(&self, number: &MachineNumber) -> Result<u64, DomainError>;

    async fn count_by_owner(&self, owner: Owner) -> Result<u64, DomainError>;
}
