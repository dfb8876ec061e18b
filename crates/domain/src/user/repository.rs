use super::{NewUser, User, UserPatch};
use crate::DomainError;
use crate::pagination::{Page, PageRequest};
use async_trait::async_trait;

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn create(&self, user: NewUser) -> Result<User, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError>;

    /// `search` matches name, lastname, email or cedula.
    async fn list(&self, page: PageRequest, search: Option<&str>)
    -> Result<Page<User>, DomainError>;

    async fn update(&self, id: i32, patch: UserPatch) -> Result<User, DomainError>;
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}
