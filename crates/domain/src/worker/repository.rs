use super::{NewWorker, Worker, WorkerPatch};
use crate::DomainError;
use crate::pagination::{Page, PageRequest};
use async_trait::async_trait;

#[async_trait]
pub trait WorkerRepository: Send + Sync {
    async fn create(&self, worker: NewWorker) -> Result<Worker, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Worker>, DomainError>;
    async fn find_by_ficha(&self, ficha: &str) -> Result<Option<Worker>, DomainError>;

    /// `search` matches ficha, name, lastname or department.
    async fn list(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Worker>, DomainError>;

    async fn update(&self, id: i32, patch: WorkerPatch) -> Result<Worker, DomainError>;
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}
