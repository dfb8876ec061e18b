use super::{NewReportCase, ReportCase, ReportCasePatch};
use crate::DomainError;
use crate::pagination::{Page, PageRequest};
use async_trait::async_trait;

#[async_trait]
pub trait ReportCaseRepository: Send + Sync {
    async fn create(&self, case: NewReportCase) -> Result<ReportCase, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<ReportCase>, DomainError>;
    async fn list(
        &self,
        page: PageRequest,
        id_report: Option<i32>,
    ) -> Result<Page<ReportCase>, DomainError>;
    async fn update(&self, id: i32, patch: ReportCasePatch) -> Result<ReportCase, DomainError>;
    async fn delete(&self, id: i32) -> Result<(), DomainError>;
}
