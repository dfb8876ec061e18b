use super::{NewReport, Report, ReportFilter, ReportPatch};
use crate::DomainError;
use crate::pagination::{Page, PageRequest};
use crate::statistics::{DateWindow, StatusCount};
use async_trait::async_trait;

#[async_trait]
pub trait ReportRepository: Send + Sync {
    async fn create(&self, report: NewReport) -> Result<Report, DomainError>;
    async fn find_by_id(&self, id: i32) -> Result<Option<Report>, DomainError>;

    /// Newest first.
    async fn list(
        &self,
        page: PageRequest,
        filter: &ReportFilter,
    ) -> Result<Page<Report>, DomainError>;

    async fn update(&self, id: i32, patch: ReportPatch) -> Result<Report, DomainError>;

    /// Deletes every case of the report, then the report, in one transaction.
    /// Returns how many cases were removed. A missing report removes nothing
    /// and yields `NotFound`.
    async fn delete_with_cases(&self, id: i32) -> Result<u64, DomainError>;

    /// Report counts grouped by raw `estado` within the window.
    async fn count_by_status(&self, window: &DateWindow) -> Result<Vec<StatusCount>, DomainError>;
}
