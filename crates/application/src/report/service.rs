use crate::machine::MachineReconciler;
use chrono::{NaiveDate, Utc};
use domain::machine::MachineChange;
use domain::pagination::{Page, PageRequest};
use domain::report::{
    DEFAULT_ESTADO, NewReport, Report, ReportFilter, ReportPatch, ReportRepository,
};
use domain::{DomainError, Owner, lenient_id};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{debug, info};

/// Body of a report submission. Ownership comes from the caller's token, so
/// any `id_user`/`id_workers` in the body is ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateReport {
    #[serde(default)]
    pub nro_maquina: MachineChange,
    #[serde(default)]
    pub title: String,
    pub area: Option<String>,
    pub estado: Option<String>,
    pub description: Option<String>,
    pub natural_user: Option<String>,
    pub natural_password: Option<String>,
    pub windows_user: Option<String>,
    pub windows_password: Option<String>,
    pub date: Option<NaiveDate>,
}

/// Partial report update. Owner ids of `0`, `"0"` or `""` count as absent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReport {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id_user: Option<i32>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub id_workers: Option<i32>,
    #[serde(default)]
    pub nro_maquina: MachineChange,
    pub title: Option<String>,
    pub area: Option<String>,
    pub estado: Option<String>,
    pub description: Option<String>,
    pub natural_user: Option<String>,
    pub natural_password: Option<String>,
    pub windows_user: Option<String>,
    pub windows_password: Option<String>,
    pub date: Option<NaiveDate>,
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub struct ReportService {
    reports: Arc<dyn ReportRepository>,
    reconciler: Arc<MachineReconciler>,
}

impl ReportService {
    pub fn new(reports: Arc<dyn ReportRepository>, reconciler: Arc<MachineReconciler>) -> Self {
        Self {
            reports,
            reconciler,
        }
    }

    /// Stores a report owned by `submitter`, attaching the machine resolved
    /// through the global find-or-create lookup.
    pub async fn create(
        &self,
        submitter: Owner,
        payload: CreateReport,
    ) -> Result<Report, DomainError> {
        let title = payload.title.trim().to_string();
        if title.is_empty() {
            return Err(DomainError::Validation("title is required".to_string()));
        }

        let id_machine = self
            .reconciler
            .resolve_for_new_report(Some(submitter), &payload.nro_maquina)
            .await?;

        let report = self
            .reports
            .create(NewReport {
                owner: submitter,
                id_machine,
                title,
                area: payload.area,
                estado: non_blank(payload.estado).unwrap_or_else(|| DEFAULT_ESTADO.to_string()),
                description: payload.description,
                natural_user: payload.natural_user,
                natural_password: payload.natural_password,
                windows_user: payload.windows_user,
                windows_password: payload.windows_password,
                date: payload.date.unwrap_or_else(|| Utc::now().date_naive()),
            })
            .await?;

        info!(report_id = report.id, owner = %submitter, id_machine = ?report.id_machine, "Report created");
        Ok(report)
    }

    /// Applies a partial update.
    ///
    /// The owner used for machine reconciliation is the one named in the
    /// payload, falling back to the report's stored owner. A report without
    /// any owner resolves numbers like a new submission would.
    pub async fn update(&self, id: i32, payload: UpdateReport) -> Result<Report, DomainError> {
        let current = self
            .reports
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Report", id))?;

        let submitted_owner = Owner::from_columns(payload.id_user, payload.id_workers);
        let owner = submitted_owner.or(current.owner);

        let id_machine = match (owner, &payload.nro_maquina) {
            (_, MachineChange::Unchanged) => None,
            (Some(owner), change) => self
                .reconciler
                .reconcile_owner_machine(owner, change)
                .await?
                .report_machine(),
            (None, MachineChange::Clear) => Some(None),
            (None, change) => Some(self.reconciler.resolve_for_new_report(None, change).await?),
        };
        debug!(report_id = id, owner = ?owner, id_machine = ?id_machine, "Resolved report update");

        let patch = ReportPatch {
            owner: submitted_owner,
            id_machine,
            title: non_blank(payload.title),
            area: payload.area,
            estado: non_blank(payload.estado),
            description: payload.description,
            natural_user: payload.natural_user,
            natural_password: payload.natural_password,
            windows_user: payload.windows_user,
            windows_password: payload.windows_password,
            date: payload.date,
        };

        let report = self.reports.update(id, patch).await?;
        info!(report_id = report.id, "Report updated");
        Ok(report)
    }

    /// Deletes the report together with its cases. Returns the number of
    /// cases removed.
    pub async fn delete(&self, id: i32) -> Result<u64, DomainError> {
        let removed_cases = self.reports.delete_with_cases(id).await?;
        info!(report_id = id, removed_cases, "Report deleted");
        Ok(removed_cases)
    }

    pub async fn get(&self, id: i32) -> Result<Report, DomainError> {
        self.reports
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Report", id))
    }

    pub async fn list(
        &self,
        page: PageRequest,
        filter: &ReportFilter,
    ) -> Result<Page<Report>, DomainError> {
        self.reports.list(page, filter).await
    }
}
