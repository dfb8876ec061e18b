use chrono::{NaiveTime, Timelike, Utc};
use domain::pagination::{Page, PageRequest};
use domain::report::ReportRepository;
use domain::report_case::{NewReportCase, ReportCase, ReportCasePatch, ReportCaseRepository};
use domain::user::UserRepository;
use domain::{DomainError, lenient_id};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateReportCase {
    #[serde(default, deserialize_with = "lenient_id")]
    pub id_report: Option<i32>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub id_user: Option<i32>,
    pub diagnosis: Option<String>,
    pub resolution: Option<String>,
    /// Defaults to the current time of day.
    pub hour: Option<NaiveTime>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateReportCase {
    pub diagnosis: Option<String>,
    pub resolution: Option<String>,
    pub hour: Option<NaiveTime>,
}

pub struct ReportCaseService {
    cases: Arc<dyn ReportCaseRepository>,
    reports: Arc<dyn ReportRepository>,
    users: Arc<dyn UserRepository>,
}

impl ReportCaseService {
    pub fn new(
        cases: Arc<dyn ReportCaseRepository>,
        reports: Arc<dyn ReportRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            cases,
            reports,
            users,
        }
    }

    /// Adds a technician's case to an existing report.
    pub async fn create(&self, payload: CreateReportCase) -> Result<ReportCase, DomainError> {
        let id_report = payload
            .id_report
            .ok_or_else(|| DomainError::Validation("id_report is required".to_string()))?;
        let id_user = payload
            .id_user
            .ok_or_else(|| DomainError::Validation("id_user is required".to_string()))?;

        if self.reports.find_by_id(id_report).await?.is_none() {
            return Err(DomainError::Validation(format!(
                "Report {} does not exist",
                id_report
            )));
        }
        if self.users.find_by_id(id_user).await?.is_none() {
            return Err(DomainError::Validation(format!(
                "User {} does not exist",
                id_user
            )));
        }

        let hour = payload.hour.unwrap_or_else(|| {
            let now = Utc::now().time();
            now.with_nanosecond(0).unwrap_or(now)
        });

        let case = self
            .cases
            .create(NewReportCase {
                id_report,
                id_user,
                diagnosis: payload.diagnosis,
                resolution: payload.resolution,
                hour,
            })
            .await?;
        info!(case_id = case.id, report_id = id_report, user_id = id_user, "Report case created");
        Ok(case)
    }

    pub async fn get(&self, id: i32) -> Result<ReportCase, DomainError> {
        self.cases
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Report case", id))
    }

    pub async fn list(
        &self,
        page: PageRequest,
        id_report: Option<i32>,
    ) -> Result<Page<ReportCase>, DomainError> {
        self.cases.list(page, id_report).await
    }

    pub async fn update(
        &self,
        id: i32,
        payload: UpdateReportCase,
    ) -> Result<ReportCase, DomainError> {
        self.cases
            .update(
                id,
                ReportCasePatch {
                    diagnosis: payload.diagnosis,
                    resolution: payload.resolution,
                    hour: payload.hour,
                },
            )
            .await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        self.cases.delete(id).await?;
        info!(case_id = id, "Report case deleted");
        Ok(())
    }
}
