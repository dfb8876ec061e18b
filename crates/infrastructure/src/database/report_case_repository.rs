use super::db_error;
use crate::database::entities::report_cases;
use async_trait::async_trait;
use chrono::Utc;
use domain::DomainError;
use domain::pagination::{Page, PageRequest};
use domain::report_case::{NewReportCase, ReportCase, ReportCasePatch, ReportCaseRepository};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, Set,
};

pub struct SeaOrmReportCaseRepository {
    db: DatabaseConnection,
}

impl SeaOrmReportCaseRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_case(model: report_cases::Model) -> ReportCase {
        ReportCase {
            id: model.id,
            id_report: model.id_report,
            id_user: model.id_user,
            diagnosis: model.diagnosis,
            resolution: model.resolution,
            hour: model.hour,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl ReportCaseRepository for SeaOrmReportCaseRepository {
    async fn create(&self, case: NewReportCase) -> Result<ReportCase, DomainError> {
        let active_model = report_cases::ActiveModel {
            id: NotSet,
            id_report: Set(case.id_report),
            id_user: Set(case.id_user),
            diagnosis: Set(case.diagnosis),
            resolution: Set(case.resolution),
            hour: Set(case.hour),
            created_at: Set(Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(db_error)?;
        Ok(Self::model_to_case(model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<ReportCase>, DomainError> {
        let model = report_cases::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Self::model_to_case))
    }

    async fn list(
        &self,
        page: PageRequest,
        id_report: Option<i32>,
    ) -> Result<Page<ReportCase>, DomainError> {
        let mut query = report_cases::Entity::find().order_by_asc(report_cases::Column::Id);
        if let Some(id_report) = id_report {
            query = query.filter(report_cases::Column::IdReport.eq(id_report));
        }

        let paginator = query.paginate(&self.db, page.limit);
        let total = paginator.num_items().await.map_err(db_error)?;
        let models = paginator
            .fetch_page(page.page - 1)
            .await
            .map_err(db_error)?;

        Ok(Page::new(
            models.into_iter().map(Self::model_to_case).collect(),
            total,
            page,
        ))
    }

    async fn update(&self, id: i32, patch: ReportCasePatch) -> Result<ReportCase, DomainError> {
        let model = report_cases::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| DomainError::not_found("Report case", id))?;

        let current = model.clone();
        let mut active_model: report_cases::ActiveModel = model.into();

        if let Some(diagnosis) = patch.diagnosis {
            active_model.diagnosis = Set(Some(diagnosis));
        }
        if let Some(resolution) = patch.resolution {
            active_model.resolution = Set(Some(resolution));
        }
        if let Some(hour) = patch.hour {
            active_model.hour = Set(hour);
        }

        if !active_model.is_changed() {
            return Ok(Self::model_to_case(current));
        }

        let model = active_model.update(&self.db).await.map_err(db_error)?;
        Ok(Self::model_to_case(model))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = report_cases::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Report case", id));
        }
        Ok(())
    }
}
