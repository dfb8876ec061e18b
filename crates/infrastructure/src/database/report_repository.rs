use super::db_error;
use crate::database::entities::{report_cases, reports};
use async_trait::async_trait;
use domain::pagination::{Page, PageRequest};
use domain::report::{NewReport, Report, ReportFilter, ReportPatch, ReportRepository};
use domain::statistics::{DateWindow, StatusCount};
use domain::{DomainError, Owner};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, PaginatorTrait,
    QueryFilter, QueryOrder, QuerySelect, Set, TransactionTrait,
};
use tracing::debug;

pub struct SeaOrmReportRepository {
    db: DatabaseConnection,
}

impl SeaOrmReportRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_report(model: reports::Model) -> Report {
        Report {
            id: model.id,
            id_machine: model.id_machine,
            owner: Owner::from_columns(model.id_user, model.id_workers),
            title: model.title,
            area: model.area,
            estado: model.estado,
            description: model.description,
            natural_user: model.natural_user,
            natural_password: model.natural_password,
            windows_user: model.windows_user,
            windows_password: model.windows_password,
            date: model.date,
        }
    }
}

#[async_trait]
impl ReportRepository for SeaOrmReportRepository {
    async fn create(&self, report: NewReport) -> Result<Report, DomainError> {
        let (id_user, id_workers) = Owner::columns(Some(report.owner));
        let active_model = reports::ActiveModel {
            id: NotSet,
            id_machine: Set(report.id_machine),
            id_user: Set(id_user),
            id_workers: Set(id_workers),
            title: Set(report.title),
            area: Set(report.area),
            estado: Set(report.estado),
            description: Set(report.description),
            natural_user: Set(report.natural_user),
            natural_password: Set(report.natural_password),
            windows_user: Set(report.windows_user),
            windows_password: Set(report.windows_password),
            date: Set(report.date),
        };

        let model = active_model.insert(&self.db).await.map_err(db_error)?;
        Ok(Self::model_to_report(model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Report>, DomainError> {
        let model = reports::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Self::model_to_report))
    }

    async fn list(
        &self,
        page: PageRequest,
        filter: &ReportFilter,
    ) -> Result<Page<Report>, DomainError> {
        let mut query = reports::Entity::find()
            .order_by_desc(reports::Column::Date)
            .order_by_desc(reports::Column::Id);

        match filter.owner {
            Some(Owner::User(id)) => query = query.filter(reports::Column::IdUser.eq(id)),
            Some(Owner::Worker(id)) => query = query.filter(reports::Column::IdWorkers.eq(id)),
            None => {}
        }
        if let Some(estado) = &filter.estado {
            query = query.filter(reports::Column::Estado.eq(estado.as_str()));
        }
        if let Some(id_machine) = filter.id_machine {
            query = query.filter(reports::Column::IdMachine.eq(id_machine));
        }

        let paginator = query.paginate(&self.db, page.limit);
        let total = paginator.num_items().await.map_err(db_error)?;
        let models = paginator
            .fetch_page(page.page - 1)
            .await
            .map_err(db_error)?;

        Ok(Page::new(
            models.into_iter().map(Self::model_to_report).collect(),
            total,
            page,
        ))
    }

    async fn update(&self, id: i32, patch: ReportPatch) -> Result<Report, DomainError> {
        let model = reports::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| DomainError::not_found("Report", id))?;

        let current = model.clone();
        let mut active_model: reports::ActiveModel = model.into();

        if let Some(owner) = patch.owner {
            let (id_user, id_workers) = Owner::columns(Some(owner));
            active_model.id_user = Set(id_user);
            active_model.id_workers = Set(id_workers);
        }
        if let Some(id_machine) = patch.id_machine {
            active_model.id_machine = Set(id_machine);
        }
        if let Some(title) = patch.title {
            active_model.title = Set(title);
        }
        if let Some(area) = patch.area {
            active_model.area = Set(Some(area));
        }
        if let Some(estado) = patch.estado {
            active_model.estado = Set(estado);
        }
        if let Some(description) = patch.description {
            active_model.description = Set(Some(description));
        }
        if let Some(natural_user) = patch.natural_user {
            active_model.natural_user = Set(Some(natural_user));
        }
        if let Some(natural_password) = patch.natural_password {
            active_model.natural_password = Set(Some(natural_password));
        }
        if let Some(windows_user) = patch.windows_user {
            active_model.windows_user = Set(Some(windows_user));
        }
        if let Some(windows_password) = patch.windows_password {
            active_model.windows_password = Set(Some(windows_password));
        }
        if let Some(date) = patch.date {
            active_model.date = Set(date);
        }

        if !active_model.is_changed() {
            return Ok(Self::model_to_report(current));
        }

        let model = active_model.update(&self.db).await.map_err(db_error)?;
        Ok(Self::model_to_report(model))
    }

    async fn delete_with_cases(&self, id: i32) -> Result<u64, DomainError> {
        let txn = self.db.begin().await.map_err(db_error)?;

        let exists = reports::Entity::find_by_id(id)
            .one(&txn)
            .await
            .map_err(db_error)?
            .is_some();
        if !exists {
            txn.rollback().await.map_err(db_error)?;
            return Err(DomainError::not_found("Report", id));
        }

        // Dropping `txn` on any `?` below rolls everything back
        let cases = report_cases::Entity::delete_many()
            .filter(report_cases::Column::IdReport.eq(id))
            .exec(&txn)
            .await
            .map_err(db_error)?;

        reports::Entity::delete_by_id(id)
            .exec(&txn)
            .await
            .map_err(db_error)?;

        txn.commit().await.map_err(db_error)?;

        debug!(report_id = id, cases = cases.rows_affected, "Report deleted with its cases");
        Ok(cases.rows_affected)
    }

    async fn count_by_status(&self, window: &DateWindow) -> Result<Vec<StatusCount>, DomainError> {
        let mut query = reports::Entity::find()
            .select_only()
            .column(reports::Column::Estado)
            .column_as(Expr::col(reports::Column::Id).count(), "count")
            .group_by(reports::Column::Estado);

        if let Some(from) = window.from {
            query = query.filter(reports::Column::Date.gte(from));
        }
        if let Some(to) = window.to {
            query = query.filter(reports::Column::Date.lte(to));
        }

        let rows: Vec<(String, i64)> = query.into_tuple().all(&self.db).await.map_err(db_error)?;

        Ok(rows
            .into_iter()
            .map(|(estado, count)| StatusCount {
                estado,
                count: count.max(0) as u64,
            })
            .collect())
    }
}
