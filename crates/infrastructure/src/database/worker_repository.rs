use super::db_error;
use crate::database::entities::workers;
use async_trait::async_trait;
use chrono::Utc;
use domain::DomainError;
use domain::pagination::{Page, PageRequest};
use domain::worker::{NewWorker, Worker, WorkerPatch, WorkerRepository};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

pub struct SeaOrmWorkerRepository {
    db: DatabaseConnection,
}

impl SeaOrmWorkerRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_worker(model: workers::Model) -> Worker {
        Worker {
            id: model.id,
            ficha: model.ficha,
            name: model.name,
            lastname: model.lastname,
            department: model.department,
            division: model.division,
            birth_day: model.birth_day,
            birth_month: model.birth_month,
            created_at: model.created_at,
        }
    }
}

#[async_trait]
impl WorkerRepository for SeaOrmWorkerRepository {
    async fn create(&self, worker: NewWorker) -> Result<Worker, DomainError> {
        let active_model = workers::ActiveModel {
            id: NotSet,
            ficha: Set(worker.ficha),
            name: Set(worker.name),
            lastname: Set(worker.lastname),
            department: Set(worker.department),
            division: Set(worker.division),
            birth_day: Set(worker.birth_day),
            birth_month: Set(worker.birth_month),
            created_at: Set(Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(db_error)?;
        Ok(Self::model_to_worker(model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Worker>, DomainError> {
        let model = workers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Self::model_to_worker))
    }

    async fn find_by_ficha(&self, ficha: &str) -> Result<Option<Worker>, DomainError> {
        let model = workers::Entity::find()
            .filter(workers::Column::Ficha.eq(ficha.trim()))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Self::model_to_worker))
    }

    async fn list(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Worker>, DomainError> {
        let mut query = workers::Entity::find().order_by_asc(workers::Column::Id);
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(workers::Column::Ficha.contains(term))
                    .add(workers::Column::Name.contains(term))
                    .add(workers::Column::Lastname.contains(term))
                    .add(workers::Column::Department.contains(term)),
            );
        }

        let paginator = query.paginate(&self.db, page.limit);
        let total = paginator.num_items().await.map_err(db_error)?;
        let models = paginator
            .fetch_page(page.page - 1)
            .await
            .map_err(db_error)?;

        Ok(Page::new(
            models.into_iter().map(Self::model_to_worker).collect(),
            total,
            page,
        ))
    }

    async fn update(&self, id: i32, patch: WorkerPatch) -> Result<Worker, DomainError> {
        let model = workers::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| DomainError::not_found("Worker", id))?;

        let current = model.clone();
        let mut active_model: workers::ActiveModel = model.into();

        if let Some(ficha) = patch.ficha {
            active_model.ficha = Set(ficha);
        }
        if let Some(name) = patch.name {
            active_model.name = Set(name);
        }
        if let Some(lastname) = patch.lastname {
            active_model.lastname = Set(lastname);
        }
        if let Some(department) = patch.department {
            active_model.department = Set(Some(department));
        }
        if let Some(division) = patch.division {
            active_model.division = Set(Some(division));
        }
        if let Some(birth_day) = patch.birth_day {
            active_model.birth_day = Set(Some(birth_day));
        }
        if let Some(birth_month) = patch.birth_month {
            active_model.birth_month = Set(Some(birth_month));
        }

        if !active_model.is_changed() {
            return Ok(Self::model_to_worker(current));
        }

        let model = active_model.update(&self.db).await.map_err(db_error)?;
        Ok(Self::model_to_worker(model))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = workers::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Worker", id));
        }
        Ok(())
    }
}
