use super::db_error;
use crate::database::entities::machines;
use async_trait::async_trait;
use domain::machine::{Machine, MachineNumber, MachineRepository};
use domain::pagination::{Page, PageRequest};
use domain::{DomainError, Owner};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

pub struct SeaOrmMachineRepository {
    db: DatabaseConnection,
}

impl SeaOrmMachineRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_machine(model: machines::Model) -> Machine {
        Machine {
            id: model.id,
            owner: Owner::from_columns(model.id_user, model.id_workers),
            nro_maquina: model.nro_maquina,
        }
    }

    fn owned_by(owner: Owner) -> Condition {
        match owner {
            Owner::User(id) => Condition::all().add(machines::Column::IdUser.eq(id)),
            Owner::Worker(id) => Condition::all().add(machines::Column::IdWorkers.eq(id)),
        }
    }

    async fn load(&self, id: i32) -> Result<machines::Model, DomainError> {
        machines::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| DomainError::not_found("Machine", id))
    }
}

#[async_trait]
impl MachineRepository for SeaOrmMachineRepository {
    async fn create(
        &self,
        number: &MachineNumber,
        owner: Option<Owner>,
    ) -> Result<Machine, DomainError> {
        let (id_user, id_workers) = Owner::columns(owner);
        let active_model = machines::ActiveModel {
            id: NotSet,
            nro_maquina: Set(number.as_str().to_string()),
            id_user: Set(id_user),
            id_workers: Set(id_workers),
        };

        let model = active_model.insert(&self.db).await.map_err(db_error)?;
        Ok(Self::model_to_machine(model))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Machine>, DomainError> {
        let model = machines::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Self::model_to_machine))
    }

    async fn find_by_number(
        &self,
        number: &MachineNumber,
    ) -> Result<Option<Machine>, DomainError> {
        let model = machines::Entity::find()
            .filter(machines::Column::NroMaquina.eq(number.as_str()))
            .order_by_asc(machines::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Self::model_to_machine))
    }

    async fn find_by_owner(&self, owner: Owner) -> Result<Option<Machine>, DomainError> {
        let model = machines::Entity::find()
            .filter(Self::owned_by(owner))
            .order_by_asc(machines::Column::Id)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Self::model_to_machine))
    }

    async fn list(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Machine>, DomainError> {
        let mut query = machines::Entity::find().order_by_asc(machines::Column::Id);
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(machines::Column::NroMaquina.contains(term));
        }

        let paginator = query.paginate(&self.db, page.limit);
        let total = paginator.num_items().await.map_err(db_error)?;
        let models = paginator
            .fetch_page(page.page - 1)
            .await
            .map_err(db_error)?;

        Ok(Page::new(
            models.into_iter().map(Self::model_to_machine).collect(),
            total,
            page,
        ))
    }

    async fn update_number(
        &self,
        id: i32,
        number: &MachineNumber,
    ) -> Result<Machine, DomainError> {
        let mut active_model: machines::ActiveModel = self.load(id).await?.into();
        active_model.nro_maquina = Set(number.as_str().to_string());

        let model = active_model.update(&self.db).await.map_err(db_error)?;
        Ok(Self::model_to_machine(model))
    }

    async fn set_owner(&self, id: i32, owner: Option<Owner>) -> Result<Machine, DomainError> {
        let (id_user, id_workers) = Owner::columns(owner);
        let mut active_model: machines::ActiveModel = self.load(id).await?.into();
        active_model.id_user = Set(id_user);
        active_model.id_workers = Set(id_workers);

        let model = active_model.update(&self.db).await.map_err(db_error)?;
        Ok(Self::model_to_machine(model))
    }

    async fn unlink_owner(&self, owner: Owner) -> Result<u64, DomainError> {
        let result = machines::Entity::update_many()
            .col_expr(machines::Column::IdUser, Expr::value(Option::<i32>::None))
            .col_expr(machines::Column::IdWorkers, Expr::value(Option::<i32>::None))
            .filter(Self::owned_by(owner))
            .exec(&self.db)
            .await
            .map_err(db_error)?;
        Ok(result.rows_affected)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = machines::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Machine", id));
        }
        Ok(())
    }

    async fn count_by_number(&self, number: &MachineNumber) -> Result<u64, DomainError> {
        machines::Entity::find()
            .filter(machines::Column::NroMaquina.eq(number.as_str()))
            .count(&self.db)
            .await
            .map_err(db_error)
    }

    async fn count_by_owner(&self, owner: Owner) -> Result<u64, DomainError> {
        machines::Entity::find()
            .filter(Self::owned_by(owner))
            .count(&self.db)
            .await
            .map_err(db_error)
    }
}
