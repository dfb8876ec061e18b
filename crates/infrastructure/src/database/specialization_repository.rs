use super::db_error;
use crate::database::entities::{specializations, user_specializations};
use async_trait::async_trait;
use domain::DomainError;
use domain::specialization::{Specialization, SpecializationName, SpecializationRepository};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, NotSet, QueryFilter,
    QueryOrder, QuerySelect, RelationTrait, Set,
};
use sea_orm::sea_query::JoinType;
use tracing::debug;

pub struct SeaOrmSpecializationRepository {
    db: DatabaseConnection,
}

impl SeaOrmSpecializationRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_specialization(model: specializations::Model) -> Specialization {
        Specialization {
            id: model.id,
            name: model.name,
        }
    }

    async fn find_by_name(
        &self,
        name: &SpecializationName,
    ) -> Result<Option<specializations::Model>, DomainError> {
        specializations::Entity::find()
            .filter(specializations::Column::Name.eq(name.as_str()))
            .one(&self.db)
            .await
            .map_err(db_error)
    }
}

#[async_trait]
impl SpecializationRepository for SeaOrmSpecializationRepository {
    async fn find_or_create(
        &self,
        name: &SpecializationName,
    ) -> Result<Specialization, DomainError> {
        if let Some(existing) = self.find_by_name(name).await? {
            return Ok(Self::model_to_specialization(existing));
        }

        let active_model = specializations::ActiveModel {
            id: NotSet,
            name: Set(name.as_str().to_string()),
        };

        match active_model.insert(&self.db).await.map_err(db_error) {
            Ok(model) => Ok(Self::model_to_specialization(model)),
            // Lost the race against another insert of the same name
            Err(DomainError::Conflict(_)) => {
                debug!(name = %name.as_str(), "Specialization created concurrently, reusing it");
                self.find_by_name(name)
                    .await?
                    .map(Self::model_to_specialization)
                    .ok_or_else(|| DomainError::not_found("Specialization", name.as_str()))
            }
            Err(e) => Err(e),
        }
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Specialization>, DomainError> {
        let model = specializations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?;
        Ok(model.map(Self::model_to_specialization))
    }

    async fn list(&self) -> Result<Vec<Specialization>, DomainError> {
        let models = specializations::Entity::find()
            .order_by_asc(specializations::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Ok(models
            .into_iter()
            .map(Self::model_to_specialization)
            .collect())
    }

    async fn rename(
        &self,
        id: i32,
        name: &SpecializationName,
    ) -> Result<Specialization, DomainError> {
        let model = specializations::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| DomainError::not_found("Specialization", id))?;

        if model.name == name.as_str() {
            return Ok(Self::model_to_specialization(model));
        }

        let mut active_model: specializations::ActiveModel = model.into();
        active_model.name = Set(name.as_str().to_string());
        let model = active_model.update(&self.db).await.map_err(db_error)?;
        Ok(Self::model_to_specialization(model))
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = specializations::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("Specialization", id));
        }
        Ok(())
    }

    async fn assign_to_user(
        &self,
        id_user: i32,
        id_specialization: i32,
    ) -> Result<(), DomainError> {
        let existing = user_specializations::Entity::find_by_id((id_user, id_specialization))
            .one(&self.db)
            .await
            .map_err(db_error)?;
        if existing.is_some() {
            return Ok(());
        }

        let active_model = user_specializations::ActiveModel {
            id_user: Set(id_user),
            id_specialization: Set(id_specialization),
        };
        user_specializations::Entity::insert(active_model)
            .exec_without_returning(&self.db)
            .await
            .map_err(db_error)?;
        Ok(())
    }

    async fn unassign_from_user(
        &self,
        id_user: i32,
        id_specialization: i32,
    ) -> Result<(), DomainError> {
        let result = user_specializations::Entity::delete_by_id((id_user, id_specialization))
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(DomainError::NotFound(format!(
                "User {} has no specialization {}",
                id_user, id_specialization
            )));
        }
        Ok(())
    }

    async fn list_for_user(&self, id_user: i32) -> Result<Vec<Specialization>, DomainError> {
        let models = specializations::Entity::find()
            .join(
                JoinType::InnerJoin,
                specializations::Relation::UserSpecializations.def(),
            )
            .filter(user_specializations::Column::IdUser.eq(id_user))
            .order_by_asc(specializations::Column::Name)
            .all(&self.db)
            .await
            .map_err(db_error)?;
        Ok(models
            .into_iter()
            .map(Self::model_to_specialization)
            .collect())
    }
}
