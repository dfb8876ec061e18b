use super::db_error;
use crate::database::entities::users;
use async_trait::async_trait;
use chrono::Utc;
use domain::DomainError;
use domain::pagination::{Page, PageRequest};
use domain::user::{NewUser, Role, User, UserPatch, UserRepository};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, DatabaseConnection, EntityTrait, NotSet,
    PaginatorTrait, QueryFilter, QueryOrder, Set,
};

pub struct SeaOrmUserRepository {
    db: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    fn model_to_user(model: users::Model) -> Result<User, DomainError> {
        let role: Role = model.role.parse().map_err(|_| {
            DomainError::Database(format!(
                "User {} has unknown role stored: {}",
                model.id, model.role
            ))
        })?;

        Ok(User {
            id: model.id,
            name: model.name,
            lastname: model.lastname,
            email: model.email,
            phone: model.phone,
            cedula: model.cedula,
            role,
            password_hash: model.password,
            created_at: model.created_at,
        })
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let active_model = users::ActiveModel {
            id: NotSet,
            name: Set(user.name),
            lastname: Set(user.lastname),
            email: Set(user.email),
            phone: Set(user.phone),
            cedula: Set(user.cedula),
            role: Set(user.role.as_str().to_string()),
            password: Set(user.password_hash),
            created_at: Set(Utc::now()),
        };

        let model = active_model.insert(&self.db).await.map_err(db_error)?;
        Self::model_to_user(model)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(Self::model_to_user)
            .transpose()
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        users::Entity::find()
            .filter(users::Column::Email.eq(email.trim()))
            .one(&self.db)
            .await
            .map_err(db_error)?
            .map(Self::model_to_user)
            .transpose()
    }

    async fn list(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<User>, DomainError> {
        let mut query = users::Entity::find().order_by_asc(users::Column::Id);
        if let Some(term) = search.map(str::trim).filter(|t| !t.is_empty()) {
            query = query.filter(
                Condition::any()
                    .add(users::Column::Name.contains(term))
                    .add(users::Column::Lastname.contains(term))
                    .add(users::Column::Email.contains(term))
                    .add(users::Column::Cedula.contains(term)),
            );
        }

        let paginator = query.paginate(&self.db, page.limit);
        let total = paginator.num_items().await.map_err(db_error)?;
        let models = paginator
            .fetch_page(page.page - 1)
            .await
            .map_err(db_error)?;

        let mut data = Vec::with_capacity(models.len());
        for m in models {
            data.push(Self::model_to_user(m)?);
        }
        Ok(Page::new(data, total, page))
    }

    async fn update(&self, id: i32, patch: UserPatch) -> Result<User, DomainError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .map_err(db_error)?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        let current = model.clone();
        let mut active_model: users::ActiveModel = model.into();

        if let Some(name) = patch.name {
            active_model.name = Set(name);
        }
        if let Some(lastname) = patch.lastname {
            active_model.lastname = Set(lastname);
        }
        if let Some(email) = patch.email {
            active_model.email = Set(email);
        }
        if let Some(phone) = patch.phone {
            active_model.phone = Set(Some(phone));
        }
        if let Some(cedula) = patch.cedula {
            active_model.cedula = Set(cedula);
        }
        if let Some(role) = patch.role {
            active_model.role = Set(role.as_str().to_string());
        }
        if let Some(password_hash) = patch.password_hash {
            active_model.password = Set(password_hash);
        }

        if !active_model.is_changed() {
            return Self::model_to_user(current);
        }

        let model = active_model.update(&self.db).await.map_err(db_error)?;
        Self::model_to_user(model)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let result = users::Entity::delete_by_id(id)
            .exec(&self.db)
            .await
            .map_err(db_error)?;

        if result.rows_affected == 0 {
            return Err(DomainError::not_found("User", id));
        }
        Ok(())
    }
}
