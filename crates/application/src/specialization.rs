use domain::DomainError;
use domain::specialization::{Specialization, SpecializationName, SpecializationRepository};
use domain::user::UserRepository;
use std::sync::Arc;
use tracing::info;

pub struct SpecializationService {
    specializations: Arc<dyn SpecializationRepository>,
    users: Arc<dyn UserRepository>,
}

impl SpecializationService {
    pub fn new(
        specializations: Arc<dyn SpecializationRepository>,
        users: Arc<dyn UserRepository>,
    ) -> Self {
        Self {
            specializations,
            users,
        }
    }

    /// Find-or-create on the normalised name.
    pub async fn create(&self, raw_name: &str) -> Result<Specialization, DomainError> {
        let name = SpecializationName::new(raw_name)?;
        self.specializations.find_or_create(&name).await
    }

    pub async fn get(&self, id: i32) -> Result<Specialization, DomainError> {
        self.specializations
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Specialization", id))
    }

    pub async fn list(&self) -> Result<Vec<Specialization>, DomainError> {
        self.specializations.list().await
    }

    pub async fn rename(&self, id: i32, raw_name: &str) -> Result<Specialization, DomainError> {
        let name = SpecializationName::new(raw_name)?;
        self.specializations.rename(id, &name).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        self.specializations.delete(id).await?;
        info!(specialization_id = id, "Specialization deleted");
        Ok(())
    }

    /// Gives `id_user` the named specialization, creating it when new.
    pub async fn assign(&self, id_user: i32, raw_name: &str) -> Result<Specialization, DomainError> {
        let name = SpecializationName::new(raw_name)?;
        if self.users.find_by_id(id_user).await?.is_none() {
            return Err(DomainError::not_found("User", id_user));
        }

        let specialization = self.specializations.find_or_create(&name).await?;
        self.specializations
            .assign_to_user(id_user, specialization.id)
            .await?;
        info!(user_id = id_user, specialization = %specialization.name, "Specialization assigned");
        Ok(specialization)
    }

    pub async fn unassign(&self, id_user: i32, id_specialization: i32) -> Result<(), DomainError> {
        self.specializations
            .unassign_from_user(id_user, id_specialization)
            .await
    }

    pub async fn for_user(&self, id_user: i32) -> Result<Vec<Specialization>, DomainError> {
        self.specializations.list_for_user(id_user).await
    }
}
