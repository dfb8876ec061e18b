use crate::machine::MachineReconciler;
use domain::machine::{Machine, MachineChange};
use domain::pagination::{Page, PageRequest};
use domain::specialization::{Specialization, SpecializationName, SpecializationRepository};
use domain::user::{NewUser, Role, User, UserPatch, UserRepository};
use domain::{DomainError, Owner};
use infrastructure::PasswordHasher;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateUser {
    pub name: String,
    pub lastname: String,
    pub email: String,
    pub phone: Option<String>,
    pub cedula: String,
    pub role: Role,
    pub password: String,
    /// Specialization names, find-or-created and assigned to the new user.
    #[serde(default)]
    pub specializations: Vec<String>,
    #[serde(default)]
    pub nro_maquina: MachineChange,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateUser {
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub cedula: Option<String>,
    pub role: Option<Role>,
    pub password: Option<String>,
    #[serde(default)]
    pub nro_maquina: MachineChange,
}

/// A user with its specializations and current machine.
#[derive(Debug, Clone, Serialize)]
pub struct UserDetails {
    #[serde(flatten)]
    pub user: User,
    pub specializations: Vec<Specialization>,
    pub machine: Option<Machine>,
}

fn required(field: &str, value: String) -> Result<String, DomainError> {
    let value = value.trim().to_string();
    if value.is_empty() {
        return Err(DomainError::Validation(format!("{} is required", field)));
    }
    Ok(value)
}

pub struct UserService {
    users: Arc<dyn UserRepository>,
    specializations: Arc<dyn SpecializationRepository>,
    reconciler: Arc<MachineReconciler>,
    hasher: PasswordHasher,
}

impl UserService {
    pub fn new(
        users: Arc<dyn UserRepository>,
        specializations: Arc<dyn SpecializationRepository>,
        reconciler: Arc<MachineReconciler>,
        hasher: PasswordHasher,
    ) -> Self {
        Self {
            users,
            specializations,
            reconciler,
            hasher,
        }
    }

    pub async fn create(&self, payload: CreateUser) -> Result<UserDetails, DomainError> {
        let names = payload
            .specializations
            .iter()
            .map(|raw| SpecializationName::new(raw))
            .collect::<Result<Vec<_>, _>>()?;

        let new_user = NewUser {
            name: required("name", payload.name)?,
            lastname: required("lastname", payload.lastname)?,
            email: required("email", payload.email)?.to_lowercase(),
            phone: payload.phone,
            cedula: required("cedula", payload.cedula)?,
            role: payload.role,
            password_hash: self.hasher.hash(&payload.password)?,
        };

        let user = self.users.create(new_user).await?;
        info!(user_id = user.id, role = user.role.as_str(), "User created");

        // The machine needs the new id, so a failure past this point removes
        // the row again rather than leaving a half-built account.
        if let Err(err) = self.attach(&user, &names, &payload.nro_maquina).await {
            self.discard(user.id).await;
            return Err(err);
        }

        self.details(user).await
    }

    async fn attach(
        &self,
        user: &User,
        names: &[SpecializationName],
        nro_maquina: &MachineChange,
    ) -> Result<(), DomainError> {
        for name in names {
            let specialization = self.specializations.find_or_create(name).await?;
            self.specializations
                .assign_to_user(user.id, specialization.id)
                .await?;
        }

        self.reconciler
            .reconcile_owner_machine(Owner::User(user.id), nro_maquina)
            .await?;
        Ok(())
    }

    async fn discard(&self, id: i32) {
        match self.users.delete(id).await {
            Ok(()) => warn!(user_id = id, "User creation rolled back"),
            Err(e) => warn!(user_id = id, error = %e, "Failed to roll back user creation"),
        }
    }

    /// Patches the user; a submitted `nro_maquina` goes through the
    /// ownership-aware machine reconciliation before the row is written.
    pub async fn update(&self, id: i32, payload: UpdateUser) -> Result<UserDetails, DomainError> {
        let password_hash = match payload.password.as_deref() {
            Some(password) => Some(self.hasher.hash(password)?),
            None => None,
        };

        let patch = UserPatch {
            name: payload.name,
            lastname: payload.lastname,
            email: payload.email.map(|e| e.trim().to_lowercase()),
            phone: payload.phone,
            cedula: payload.cedula,
            role: payload.role,
            password_hash,
        };

        let current = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;

        // Machine first: a failed reconciliation leaves the row untouched
        let outcome = self
            .reconciler
            .reconcile_owner_machine(Owner::User(current.id), &payload.nro_maquina)
            .await?;

        let user = self.users.update(id, patch).await?;
        info!(user_id = user.id, machine = ?outcome, "User updated");

        self.details(user).await
    }

    /// Checks email and password. Unknown email and wrong password give the
    /// same error.
    pub async fn authenticate(&self, email: &str, password: &str) -> Result<User, DomainError> {
        let email = email.trim().to_lowercase();
        let user = self.users.find_by_email(&email).await?;

        match user {
            Some(user) if self.hasher.verify(password, &user.password_hash) => Ok(user),
            _ => {
                warn!(email = %email, "Rejected login attempt");
                Err(DomainError::Unauthorized("Invalid credentials".to_string()))
            }
        }
    }

    pub async fn get(&self, id: i32) -> Result<UserDetails, DomainError> {
        let user = self
            .users
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("User", id))?;
        self.details(user).await
    }

    pub async fn list(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<User>, DomainError> {
        self.users.list(page, search).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        self.users.delete(id).await?;
        info!(user_id = id, "User deleted");
        Ok(())
    }

    async fn details(&self, user: User) -> Result<UserDetails, DomainError> {
        let specializations = self.specializations.list_for_user(user.id).await?;
        let machine = self.reconciler.machine_of(Owner::User(user.id)).await?;
        Ok(UserDetails {
            user,
            specializations,
            machine,
        })
    }
}
