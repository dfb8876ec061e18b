use domain::machine::{Machine, MachineNumber, MachineRepository};
use domain::pagination::{Page, PageRequest};
use domain::{DomainError, Owner, lenient_id};
use serde::Deserialize;
use std::sync::Arc;
use tracing::info;

#[derive(Debug, Clone, Deserialize)]
pub struct CreateMachine {
    pub nro_maquina: String,
    #[serde(default, deserialize_with = "lenient_id")]
    pub id_user: Option<i32>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub id_workers: Option<i32>,
}

/// Owner ids that coerce to nothing leave the owner as it is.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateMachine {
    #[serde(default)]
    pub nro_maquina: Option<String>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub id_user: Option<i32>,
    #[serde(default, deserialize_with = "lenient_id")]
    pub id_workers: Option<i32>,
}

/// Direct machine administration.
pub struct MachineService {
    machines: Arc<dyn MachineRepository>,
}

impl MachineService {
    pub fn new(machines: Arc<dyn MachineRepository>) -> Self {
        Self { machines }
    }

    fn parse_number(raw: &str) -> Result<MachineNumber, DomainError> {
        MachineNumber::parse(raw)
            .ok_or_else(|| DomainError::Validation("nro_maquina cannot be empty".to_string()))
    }

    pub async fn create(&self, payload: CreateMachine) -> Result<Machine, DomainError> {
        let number = Self::parse_number(&payload.nro_maquina)?;
        let owner = Owner::from_columns(payload.id_user, payload.id_workers);
        let machine = self.machines.create(&number, owner).await?;
        info!(machine_id = machine.id, number = %number, "Machine registered");
        Ok(machine)
    }

    pub async fn get(&self, id: i32) -> Result<Machine, DomainError> {
        self.machines
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Machine", id))
    }

    pub async fn list(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Machine>, DomainError> {
        self.machines.list(page, search).await
    }

    pub async fn update(&self, id: i32, payload: UpdateMachine) -> Result<Machine, DomainError> {
        let mut machine = self.get(id).await?;

        if let Some(raw) = payload.nro_maquina.as_deref() {
            let number = Self::parse_number(raw)?;
            if machine.nro_maquina != number.as_str() {
                machine = self.machines.update_number(id, &number).await?;
            }
        }

        if let Some(owner) = Owner::from_columns(payload.id_user, payload.id_workers) {
            if !machine.is_owned_by(owner) {
                machine = self.machines.set_owner(id, Some(owner)).await?;
            }
        }

        Ok(machine)
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        self.machines.delete(id).await?;
        info!(machine_id = id, "Machine deleted");
        Ok(())
    }
}
