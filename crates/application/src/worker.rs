use crate::machine::MachineReconciler;
use domain::machine::{Machine, MachineChange};
use domain::pagination::{Page, PageRequest};
use domain::worker::{NewWorker, Worker, WorkerPatch, WorkerRepository};
use domain::{DomainError, Owner};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Debug, Clone, Deserialize)]
pub struct CreateWorker {
    pub ficha: String,
    pub name: String,
    pub lastname: String,
    pub department: Option<String>,
    pub division: Option<String>,
    pub birth_day: Option<i32>,
    pub birth_month: Option<i32>,
    #[serde(default)]
    pub nro_maquina: MachineChange,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWorker {
    pub ficha: Option<String>,
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub department: Option<String>,
    pub division: Option<String>,
    pub birth_day: Option<i32>,
    pub birth_month: Option<i32>,
    #[serde(default)]
    pub nro_maquina: MachineChange,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkerDetails {
    #[serde(flatten)]
    pub worker: Worker,
    pub machine: Option<Machine>,
}

fn validate_birth(day: Option<i32>, month: Option<i32>) -> Result<(), DomainError> {
    if day.is_some_and(|d| !(1..=31).contains(&d)) {
        return Err(DomainError::Validation("birth_day must be 1-31".to_string()));
    }
    if month.is_some_and(|m| !(1..=12).contains(&m)) {
        return Err(DomainError::Validation("birth_month must be 1-12".to_string()));
    }
    Ok(())
}

pub struct WorkerService {
    workers: Arc<dyn WorkerRepository>,
    reconciler: Arc<MachineReconciler>,
}

impl WorkerService {
    pub fn new(workers: Arc<dyn WorkerRepository>, reconciler: Arc<MachineReconciler>) -> Self {
        Self {
            workers,
            reconciler,
        }
    }

    /// Inserts the worker, then attaches its machine. The insert is undone
    /// when the machine cannot be resolved.
    pub async fn create(&self, payload: CreateWorker) -> Result<WorkerDetails, DomainError> {
        let ficha = payload.ficha.trim().to_string();
        if ficha.is_empty() {
            return Err(DomainError::Validation("ficha is required".to_string()));
        }
        validate_birth(payload.birth_day, payload.birth_month)?;

        let worker = self
            .workers
            .create(NewWorker {
                ficha,
                name: payload.name,
                lastname: payload.lastname,
                department: payload.department,
                division: payload.division,
                birth_day: payload.birth_day,
                birth_month: payload.birth_month,
            })
            .await?;
        info!(worker_id = worker.id, ficha = %worker.ficha, "Worker created");

        if let Err(err) = self
            .reconciler
            .reconcile_owner_machine(Owner::Worker(worker.id), &payload.nro_maquina)
            .await
        {
            match self.workers.delete(worker.id).await {
                Ok(()) => warn!(worker_id = worker.id, "Worker creation rolled back"),
                Err(e) => warn!(worker_id = worker.id, error = %e, "Failed to roll back worker creation"),
            }
            return Err(err);
        }

        self.details(worker).await
    }

    /// Reconciles the submitted machine number, then patches the row.
    pub async fn update(
        &self,
        id: i32,
        payload: UpdateWorker,
    ) -> Result<WorkerDetails, DomainError> {
        validate_birth(payload.birth_day, payload.birth_month)?;

        let patch = WorkerPatch {
            ficha: payload.ficha.map(|f| f.trim().to_string()).filter(|f| !f.is_empty()),
            name: payload.name,
            lastname: payload.lastname,
            department: payload.department,
            division: payload.division,
            birth_day: payload.birth_day,
            birth_month: payload.birth_month,
        };
        let current = self
            .workers
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Worker", id))?;

        // Machine first: a failed reconciliation leaves the row untouched
        let outcome = self
            .reconciler
            .reconcile_owner_machine(Owner::Worker(current.id), &payload.nro_maquina)
            .await?;

        let worker = self.workers.update(id, patch).await?;
        info!(worker_id = worker.id, machine = ?outcome, "Worker updated");

        self.details(worker).await
    }

    /// Workers sign in with their badge alone.
    pub async fn authenticate(&self, ficha: &str) -> Result<Worker, DomainError> {
        match self.workers.find_by_ficha(ficha).await? {
            Some(worker) => Ok(worker),
            None => {
                warn!(ficha = %ficha.trim(), "Unknown ficha");
                Err(DomainError::Unauthorized("Unknown ficha".to_string()))
            }
        }
    }

    pub async fn get(&self, id: i32) -> Result<WorkerDetails, DomainError> {
        let worker = self
            .workers
            .find_by_id(id)
            .await?
            .ok_or_else(|| DomainError::not_found("Worker", id))?;
        self.details(worker).await
    }

    pub async fn get_by_ficha(&self, ficha: &str) -> Result<WorkerDetails, DomainError> {
        let worker = self
            .workers
            .find_by_ficha(ficha)
            .await?
            .ok_or_else(|| DomainError::not_found("Worker with ficha", ficha.trim()))?;
        self.details(worker).await
    }

    pub async fn list(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Worker>, DomainError> {
        self.workers.list(page, search).await
    }

    pub async fn delete(&self, id: i32) -> Result<(), DomainError> {
        self.workers.delete(id).await?;
        info!(worker_id = id, "Worker deleted");
        Ok(())
    }

    async fn details(&self, worker: Worker) -> Result<WorkerDetails, DomainError> {
        let machine = self.reconciler.machine_of(Owner::Worker(worker.id)).await?;
        Ok(WorkerDetails { worker, machine })
    }
}
