use dashmap::DashMap;
use domain::machine::{Machine, MachineChange, MachineNumber, MachineRepository};
use domain::{DomainError, Owner};
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::{debug, info};

/// What happened to an owner's machine during an update.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MachineOutcome {
    /// No machine number was submitted.
    Unchanged,
    /// The owner now holds this machine.
    Attached(i32),
    /// The owner gave up its machines.
    Detached,
}

impl MachineOutcome {
    /// The change to apply to a report's machine reference, if any.
    pub fn report_machine(&self) -> Option<Option<i32>> {
        match self {
            MachineOutcome::Unchanged => None,
            MachineOutcome::Attached(id) => Some(Some(*id)),
            MachineOutcome::Detached => Some(None),
        }
    }
}

/// Resolves submitted machine numbers to machine rows.
///
/// Two flows exist:
///
/// * the create flow ([`resolve_for_new_report`]) looks the number up
///   globally and reuses whatever row it finds, ownership untouched;
/// * the update flow ([`reconcile_owner_machine`]) is ownership aware: it
///   renames the owner's machine in place, takes over a machine held by
///   someone else, or creates one.
///
/// Machine numbers carry no unique index, so every find-or-create is
/// serialised per number with an in-process lock. Separate server processes
/// can still race each other.
///
/// [`resolve_for_new_report`]: MachineReconciler::resolve_for_new_report
/// [`reconcile_owner_machine`]: MachineReconciler::reconcile_owner_machine
pub struct MachineReconciler {
    machines: Arc<dyn MachineRepository>,
    locks: DashMap<String, Arc<Mutex<()>>>,
}

struct NumberGuard<'a> {
    locks: &'a DashMap<String, Arc<Mutex<()>>>,
    key: String,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for NumberGuard<'_> {
    fn drop(&mut self) {
        drop(self.guard.take());
        // Only the map still references the mutex once nobody is waiting
        self.locks
            .remove_if(&self.key, |_, mutex| Arc::strong_count(mutex) == 1);
    }
}

impl MachineReconciler {
    pub fn new(machines: Arc<dyn MachineRepository>) -> Self {
        Self {
            machines,
            locks: DashMap::new(),
        }
    }

    async fn lock_number(&self, number: &MachineNumber) -> NumberGuard<'_> {
        let key = number.as_str().to_string();
        let mutex = self.locks.entry(key.clone()).or_default().clone();
        let guard = mutex.lock_owned().await;
        NumberGuard {
            locks: &self.locks,
            key,
            guard: Some(guard),
        }
    }

    /// Machine id to attach to a newly created report.
    ///
    /// An existing machine with the same number is reused whoever owns it;
    /// otherwise a machine is created for `owner`. No number, or a blank
    /// one, means no machine.
    pub async fn resolve_for_new_report(
        &self,
        owner: Option<Owner>,
        change: &MachineChange,
    ) -> Result<Option<i32>, DomainError> {
        let Some(number) = change.number() else {
            return Ok(None);
        };

        let _guard = self.lock_number(number).await;

        if let Some(existing) = self.machines.find_by_number(number).await? {
            debug!(machine_id = existing.id, number = %number, "Reusing existing machine");
            return Ok(Some(existing.id));
        }

        let created = self.machines.create(number, owner).await?;
        info!(
            machine_id = created.id,
            number = %number,
            owner = ?owner,
            "Machine created for new report"
        );
        Ok(Some(created.id))
    }

    /// Applies a submitted machine number to `owner`.
    ///
    /// * `Assign`: rename the owner's machine in place, else take over the
    ///   machine with that number, else create one.
    /// * `Clear`: every machine held by the owner loses its owner. Rows stay.
    /// * `Unchanged`: nothing.
    pub async fn reconcile_owner_machine(
        &self,
        owner: Owner,
        change: &MachineChange,
    ) -> Result<MachineOutcome, DomainError> {
        let number = match change {
            MachineChange::Unchanged => return Ok(MachineOutcome::Unchanged),
            MachineChange::Clear => {
                let unlinked = self.machines.unlink_owner(owner).await?;
                info!(owner = %owner, unlinked, "Machines unlinked from owner");
                return Ok(MachineOutcome::Detached);
            }
            MachineChange::Assign(number) => number,
        };

        let _guard = self.lock_number(number).await;

        if let Some(current) = self.machines.find_by_owner(owner).await? {
            if current.nro_maquina == number.as_str() {
                return Ok(MachineOutcome::Attached(current.id));
            }
            let renamed = self.machines.update_number(current.id, number).await?;
            info!(
                machine_id = renamed.id,
                owner = %owner,
                from = %current.nro_maquina,
                to = %number,
                "Machine number updated in place"
            );
            return Ok(MachineOutcome::Attached(renamed.id));
        }

        if let Some(existing) = self.machines.find_by_number(number).await? {
            let previous = existing.owner;
            let taken = self.machines.set_owner(existing.id, Some(owner)).await?;
            info!(
                machine_id = taken.id,
                owner = %owner,
                previous_owner = ?previous,
                "Machine reassigned to new owner"
            );
            return Ok(MachineOutcome::Attached(taken.id));
        }

        let created = self.machines.create(number, Some(owner)).await?;
        info!(machine_id = created.id, owner = %owner, number = %number, "Machine created for owner");
        Ok(MachineOutcome::Attached(created.id))
    }

    /// The machine currently held by `owner`.
    pub async fn machine_of(&self, owner: Owner) -> Result<Option<Machine>, DomainError> {
        self.machines.find_by_owner(owner).await
    }
}
