//! In-memory repositories shared by the application tests.

#![allow(dead_code)]

use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use domain::machine::{Machine, MachineNumber, MachineRepository};
use domain::pagination::{Page, PageRequest};
use domain::report::{NewReport, Report, ReportFilter, ReportPatch, ReportRepository};
use domain::specialization::{Specialization, SpecializationName, SpecializationRepository};
use domain::statistics::{DateWindow, StatusCount};
use domain::user::{NewUser, Role, User, UserPatch, UserRepository};
use domain::worker::{NewWorker, Worker, WorkerPatch, WorkerRepository};
use domain::{DomainError, Owner};
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Mutex;

fn paginate<T: Clone>(items: Vec<T>, page: PageRequest) -> Page<T> {
    let total = items.len() as u64;
    let data = items
        .into_iter()
        .skip(page.offset() as usize)
        .take(page.limit as usize)
        .collect();
    Page::new(data, total, page)
}

#[derive(Default)]
pub struct FakeMachines {
    rows: Mutex<Vec<Machine>>,
}

impl FakeMachines {
    pub fn all(&self) -> Vec<Machine> {
        self.rows.lock().unwrap().clone()
    }

    pub fn seed(&self, number: &str, owner: Option<Owner>) -> Machine {
        let mut rows = self.rows.lock().unwrap();
        let machine = Machine {
            id: rows.len() as i32 + 1,
            nro_maquina: number.to_string(),
            owner,
        };
        rows.push(machine.clone());
        machine
    }

    fn modify(
        &self,
        id: i32,
        f: impl FnOnce(&mut Machine),
    ) -> Result<Machine, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let machine = rows
            .iter_mut()
            .find(|m| m.id == id)
            .ok_or_else(|| DomainError::not_found("Machine", id))?;
        f(machine);
        Ok(machine.clone())
    }
}

#[async_trait]
impl MachineRepository for FakeMachines {
    async fn create(
        &self,
        number: &MachineNumber,
        owner: Option<Owner>,
    ) -> Result<Machine, DomainError> {
        // Yield so concurrent callers interleave between lookup and insert
        tokio::task::yield_now().await;
        Ok(self.seed(number.as_str(), owner))
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Machine>, DomainError> {
        Ok(self.all().into_iter().find(|m| m.id == id))
    }

    async fn find_by_number(
        &self,
        number: &MachineNumber,
    ) -> Result<Option<Machine>, DomainError> {
        tokio::task::yield_now().await;
        Ok(self
            .all()
            .into_iter()
            .find(|m| m.nro_maquina == number.as_str()))
    }

    async fn find_by_owner(&self, owner: Owner) -> Result<Option<Machine>, DomainError> {
        Ok(self.all().into_iter().find(|m| m.is_owned_by(owner)))
    }

    async fn list(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<Page<Machine>, DomainError> {
        let items = self
            .all()
            .into_iter()
            .filter(|m| search.is_none_or(|s| m.nro_maquina.contains(s)))
            .collect();
        Ok(paginate(items, page))
    }

    async fn update_number(
        &self,
        id: i32,
        number: &MachineNumber,
    ) -> Result<Machine, DomainError> {
        self.modify(id, |m| m.nro_maquina = number.as_str().to_string())
    }

    async fn set_owner(&self, id: i32, owner: Option<Owner>) -> Result<Machine, DomainError> {
        self.modify(id, |m| m.owner = owner)
    }

    async fn unlink_owner(&self, owner: Owner) -> Result<u64, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let mut count = 0;
        for m in rows.iter_mut().filter(|m| m.owner == Some(owner)) {
            m.owner = None;
            count += 1;
        }
        Ok(count)
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|m| m.id != id);
        if rows.len() == before {
            return Err(DomainError::not_found("Machine", id));
        }
        Ok(())
    }

    async fn count_by_number(&self, number: &MachineNumber) -> Result<u64, DomainError> {
        Ok(self
            .all()
            .iter()
            .filter(|m| m.nro_maquina == number.as_str())
            .count() as u64)
    }

    async fn count_by_owner(&self, owner: Owner) -> Result<u64, DomainError> {
        Ok(self.all().iter().filter(|m| m.is_owned_by(owner)).count() as u64)
    }
}

/// Reports plus a per-report case counter, enough to observe deletions.
#[derive(Default)]
pub struct FakeReports {
    rows: Mutex<Vec<Report>>,
    cases: Mutex<BTreeMap<i32, u64>>,
}

impl FakeReports {
    pub fn all(&self) -> Vec<Report> {
        self.rows.lock().unwrap().clone()
    }

    pub fn add_cases(&self, id_report: i32, count: u64) {
        *self.cases.lock().unwrap().entry(id_report).or_default() += count;
    }

    pub fn case_count(&self) -> u64 {
        self.cases.lock().unwrap().values().sum()
    }

    pub fn seed(&self, owner: Option<Owner>, estado: &str, date: NaiveDate) -> Report {
        let mut rows = self.rows.lock().unwrap();
        let report = Report {
            id: rows.len() as i32 + 1,
            id_machine: None,
            owner,
            title: "Seeded".into(),
            area: None,
            estado: estado.into(),
            description: None,
            natural_user: None,
            natural_password: None,
            windows_user: None,
            windows_password: None,
            date,
        };
        rows.push(report.clone());
        report
    }
}

#[async_trait]
impl ReportRepository for FakeReports {
    async fn create(&self, report: NewReport) -> Result<Report, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let stored = Report {
            id: rows.len() as i32 + 1,
            id_machine: report.id_machine,
            owner: Some(report.owner),
            title: report.title,
            area: report.area,
            estado: report.estado,
            description: report.description,
            natural_user: report.natural_user,
            natural_password: report.natural_password,
            windows_user: report.windows_user,
            windows_password: report.windows_password,
            date: report.date,
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Report>, DomainError> {
        Ok(self.all().into_iter().find(|r| r.id == id))
    }

    async fn list(
        &self,
        page: PageRequest,
        filter: &ReportFilter,
    ) -> Result<Page<Report>, DomainError> {
        let items = self
            .all()
            .into_iter()
            .filter(|r| filter.owner.is_none_or(|o| r.owner == Some(o)))
            .filter(|r| filter.estado.as_ref().is_none_or(|e| &r.estado == e))
            .collect();
        Ok(paginate(items, page))
    }

    async fn update(&self, id: i32, patch: ReportPatch) -> Result<Report, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let report = rows
            .iter_mut()
            .find(|r| r.id == id)
            .ok_or_else(|| DomainError::not_found("Report", id))?;
        if let Some(owner) = patch.owner {
            report.owner = Some(owner);
        }
        if let Some(id_machine) = patch.id_machine {
            report.id_machine = id_machine;
        }
        if let Some(title) = patch.title {
            report.title = title;
        }
        if let Some(estado) = patch.estado {
            report.estado = estado;
        }
        if let Some(area) = patch.area {
            report.area = Some(area);
        }
        if let Some(date) = patch.date {
            report.date = date;
        }
        Ok(report.clone())
    }

    async fn delete_with_cases(&self, id: i32) -> Result<u64, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if !rows.iter().any(|r| r.id == id) {
            return Err(DomainError::not_found("Report", id));
        }
        rows.retain(|r| r.id != id);
        Ok(self.cases.lock().unwrap().remove(&id).unwrap_or(0))
    }

    async fn count_by_status(&self, window: &DateWindow) -> Result<Vec<StatusCount>, DomainError> {
        let mut groups: BTreeMap<String, u64> = BTreeMap::new();
        for r in self.all().into_iter().filter(|r| window.contains(r.date)) {
            *groups.entry(r.estado).or_default() += 1;
        }
        Ok(groups
            .into_iter()
            .map(|(estado, count)| StatusCount { estado, count })
            .collect())
    }
}

#[derive(Default)]
pub struct FakeUsers {
    rows: Mutex<Vec<User>>,
}

impl FakeUsers {
    pub fn seed(&self, email: &str) -> User {
        let mut rows = self.rows.lock().unwrap();
        let user = User {
            id: rows.len() as i32 + 1,
            name: "Ana".into(),
            lastname: "Rojas".into(),
            email: email.into(),
            phone: None,
            cedula: format!("V-{}", rows.len() + 1),
            role: Role::Technician,
            password_hash: String::new(),
            created_at: Utc::now(),
        };
        rows.push(user.clone());
        user
    }
}

#[async_trait]
impl UserRepository for FakeUsers {
    async fn create(&self, user: NewUser) -> Result<User, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|u| u.email == user.email) {
            return Err(DomainError::Conflict(format!("email {}", user.email)));
        }
        let stored = User {
            id: rows.len() as i32 + 1,
            name: user.name,
            lastname: user.lastname,
            email: user.email,
            phone: user.phone,
            cedula: user.cedula,
            role: user.role,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<User>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|u| u.id == id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, DomainError> {
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn list(
        &self,
        page: PageRequest,
        _search: Option<&str>,
    ) -> Result<Page<User>, DomainError> {
        Ok(paginate(self.rows.lock().unwrap().clone(), page))
    }

    async fn update(&self, id: i32, patch: UserPatch) -> Result<User, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let user = rows
            .iter_mut()
            .find(|u| u.id == id)
            .ok_or_else(|| DomainError::not_found("User", id))?;
        if let Some(name) = patch.name {
            user.name = name;
        }
        if let Some(role) = patch.role {
            user.role = role;
        }
        if let Some(hash) = patch.password_hash {
            user.password_hash = hash;
        }
        Ok(user.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|u| u.id != id);
        if rows.len() == before {
            return Err(DomainError::not_found("User", id));
        }
        Ok(())
    }
}

#[derive(Default)]
pub struct FakeSpecializations {
    rows: Mutex<Vec<Specialization>>,
    links: Mutex<BTreeSet<(i32, i32)>>,
}

#[async_trait]
impl SpecializationRepository for FakeSpecializations {
    async fn find_or_create(
        &self,
        name: &SpecializationName,
    ) -> Result<Specialization, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if let Some(existing) = rows.iter().find(|s| s.name == name.as_str()) {
            return Ok(existing.clone());
        }
        let created = Specialization {
            id: rows.len() as i32 + 1,
            name: name.as_str().to_string(),
        };
        rows.push(created.clone());
        Ok(created)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Specialization>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|s| s.id == id).cloned())
    }

    async fn list(&self) -> Result<Vec<Specialization>, DomainError> {
        Ok(self.rows.lock().unwrap().clone())
    }

    async fn rename(
        &self,
        id: i32,
        name: &SpecializationName,
    ) -> Result<Specialization, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let spec = rows
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| DomainError::not_found("Specialization", id))?;
        spec.name = name.as_str().to_string();
        Ok(spec.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        self.rows.lock().unwrap().retain(|s| s.id != id);
        Ok(())
    }

    async fn assign_to_user(
        &self,
        id_user: i32,
        id_specialization: i32,
    ) -> Result<(), DomainError> {
        self.links
            .lock()
            .unwrap()
            .insert((id_user, id_specialization));
        Ok(())
    }

    async fn unassign_from_user(
        &self,
        id_user: i32,
        id_specialization: i32,
    ) -> Result<(), DomainError> {
        if !self
            .links
            .lock()
            .unwrap()
            .remove(&(id_user, id_specialization))
        {
            return Err(DomainError::NotFound("link".into()));
        }
        Ok(())
    }

    async fn list_for_user(&self, id_user: i32) -> Result<Vec<Specialization>, DomainError> {
        let links = self.links.lock().unwrap().clone();
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .filter(|s| links.contains(&(id_user, s.id)))
            .cloned()
            .collect())
    }
}

/// Every call fails as a dropped connection would.
pub struct BrokenMachines;

fn broken<T>() -> Result<T, DomainError> {
    Err(DomainError::Database("connection reset".into()))
}

#[async_trait]
impl MachineRepository for BrokenMachines {
    async fn create(&self, _: &MachineNumber, _: Option<Owner>) -> Result<Machine, DomainError> {
        panic!("create must not run after a failed lookup")
    }
    async fn find_by_id(&self, _: i32) -> Result<Option<Machine>, DomainError> {
        broken()
    }
    async fn find_by_number(&self, _: &MachineNumber) -> Result<Option<Machine>, DomainError> {
        broken()
    }
    async fn find_by_owner(&self, _: Owner) -> Result<Option<Machine>, DomainError> {
        broken()
    }
    async fn list(&self, _: PageRequest, _: Option<&str>) -> Result<Page<Machine>, DomainError> {
        broken()
    }
    async fn update_number(&self, _: i32, _: &MachineNumber) -> Result<Machine, DomainError> {
        broken()
    }
    async fn set_owner(&self, _: i32, _: Option<Owner>) -> Result<Machine, DomainError> {
        broken()
    }
    async fn unlink_owner(&self, _: Owner) -> Result<u64, DomainError> {
        broken()
    }
    async fn delete(&self, _: i32) -> Result<(), DomainError> {
        broken()
    }
    async fn count_by_number(&self, _: &MachineNumber) -> Result<u64, DomainError> {
        broken()
    }
    async fn count_by_owner(&self, _: Owner) -> Result<u64, DomainError> {
        broken()
    }
}

#[derive(Default)]
pub struct FakeWorkers {
    rows: Mutex<Vec<Worker>>,
}

impl FakeWorkers {
    pub fn seed(&self, ficha: &str) -> Worker {
        let mut rows = self.rows.lock().unwrap();
        let worker = Worker {
            id: rows.len() as i32 + 1,
            ficha: ficha.into(),
            name: "Luis".into(),
            lastname: "Pérez".into(),
            department: None,
            division: None,
            birth_day: None,
            birth_month: None,
            created_at: Utc::now(),
        };
        rows.push(worker.clone());
        worker
    }

    pub fn all(&self) -> Vec<Worker> {
        self.rows.lock().unwrap().clone()
    }
}

#[async_trait]
impl WorkerRepository for FakeWorkers {
    async fn create(&self, worker: NewWorker) -> Result<Worker, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        if rows.iter().any(|w| w.ficha == worker.ficha) {
            return Err(DomainError::Conflict(format!("ficha {}", worker.ficha)));
        }
        let stored = Worker {
            id: rows.iter().map(|w| w.id).max().unwrap_or(0) + 1,
            ficha: worker.ficha,
            name: worker.name,
            lastname: worker.lastname,
            department: worker.department,
            division: worker.division,
            birth_day: worker.birth_day,
            birth_month: worker.birth_month,
            created_at: Utc::now(),
        };
        rows.push(stored.clone());
        Ok(stored)
    }

    async fn find_by_id(&self, id: i32) -> Result<Option<Worker>, DomainError> {
        Ok(self.rows.lock().unwrap().iter().find(|w| w.id == id).cloned())
    }

    async fn find_by_ficha(&self, ficha: &str) -> Result<Option<Worker>, DomainError> {
        let ficha = ficha.trim();
        Ok(self
            .rows
            .lock()
            .unwrap()
            .iter()
            .find(|w| w.ficha == ficha)
            .cloned())
    }

    async fn list(
        &self,
        page: PageRequest,
        _search: Option<&str>,
    ) -> Result<Page<Worker>, DomainError> {
        Ok(paginate(self.rows.lock().unwrap().clone(), page))
    }

    async fn update(&self, id: i32, patch: WorkerPatch) -> Result<Worker, DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let worker = rows
            .iter_mut()
            .find(|w| w.id == id)
            .ok_or_else(|| DomainError::not_found("Worker", id))?;
        if let Some(ficha) = patch.ficha {
            worker.ficha = ficha;
        }
        if let Some(name) = patch.name {
            worker.name = name;
        }
        if let Some(department) = patch.department {
            worker.department = Some(department);
        }
        Ok(worker.clone())
    }

    async fn delete(&self, id: i32) -> Result<(), DomainError> {
        let mut rows = self.rows.lock().unwrap();
        let before = rows.len();
        rows.retain(|w| w.id != id);
        if rows.len() == before {
            return Err(DomainError::not_found("Worker", id));
        }
        Ok(())
    }
}
