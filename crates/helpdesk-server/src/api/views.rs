//! JSON shapes that spell ownership as the `id_user`/`id_workers` pair
//! clients expect.

use application::user::UserDetails;
use application::worker::WorkerDetails;
use chrono::NaiveDate;
use domain::specialization::Specialization;
use domain::user::User;
use domain::worker::Worker;
use domain::{Machine, Owner};
use domain::report::Report;
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct MachineView {
    pub id: i32,
    pub nro_maquina: String,
    pub id_user: Option<i32>,
    pub id_workers: Option<i32>,
}

impl From<Machine> for MachineView {
    fn from(machine: Machine) -> Self {
        let (id_user, id_workers) = Owner::columns(machine.owner);
        Self {
            id: machine.id,
            nro_maquina: machine.nro_maquina,
            id_user,
            id_workers,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ReportView {
    pub id: i32,
    pub id_machine: Option<i32>,
    pub id_user: Option<i32>,
    pub id_workers: Option<i32>,
    pub title: String,
    pub area: Option<String>,
    pub estado: String,
    pub description: Option<String>,
    pub natural_user: Option<String>,
    pub natural_password: Option<String>,
    pub windows_user: Option<String>,
    pub windows_password: Option<String>,
    pub date: NaiveDate,
}

impl From<Report> for ReportView {
    fn from(report: Report) -> Self {
        let (id_user, id_workers) = Owner::columns(report.owner);
        Self {
            id: report.id,
            id_machine: report.id_machine,
            id_user,
            id_workers,
            title: report.title,
            area: report.area,
            estado: report.estado,
            description: report.description,
            natural_user: report.natural_user,
            natural_password: report.natural_password,
            windows_user: report.windows_user,
            windows_password: report.windows_password,
            date: report.date,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UserView {
    #[serde(flatten)]
    pub user: User,
    pub specializations: Vec<Specialization>,
    pub machine: Option<MachineView>,
}

impl From<UserDetails> for UserView {
    fn from(details: UserDetails) -> Self {
        Self {
            user: details.user,
            specializations: details.specializations,
            machine: details.machine.map(MachineView::from),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct WorkerView {
    #[serde(flatten)]
    pub worker: Worker,
    pub machine: Option<MachineView>,
}

impl From<WorkerDetails> for WorkerView {
    fn from(details: WorkerDetails) -> Self {
        Self {
            worker: details.worker,
            machine: details.machine.map(MachineView::from),
        }
    }
}
