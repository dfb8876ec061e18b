use crate::Owner;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Status given to reports submitted without one.
pub const DEFAULT_ESTADO: &str = "en espera";

/// An incident record.
///
/// `estado` is free text ("resuelto", "en revision", "en espera", ...) and is
/// stored exactly as submitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i32,
    pub id_machine: Option<i32>,
    pub owner: Option<Owner>,
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

#[derive(Debug, Clone, PartialEq)]
pub struct NewReport {
    pub owner: Owner,
    pub id_machine: Option<i32>,
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

/// Partial update. `id_machine: Some(None)` detaches the machine.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportPatch {
    pub owner: Option<Owner>,
    pub id_machine: Option<Option<i32>>,
    pub title: Option<String>,
    pub area: Option<String>,
    pub estado: Option<String>,
    pub description: Option<String>,
    pub natural_user: Option<String>,
    pub natural_password: Option<String>,
    pub windows_user: Option<String>,
    pub windows_password: Option<String>,
    pub date: Option<NaiveDate>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportFilter {
    pub owner: Option<Owner>,
    pub estado: Option<String>,
    pub id_machine: Option<i32>,
}
