use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Staff member identified by an externally issued badge number (`ficha`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Worker {
    pub id: i32,
    pub ficha: String,
    pub name: String,
    pub lastname: String,
    pub department: Option<String>,
    pub division: Option<String>,
    pub birth_day: Option<i32>,
    pub birth_month: Option<i32>,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewWorker {
    pub ficha: String,
    pub name: String,
    pub lastname: String,
    pub department: Option<String>,
    pub division: Option<String>,
    pub birth_day: Option<i32>,
    pub birth_month: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct WorkerPatch {
    pub ficha: Option<String>,
    pub name: Option<String>,
    pub lastname: Option<String>,
    pub department: Option<String>,
    pub division: Option<String>,
    pub birth_day: Option<i32>,
    pub birth_month: Option<i32>,
}
