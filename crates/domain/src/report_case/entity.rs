use chrono::{DateTime, NaiveTime, Utc};
use serde::{Deserialize, Serialize};

/// A technician's diagnosis/resolution attached to a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportCase {
    pub id: i32,
    pub id_report: i32,
    pub id_user: i32,
    pub diagnosis: Option<String>,
    pub resolution: Option<String>,
    pub hour: NaiveTime,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct NewReportCase {
    pub id_report: i32,
    pub id_user: i32,
    pub diagnosis: Option<String>,
    pub resolution: Option<String>,
    pub hour: NaiveTime,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ReportCasePatch {
    pub diagnosis: Option<String>,
    pub resolution: Option<String>,
    pub hour: Option<NaiveTime>,
}
