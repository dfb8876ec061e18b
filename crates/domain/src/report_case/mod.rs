mod entity;
mod repository;

pub use entity::{NewReportCase, ReportCase, ReportCasePatch};
pub use repository::ReportCaseRepository;
