mod entity;
mod repository;

pub use entity::{DEFAULT_ESTADO, NewReport, Report, ReportFilter, ReportPatch};
pub use repository::ReportRepository;
