mod service;

pub use service::{CreateReport, ReportService, UpdateReport};
