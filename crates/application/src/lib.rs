//! Application layer - Use cases and business workflows

pub mod machine;
pub mod report;
pub mod report_case;
pub mod specialization;
pub mod statistics;
pub mod user;
pub mod worker;

pub use machine::{MachineOutcome, MachineReconciler, MachineService};
pub use report::ReportService;
pub use report_case::ReportCaseService;
pub use specialization::SpecializationService;
pub use statistics::StatisticsService;
pub use user::UserService;
pub use worker::WorkerService;
