pub mod machines;
pub mod report_cases;
pub mod reports;
pub mod specializations;
pub mod user_specializations;
pub mod users;
pub mod workers;
