//! Domain layer - Pure business logic with no external dependencies
//!
//! This crate contains:
//! - Entities (User, Worker, Machine, Report, ReportCase, Specialization)
//! - Value Objects (Owner, MachineNumber, MachineChange, SpecializationName)
//! - Statistics math (date windows, per-status shares)
//! - Repository interfaces (traits)
//!
//! Principles:
//! - No dependencies on infrastructure
//! - Ownership is always an `Owner`, never a pair of loose ids
//! - Testable in isolation

pub mod error;
pub mod machine;
pub mod owner;
pub mod pagination;
pub mod report;
pub mod report_case;
pub mod specialization;
pub mod statistics;
pub mod user;
pub mod worker;

// Re-export commonly used types
pub use error::DomainError;
pub use machine::{Machine, MachineChange, MachineNumber};
pub use owner::{IdInput, Owner, coerce_id, lenient_id};
pub use pagination::{Page, PageRequest};
