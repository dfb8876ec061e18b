mod entity;
mod repository;

pub use entity::{Specialization, SpecializationName};
pub use repository::SpecializationRepository;
