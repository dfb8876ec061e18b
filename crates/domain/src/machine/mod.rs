mod entity;
mod number;
mod repository;

pub use entity::Machine;
pub use number::{MachineChange, MachineNumber};
pub use repository::MachineRepository;
