mod entity;
mod repository;

pub use entity::{NewWorker, Worker, WorkerPatch};
pub use repository::WorkerRepository;
