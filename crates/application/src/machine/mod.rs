mod reconciler;
mod service;

pub use reconciler::{MachineOutcome, MachineReconciler};
pub use service::{CreateMachine, MachineService, UpdateMachine};
