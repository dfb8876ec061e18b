use crate::Owner;
use serde::{Deserialize, Serialize};

/// A physical asset identified by its machine number.
///
/// A machine has at most one owner. Numbers are not unique in storage; the
/// reconciliation service treats them as unique per owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub id: i32,
    pub nro_maquina: String,
    pub owner: Option<Owner>,
}

impl Machine {
    pub fn is_owned_by(&self, owner: Owner) -> bool {
        self.owner == Some(owner)
    }
}
