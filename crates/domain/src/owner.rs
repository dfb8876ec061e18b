use serde::{Deserialize, Deserializer, Serialize};

/// Who a Machine or Report belongs to.
///
/// Storage keeps two nullable columns (`id_user`, `id_workers`); this type is
/// the only way the rest of the code talks about ownership, so one side is
/// always NULL when a row is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", content = "id", rename_all = "snake_case")]
pub enum Owner {
    User(i32),
    Worker(i32),
}

impl Owner {
    /// Builds an owner from the two storage columns.
    ///
    /// A worker id wins when both are set, matching how submissions are
    /// attributed (a worker's report is never re-owned by a technician).
    pub fn from_columns(id_user: Option<i32>, id_workers: Option<i32>) -> Option<Self> {
        match (coerce_id(id_workers.map(i64::from)), coerce_id(id_user.map(i64::from))) {
            (Some(worker), _) => Some(Owner::Worker(worker)),
            (None, Some(user)) => Some(Owner::User(user)),
            (None, None) => None,
        }
    }

    /// `(id_user, id_workers)` as stored.
    pub fn columns(owner: Option<Self>) -> (Option<i32>, Option<i32>) {
        match owner {
            Some(Owner::User(id)) => (Some(id), None),
            Some(Owner::Worker(id)) => (None, Some(id)),
            None => (None, None),
        }
    }

    pub fn user_id(&self) -> Option<i32> {
        match self {
            Owner::User(id) => Some(*id),
            Owner::Worker(_) => None,
        }
    }

    pub fn worker_id(&self) -> Option<i32> {
        match self {
            Owner::Worker(id) => Some(*id),
            Owner::User(_) => None,
        }
    }
}

impl std::fmt::Display for Owner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Owner::User(id) => write!(f, "user:{}", id),
            Owner::Worker(id) => write!(f, "worker:{}", id),
        }
    }
}

/// Null-coercion for foreign keys coming from clients: `0` and anything that
/// does not fit a positive row id means "no id".
pub fn coerce_id(raw: Option<i64>) -> Option<i32> {
    raw.filter(|id| *id > 0).and_then(|id| i32::try_from(id).ok())
}

/// A foreign key as clients send it: a number, a numeric string, `""` or `"0"`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum IdInput {
    Number(i64),
    Text(String),
}

impl IdInput {
    pub fn into_id(self) -> Option<i32> {
        match self {
            IdInput::Number(n) => coerce_id(Some(n)),
            IdInput::Text(s) => coerce_id(s.trim().parse::<i64>().ok()),
        }
    }
}

/// `deserialize_with` helper for optional foreign keys.
///
/// Use together with `#[serde(default)]` so an absent field is also `None`.
pub fn lenient_id<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<IdInput>::deserialize(deserializer)?;
    Ok(raw.and_then(IdInput::into_id))
}
