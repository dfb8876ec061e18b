mod entity;
mod repository;

pub use entity::{NewUser, Role, User, UserPatch};
pub use repository::UserRepository;
