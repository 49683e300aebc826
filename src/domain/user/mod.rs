//! User aggregate

pub mod model;
pub mod repository;

mod dto;

pub use dto::NewUser;
pub use model::{level_for_points, User, UserRole};
pub use repository::UserRepository;
