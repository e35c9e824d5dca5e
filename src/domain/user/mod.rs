//! User domain: entity, validation and repository trait

pub mod entity;
pub mod repository;
pub mod validation;

pub use entity::{Role, User, UserId};
pub use repository::UserRepository;
pub use validation::UserValidationError;
