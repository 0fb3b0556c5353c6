//! SQLite storage backend for the studio's inquiry repository.

mod factory;
mod repository;

pub use factory::SqliteRepositoryFactory;
pub use repository::SqliteRepository;
