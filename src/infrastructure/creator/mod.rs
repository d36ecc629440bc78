//! Creator store implementations

mod in_memory;
mod postgres_repository;

pub use in_memory::InMemoryCreatorRepository;
pub use postgres_repository::PostgresCreatorRepository;
