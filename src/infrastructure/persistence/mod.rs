mod memory_alias_repository;
mod pg_alias_repository;

pub use memory_alias_repository::MemoryAliasRepository;
pub use pg_alias_repository::PgAliasRepository;
