//! Rotation repository implementations.

pub mod memory_rotation_repository;
pub mod pg_rotation_repository;

pub use memory_rotation_repository::MemoryRotationRepository;
pub use pg_rotation_repository::PgRotationRepository;
