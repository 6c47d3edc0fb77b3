//! Repository trait definitions for the domain layer.
//!
//! The rotation core speaks to persistent state exclusively through
//! [`RotationRepository`]. Concrete implementations live in
//! `crate::infrastructure::persistence`; a mock is auto-generated via
//! `mockall` for unit tests.

pub mod rotation_repository;

pub use rotation_repository::RotationRepository;

#[cfg(test)]
pub use rotation_repository::MockRotationRepository;
