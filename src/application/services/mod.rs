//! Application services.

pub mod rotation_service;

pub use rotation_service::RotationService;
