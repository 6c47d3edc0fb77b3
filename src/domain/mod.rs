//! Domain layer: entities, ports and the event model.
//!
//! The rotation core depends on two ports — [`repositories::RotationRepository`]
//! for persisted state and [`publisher::EventPublisher`] for the analytics
//! stream. Both are trait objects so that storage and broker backends can be
//! swapped (Postgres/AMQP in production, in-process fakes in tests).

pub mod entities;
pub mod events;
pub mod publisher;
pub mod repositories;
