//! Infrastructure layer: concrete backends for the domain ports.
//!
//! - [`persistence`] - PostgreSQL and in-memory repositories
//! - [`broker`] - AMQP and in-memory event publishers

pub mod broker;
pub mod persistence;
