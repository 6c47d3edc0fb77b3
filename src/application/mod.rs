//! Application layer: service orchestration on top of the domain ports.

pub mod services;
