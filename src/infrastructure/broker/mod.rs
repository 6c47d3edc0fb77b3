//! Event publisher implementations.

pub mod amqp_publisher;
pub mod recording_publisher;

pub use amqp_publisher::AmqpPublisher;
pub use recording_publisher::RecordingPublisher;
