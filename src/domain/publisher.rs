//! Event publisher port.

use crate::domain::events::EventMessage;
use crate::error::AppError;
use async_trait::async_trait;

/// Send-only port to the analytics event stream.
///
/// Publication failures are fatal for the enclosing operation: the caller is
/// told the action did not fully succeed even though persistent state may
/// already have advanced. Delivery is at-least-once at best; downstream
/// consumers deduplicate on (banner, slot, group, type, timestamp).
///
/// # Implementations
///
/// - [`crate::infrastructure::broker::AmqpPublisher`] - AMQP 0.9.1 production backend
/// - [`crate::infrastructure::broker::RecordingPublisher`] - in-process, for tests
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Publishes one event.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Broker`] when the message could not be handed to
    /// the broker.
    async fn publish(&self, message: &EventMessage) -> Result<(), AppError>;
}
