//! Publisher that records events in memory.
//!
//! Used for tests and development without a broker. Can be armed to fail the
//! next publish, which exercises the counter-advanced-but-no-event path.

use async_trait::async_trait;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::events::EventMessage;
use crate::domain::publisher::EventPublisher;
use crate::error::AppError;

#[derive(Default)]
pub struct RecordingPublisher {
    messages: Mutex<Vec<EventMessage>>,
    fail_next: AtomicBool,
}

impl RecordingPublisher {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything published so far, in order.
    pub fn messages(&self) -> Vec<EventMessage> {
        self.messages.lock().unwrap().clone()
    }

    pub fn message_count(&self) -> usize {
        self.messages.lock().unwrap().len()
    }

    /// Makes the next `publish` call fail once.
    pub fn fail_next(&self) {
        self.fail_next.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl EventPublisher for RecordingPublisher {
    async fn publish(&self, message: &EventMessage) -> Result<(), AppError> {
        if self.fail_next.swap(false, Ordering::SeqCst) {
            return Err(AppError::broker("injected publish failure"));
        }
        self.messages.lock().unwrap().push(message.clone());
        Ok(())
    }
}
