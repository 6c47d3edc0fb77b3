//! Show/click events published to the analytics stream.

use chrono::{DateTime, Utc};
use serde::Serialize;

/// Routing key every rotation event is published under.
pub const ROUTING_KEY: &str = "amqp.rotation.service.key";

/// Application id stamped on every published message.
pub const APP_ID: &str = "banner-rotation";

/// What happened to the banner.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    Show,
    Click,
}

impl EventKind {
    pub fn as_str(self) -> &'static str {
        match self {
            EventKind::Show => "show",
            EventKind::Click => "click",
        }
    }
}

/// One rotation event.
///
/// The JSON body carries only the three ids; `kind` and `timestamp` travel
/// as transport metadata (AMQP message type and timestamp properties), not
/// in the payload.
#[derive(Debug, Clone, Serialize)]
pub struct EventMessage {
    #[serde(rename = "bannerId")]
    pub banner_id: String,
    #[serde(rename = "slotId")]
    pub slot_id: String,
    #[serde(rename = "groupId")]
    pub group_id: String,
    #[serde(skip)]
    pub kind: EventKind,
    #[serde(skip)]
    pub timestamp: DateTime<Utc>,
}

impl EventMessage {
    pub fn show(slot_id: &str, group_id: &str, banner_id: &str) -> Self {
        Self::new(EventKind::Show, slot_id, group_id, banner_id)
    }

    pub fn click(slot_id: &str, group_id: &str, banner_id: &str) -> Self {
        Self::new(EventKind::Click, slot_id, group_id, banner_id)
    }

    fn new(kind: EventKind, slot_id: &str, group_id: &str, banner_id: &str) -> Self {
        Self {
            banner_id: banner_id.to_string(),
            slot_id: slot_id.to_string(),
            group_id: group_id.to_string(),
            kind,
            timestamp: Utc::now(),
        }
    }
}
