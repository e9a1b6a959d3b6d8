// File: message.rs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::session::Role;

/// One message in an application thread. Threads are append-only and the
/// server returns them oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub id: Uuid,
    pub sender_email: String,
    pub sender_role: Role,
    pub receiver_email: String,
    pub receiver_role: Role,
    pub content: String,
    pub sent_at: DateTime<Utc>,
    pub application_id: Uuid,
}

/// Body of the send endpoint.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub receiver_email: String,
    pub receiver_role: Role,
    pub content: String,
    pub application_id: Uuid,
}
