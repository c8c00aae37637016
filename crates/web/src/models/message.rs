//! Consultation inbox types.

use chrono::{DateTime, Utc};
use serde::Serialize;

use edureach_core::{MessageId, MessageStatus};

/// A consultation request as stored.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
pub struct UserMessage {
    pub id: MessageId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
    pub status: MessageStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A validated consultation request ready to store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewMessage {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub message: String,
}
