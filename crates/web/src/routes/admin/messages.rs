//! Consultation inbox.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, Query, State},
    response::{IntoResponse, Redirect},
};
use serde::Deserialize;
use tracing::instrument;

use edureach_core::{MessageId, MessageStatus};

use crate::db::MessageRepository;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::UserMessage;
use crate::routes::admin::AdminNav;
use crate::routes::{NoticeQuery, after_mutation};
use crate::state::AppState;

const MESSAGES_PATH: &str = "/admin/messages";

/// Status change form data.
#[derive(Debug, Deserialize)]
pub struct StatusForm {
    pub status: MessageStatus,
}

/// Inbox template.
#[derive(Template, WebTemplate)]
#[template(path = "admin/messages.html")]
pub struct MessagesTemplate {
    pub nav: AdminNav,
    pub messages: Vec<UserMessage>,
    pub notice: Option<String>,
    pub error: Option<String>,
}

/// List messages, newest first.
#[instrument(skip(state, admin, query))]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(admin): RequireAdmin,
    Query(query): Query<NoticeQuery>,
) -> Result<impl IntoResponse> {
    let messages = MessageRepository::new(state.pool()).list().await?;
    Ok(MessagesTemplate {
        nav: AdminNav::new(&admin, MESSAGES_PATH),
        messages,
        notice: query.notice,
        error: query.error,
    })
}

/// Mark a message read or unread.
#[instrument(skip(state))]
pub async fn set_status(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<MessageId>,
    Form(form): Form<StatusForm>,
) -> Redirect {
    let result = MessageRepository::new(state.pool())
        .set_status(id, form.status)
        .await;
    let notice = if form.status.is_unread() {
        "Message marked as unread"
    } else {
        "Message marked as read"
    };
    after_mutation(MESSAGES_PATH, result, notice)
}

/// Delete a message.
#[instrument(skip(state))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(_): RequireAdmin,
    Path(id): Path<MessageId>,
) -> Redirect {
    let result = MessageRepository::new(state.pool()).delete(id).await;
    after_mutation(MESSAGES_PATH, result, "Message deleted")
}
