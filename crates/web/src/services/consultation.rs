//! Consultation intake.
//!
//! A request is validated, stored as an unread message, and then announced
//! by two emails: one to the operator, one acknowledging the requester.
//! Storage failure fails the request. Email failure is logged and reported
//! to Sentry but the request still succeeds, since the message is already
//! in the inbox.

use std::future::Future;

use serde::Deserialize;
use thiserror::Error;

use edureach_core::Email;

use crate::db::{MessageRepository, RepositoryError};
use crate::models::UserMessage;
use crate::models::message::NewMessage;
use crate::services::email::{EmailError, EmailService};

/// Message shown when a required field is missing.
pub const MISSING_FIELDS_MESSAGE: &str = "Please fill in all required fields";

/// A consultation request as submitted by the contact form or JSON API.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConsultationRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub message: String,
}

impl ConsultationRequest {
    /// Validate and normalise the request.
    ///
    /// # Errors
    ///
    /// Returns `ConsultationError::MissingFields` if name, email, or message
    /// is blank, or `ConsultationError::InvalidEmail` if the email is malformed.
    pub fn validate(&self) -> Result<NewMessage, ConsultationError> {
        let name = self.name.trim();
        let message = self.message.trim();
        if name.is_empty() || self.email.trim().is_empty() || message.is_empty() {
            return Err(ConsultationError::MissingFields);
        }
        let email = Email::parse(&self.email).map_err(|_| ConsultationError::InvalidEmail)?;
        let phone = self
            .phone
            .as_deref()
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ToOwned::to_owned);

        Ok(NewMessage {
            name: name.to_owned(),
            email: email.into_inner(),
            phone,
            message: message.to_owned(),
        })
    }
}

/// Errors from consultation intake.
#[derive(Debug, Error)]
pub enum ConsultationError {
    #[error("Please fill in all required fields")]
    MissingFields,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Failed to save message to database")]
    Storage(#[from] RepositoryError),
}

/// Where accepted requests are stored.
pub trait MessageStore {
    fn insert(
        &self,
        message: &NewMessage,
    ) -> impl Future<Output = Result<UserMessage, RepositoryError>> + Send;
}

impl MessageStore for MessageRepository<'_> {
    async fn insert(&self, message: &NewMessage) -> Result<UserMessage, RepositoryError> {
        self.create(message).await
    }
}

impl<T: MessageStore + Sync> MessageStore for &T {
    fn insert(
        &self,
        message: &NewMessage,
    ) -> impl Future<Output = Result<UserMessage, RepositoryError>> + Send {
        (**self).insert(message)
    }
}

/// Sends the two emails that follow an accepted request.
pub trait ConsultationNotifier {
    fn notify_operator(
        &self,
        message: &UserMessage,
    ) -> impl Future<Output = Result<(), EmailError>> + Send;

    fn acknowledge(
        &self,
        message: &UserMessage,
    ) -> impl Future<Output = Result<(), EmailError>> + Send;
}

impl ConsultationNotifier for EmailService {
    async fn notify_operator(&self, message: &UserMessage) -> Result<(), EmailError> {
        self.send_consultation_notification(message).await
    }

    async fn acknowledge(&self, message: &UserMessage) -> Result<(), EmailError> {
        self.send_consultation_acknowledgement(message).await
    }
}

/// Outcome of an accepted request.
#[derive(Debug)]
pub struct Submission {
    pub message: UserMessage,
    pub operator_notified: bool,
    pub acknowledged: bool,
}

/// Consultation intake over a store and an optional notifier.
pub struct ConsultationService<'a, S, N> {
    store: S,
    notifier: Option<&'a N>,
}

impl<'a, S, N> ConsultationService<'a, S, N>
where
    S: MessageStore + Sync,
    N: ConsultationNotifier + Sync,
{
    #[must_use]
    pub const fn new(store: S, notifier: Option<&'a N>) -> Self {
        Self { store, notifier }
    }

    /// Validate, store, and announce a consultation request.
    ///
    /// # Errors
    ///
    /// Returns `ConsultationError` on invalid input or storage failure.
    /// Notification failures are not errors.
    pub async fn submit(&self, request: &ConsultationRequest) -> Result<Submission, ConsultationError> {
        let new_message = request.validate()?;
        let message = self.store.insert(&new_message).await?;
        tracing::info!(message_id = %message.id, "Consultation request stored");

        let Some(notifier) = self.notifier else {
            tracing::warn!(message_id = %message.id, "Email not configured, skipping consultation emails");
            return Ok(Submission {
                message,
                operator_notified: false,
                acknowledged: false,
            });
        };

        let operator_notified = report_email_failure(
            "operator notification",
            &message,
            notifier.notify_operator(&message).await,
        );
        let acknowledged = report_email_failure(
            "acknowledgement",
            &message,
            notifier.acknowledge(&message).await,
        );

        Ok(Submission {
            message,
            operator_notified,
            acknowledged,
        })
    }
}

fn report_email_failure(kind: &str, message: &UserMessage, result: Result<(), EmailError>) -> bool {
    match result {
        Ok(()) => true,
        Err(e) => {
            let event_id = sentry::capture_error(&e);
            tracing::error!(
                error = %e,
                message_id = %message.id,
                sentry_event_id = %event_id,
                "Failed to send consultation {kind}"
            );
            false
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::Mutex;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::Utc;
    use edureach_core::{MessageId, MessageStatus};

    use super::*;

    #[derive(Default)]
    struct MemoryStore {
        rows: Mutex<Vec<UserMessage>>,
        fail: bool,
    }

    impl MessageStore for MemoryStore {
        async fn insert(&self, message: &NewMessage) -> Result<UserMessage, RepositoryError> {
            if self.fail {
                return Err(RepositoryError::DataCorruption("store offline".to_string()));
            }
            let row = UserMessage {
                id: MessageId::generate(),
                name: message.name.clone(),
                email: message.email.clone(),
                phone: message.phone.clone(),
                message: message.message.clone(),
                status: MessageStatus::Unread,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            };
            self.rows.lock().unwrap().push(row.clone());
            Ok(row)
        }
    }

    #[derive(Default)]
    struct RecordingNotifier {
        operator: AtomicUsize,
        acknowledgements: AtomicUsize,
        fail_operator: bool,
    }

    impl ConsultationNotifier for RecordingNotifier {
        async fn notify_operator(&self, _message: &UserMessage) -> Result<(), EmailError> {
            self.operator.fetch_add(1, Ordering::SeqCst);
            if self.fail_operator {
                return Err(EmailError::InvalidAddress("ops@".to_string()));
            }
            Ok(())
        }

        async fn acknowledge(&self, _message: &UserMessage) -> Result<(), EmailError> {
            self.acknowledgements.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    fn request() -> ConsultationRequest {
        ConsultationRequest {
            name: "  Lina Haddad ".to_string(),
            email: "Lina@Mail.com".to_string(),
            phone: Some("   ".to_string()),
            message: "Looking for MBA programs in Germany.".to_string(),
        }
    }

    #[test]
    fn test_validate_normalises_fields() {
        let message = request().validate().unwrap();
        assert_eq!(message.name, "Lina Haddad");
        assert_eq!(message.email, "lina@mail.com");
        assert!(message.phone.is_none());
    }

    #[test]
    fn test_validate_requires_fields() {
        for req in [
            ConsultationRequest {
                name: String::new(),
                ..request()
            },
            ConsultationRequest {
                email: " ".to_string(),
                ..request()
            },
            ConsultationRequest {
                message: "\n".to_string(),
                ..request()
            },
        ] {
            let err = req.validate().unwrap_err();
            assert!(matches!(err, ConsultationError::MissingFields));
            assert_eq!(err.to_string(), MISSING_FIELDS_MESSAGE);
        }
    }

    #[test]
    fn test_validate_rejects_bad_email() {
        let req = ConsultationRequest {
            email: "lina-at-mail".to_string(),
            ..request()
        };
        assert!(matches!(req.validate(), Err(ConsultationError::InvalidEmail)));
    }

    #[tokio::test]
    async fn test_submit_stores_one_unread_message_and_sends_both_emails() {
        let store = MemoryStore::default();
        let notifier = RecordingNotifier::default();
        let service = ConsultationService::new(&store, Some(&notifier));

        let submission = service.submit(&request()).await.unwrap();

        let rows = store.rows.lock().unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].status, MessageStatus::Unread);
        assert_eq!(rows[0].id, submission.message.id);
        assert!(submission.operator_notified);
        assert!(submission.acknowledged);
        assert_eq!(notifier.operator.load(Ordering::SeqCst), 1);
        assert_eq!(notifier.acknowledgements.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_submit_survives_email_failure() {
        let store = MemoryStore::default();
        let notifier = RecordingNotifier {
            fail_operator: true,
            ..RecordingNotifier::default()
        };
        let service = ConsultationService::new(&store, Some(&notifier));

        let submission = service.submit(&request()).await.unwrap();

        assert!(!submission.operator_notified);
        assert!(submission.acknowledged);
        assert_eq!(store.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_submit_without_notifier() {
        let store = MemoryStore::default();
        let service = ConsultationService::<_, RecordingNotifier>::new(&store, None);

        let submission = service.submit(&request()).await.unwrap();

        assert!(!submission.operator_notified);
        assert_eq!(store.rows.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_invalid_request_stores_nothing() {
        let store = MemoryStore::default();
        let notifier = RecordingNotifier::default();
        let service = ConsultationService::new(&store, Some(&notifier));

        let req = ConsultationRequest {
            name: String::new(),
            ..request()
        };
        assert!(service.submit(&req).await.is_err());
        assert!(store.rows.lock().unwrap().is_empty());
        assert_eq!(notifier.operator.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_storage_failure_fails_request() {
        let store = MemoryStore {
            fail: true,
            ..MemoryStore::default()
        };
        let notifier = RecordingNotifier::default();
        let service = ConsultationService::new(&store, Some(&notifier));

        let err = service.submit(&request()).await.unwrap_err();
        assert!(matches!(err, ConsultationError::Storage(_)));
        assert_eq!(err.to_string(), "Failed to save message to database");
        assert_eq!(notifier.operator.load(Ordering::SeqCst), 0);
    }
}
