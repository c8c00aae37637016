//! Email service for consultation notifications.
//!
//! Uses SMTP via lettre for delivery with Askama HTML templates.

use askama::Template;
use lettre::{
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
    message::{MultiPart, SinglePart, header::ContentType},
    transport::smtp::{Error as SmtpError, authentication::Credentials},
};
use secrecy::ExposeSecret;
use thiserror::Error;

use crate::config::EmailConfig;
use crate::models::UserMessage;

const OPERATOR_SUBJECT: &str = "New Consultation Request";
const ACKNOWLEDGEMENT_SUBJECT: &str = "Thank you for your consultation request!";

/// HTML template for the operator notification.
#[derive(Template)]
#[template(path = "email/consultation_notification.html")]
struct ConsultationNotificationHtml<'a> {
    message: &'a UserMessage,
}

/// Plain text template for the operator notification.
#[derive(Template)]
#[template(path = "email/consultation_notification.txt")]
struct ConsultationNotificationText<'a> {
    message: &'a UserMessage,
}

/// HTML template for the acknowledgement sent to the requester.
#[derive(Template)]
#[template(path = "email/consultation_acknowledgement.html")]
struct ConsultationAcknowledgementHtml<'a> {
    name: &'a str,
}

/// Plain text template for the acknowledgement sent to the requester.
#[derive(Template)]
#[template(path = "email/consultation_acknowledgement.txt")]
struct ConsultationAcknowledgementText<'a> {
    name: &'a str,
}

/// Errors that can occur when sending email.
#[derive(Debug, Error)]
pub enum EmailError {
    /// SMTP transport error.
    #[error("SMTP error: {0}")]
    Smtp(#[from] SmtpError),

    /// Failed to build email message.
    #[error("Failed to build message: {0}")]
    MessageBuild(#[from] lettre::error::Error),

    /// Invalid email address.
    #[error("Invalid email address: {0}")]
    InvalidAddress(String),

    /// Template rendering error.
    #[error("Template error: {0}")]
    Template(#[from] askama::Error),
}

/// Rendered subject and bodies for one email.
#[derive(Debug)]
struct RenderedEmail {
    subject: &'static str,
    text: String,
    html: String,
}

/// Email service for sending transactional emails.
#[derive(Clone)]
pub struct EmailService {
    mailer: AsyncSmtpTransport<Tokio1Executor>,
    from_address: String,
    notify_address: String,
}

impl EmailService {
    /// Create a new email service from configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the SMTP relay cannot be configured.
    pub fn new(config: &EmailConfig) -> Result<Self, SmtpError> {
        let credentials = Credentials::new(
            config.smtp_username.clone(),
            config.smtp_password.expose_secret().to_string(),
        );

        let mailer = AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&config.smtp_host)?
            .port(config.smtp_port)
            .credentials(credentials)
            .build();

        Ok(Self {
            mailer,
            from_address: config.from_address.clone(),
            notify_address: config.notify_address.clone(),
        })
    }

    /// Tell the operator about a new consultation request.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or template fails to render.
    pub async fn send_consultation_notification(
        &self,
        message: &UserMessage,
    ) -> Result<(), EmailError> {
        let rendered = render_notification(message)?;
        self.send_multipart_email(&self.notify_address, &rendered)
            .await
    }

    /// Acknowledge a consultation request to the person who sent it.
    ///
    /// # Errors
    ///
    /// Returns error if email fails to send or template fails to render.
    pub async fn send_consultation_acknowledgement(
        &self,
        message: &UserMessage,
    ) -> Result<(), EmailError> {
        let rendered = render_acknowledgement(&message.name)?;
        self.send_multipart_email(&message.email, &rendered).await
    }

    /// Send a multipart email with both plain text and HTML versions.
    async fn send_multipart_email(
        &self,
        to: &str,
        rendered: &RenderedEmail,
    ) -> Result<(), EmailError> {
        let email = Message::builder()
            .from(
                self.from_address
                    .parse()
                    .map_err(|_| EmailError::InvalidAddress(self.from_address.clone()))?,
            )
            .to(to
                .parse()
                .map_err(|_| EmailError::InvalidAddress(to.to_string()))?)
            .subject(rendered.subject)
            .multipart(
                MultiPart::alternative()
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_PLAIN)
                            .body(rendered.text.clone()),
                    )
                    .singlepart(
                        SinglePart::builder()
                            .header(ContentType::TEXT_HTML)
                            .body(rendered.html.clone()),
                    ),
            )?;

        self.mailer.send(email).await?;

        tracing::info!(to = %to, subject = %rendered.subject, "Email sent successfully");
        Ok(())
    }
}

fn render_notification(message: &UserMessage) -> Result<RenderedEmail, EmailError> {
    Ok(RenderedEmail {
        subject: OPERATOR_SUBJECT,
        text: ConsultationNotificationText { message }.render()?,
        html: ConsultationNotificationHtml { message }.render()?,
    })
}

fn render_acknowledgement(name: &str) -> Result<RenderedEmail, EmailError> {
    Ok(RenderedEmail {
        subject: ACKNOWLEDGEMENT_SUBJECT,
        text: ConsultationAcknowledgementText { name }.render()?,
        html: ConsultationAcknowledgementHtml { name }.render()?,
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::Utc;
    use edureach_core::{MessageId, MessageStatus};

    use super::*;

    fn message(phone: Option<&str>) -> UserMessage {
        UserMessage {
            id: MessageId::generate(),
            name: "Amara <Okafor>".to_string(),
            email: "amara@mail.com".to_string(),
            phone: phone.map(String::from),
            message: "I'd like help applying to nursing programs.".to_string(),
            status: MessageStatus::Unread,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_notification_includes_phone_when_present() {
        let rendered = render_notification(&message(Some("+1 555 0100"))).unwrap();
        assert_eq!(rendered.subject, "New Consultation Request");
        assert!(rendered.text.contains("+1 555 0100"));
        assert!(rendered.html.contains("+1 555 0100"));
        assert!(rendered.text.contains("amara@mail.com"));
    }

    #[test]
    fn test_notification_omits_phone_line_when_absent() {
        let rendered = render_notification(&message(None)).unwrap();
        assert!(!rendered.text.contains("Phone:"));
    }

    #[test]
    fn test_notification_html_escapes_input() {
        let rendered = render_notification(&message(None)).unwrap();
        assert!(!rendered.html.contains("<Okafor>"));
        assert!(rendered.html.contains("&#60;Okafor&#62;"));
    }

    #[test]
    fn test_acknowledgement_mentions_response_time() {
        let rendered = render_acknowledgement("Amara").unwrap();
        assert_eq!(rendered.subject, "Thank you for your consultation request!");
        assert!(rendered.text.contains("Amara"));
        assert!(rendered.text.contains("within 24 hours"));
        assert!(rendered.html.contains("within 24 hours"));
    }
}
