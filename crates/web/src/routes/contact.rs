//! Consultation intake route handlers.
//!
//! The landing page form posts to `/contact` and is redirected back to the
//! contact section with a notice. Script clients post JSON to
//! `/api/consultation`.

use axum::{
    Form, Json,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::Serialize;
use tracing::instrument;

use edureach_core::MessageId;

use crate::db::MessageRepository;
use crate::routes::{redirect_with_error, redirect_with_notice};
use crate::services::consultation::{ConsultationError, Submission};
use crate::services::{ConsultationRequest, ConsultationService, EmailService};
use crate::state::AppState;

/// Where the form redirects after a submission.
const CONTACT_SECTION: &str = "/#contact";

/// Notice shown after a successful submission.
const SENT_MESSAGE: &str = "Consultation request sent successfully";

/// Error for a body that could not be read as a consultation request.
const INVALID_BODY_MESSAGE: &str = "Request body must be a JSON consultation request";

/// Successful JSON response.
#[derive(Debug, Serialize)]
pub struct ConsultationResponse {
    pub success: bool,
    pub message: &'static str,
    pub id: MessageId,
}

/// Failed JSON response.
#[derive(Debug, Serialize)]
pub struct ConsultationErrorResponse {
    pub error: String,
}

impl IntoResponse for ConsultationError {
    fn into_response(self) -> Response {
        report_storage_failure(&self);
        let status = match self {
            Self::MissingFields | Self::InvalidEmail => StatusCode::BAD_REQUEST,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (
            status,
            Json(ConsultationErrorResponse {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}

/// Answer a rejected JSON body in the same shape as other intake errors.
fn rejection_response(rejection: &JsonRejection) -> Response {
    tracing::debug!(error = %rejection.body_text(), "Rejected consultation body");
    (
        rejection.status(),
        Json(ConsultationErrorResponse {
            error: INVALID_BODY_MESSAGE.to_string(),
        }),
    )
        .into_response()
}

fn report_storage_failure(error: &ConsultationError) {
    if let ConsultationError::Storage(inner) = error {
        let event_id = sentry::capture_error(inner);
        tracing::error!(
            error = %inner,
            sentry_event_id = %event_id,
            "Failed to store consultation request"
        );
    }
}

async fn submit(
    state: &AppState,
    request: &ConsultationRequest,
) -> Result<Submission, ConsultationError> {
    let service: ConsultationService<'_, _, EmailService> =
        ConsultationService::new(MessageRepository::new(state.pool()), state.email());
    service.submit(request).await
}

/// Submit the landing page contact form.
///
/// POST /contact
#[instrument(skip(state, request), fields(email = %request.email))]
pub async fn submit_form(
    State(state): State<AppState>,
    Form(request): Form<ConsultationRequest>,
) -> Redirect {
    match submit(&state, &request).await {
        Ok(_) => redirect_with_notice(CONTACT_SECTION, SENT_MESSAGE),
        Err(e) => {
            report_storage_failure(&e);
            redirect_with_error(CONTACT_SECTION, &e.to_string())
        }
    }
}

/// Submit a consultation request as JSON.
///
/// POST /api/consultation
///
/// # Errors
///
/// Returns `{"error": ...}` with 400 for missing or invalid fields, the
/// rejection status (400, 415 or 422) for a body that is not a JSON
/// consultation request, and 500 if the request could not be stored.
#[instrument(skip_all, fields(email = tracing::field::Empty))]
pub async fn submit_json(
    State(state): State<AppState>,
    payload: Result<Json<ConsultationRequest>, JsonRejection>,
) -> Result<Json<ConsultationResponse>, Response> {
    let Json(request) = payload.map_err(|e| rejection_response(&e))?;
    tracing::Span::current().record("email", request.email.as_str());

    let submission = submit(&state, &request)
        .await
        .map_err(IntoResponse::into_response)?;
    Ok(Json(ConsultationResponse {
        success: true,
        message: SENT_MESSAGE,
        id: submission.message.id,
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use axum::body::{Body, to_bytes};
    use axum::extract::FromRequest;
    use axum::http::{Request, header};

    use super::*;

    async fn rejection_for(request: Request<Body>) -> Response {
        let rejection = Json::<ConsultationRequest>::from_request(request, &())
            .await
            .err()
            .unwrap();
        rejection_response(&rejection)
    }

    async fn error_body(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_malformed_json_gets_error_payload() {
        let request = Request::post("/api/consultation")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(r#"{"name": "Amara""#))
            .unwrap();
        let response = rejection_for(request).await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(error_body(response).await["error"], INVALID_BODY_MESSAGE);
    }

    #[tokio::test]
    async fn test_wrong_content_type_gets_error_payload() {
        let request = Request::post("/api/consultation")
            .header(header::CONTENT_TYPE, "text/plain")
            .body(Body::from("hello"))
            .unwrap();
        let response = rejection_for(request).await;
        assert_eq!(response.status(), StatusCode::UNSUPPORTED_MEDIA_TYPE);
        assert_eq!(error_body(response).await["error"], INVALID_BODY_MESSAGE);
    }

    #[test]
    fn test_missing_fields_is_400() {
        let response = ConsultationError::MissingFields.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn test_storage_failure_is_500() {
        let error = ConsultationError::Storage(crate::db::RepositoryError::NotFound);
        assert_eq!(error.to_string(), "Failed to save message to database");
        assert_eq!(
            error.into_response().status(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_success_body_shape() {
        let id = MessageId::generate();
        let body = serde_json::to_value(ConsultationResponse {
            success: true,
            message: SENT_MESSAGE,
            id,
        })
        .unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["message"], "Consultation request sent successfully");
        assert_eq!(body["id"], id.to_string());
    }
}
