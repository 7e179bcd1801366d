use async_trait::async_trait;
use axum::Json;
use axum::extract::{Form, FromRequest, Request};
use axum::http::{StatusCode, header};
use axum::response::{IntoResponse, Response};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::domain::error::Error;

/// Uniform response wrapper: `{ success, data?, error? }`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T) -> Self {
        Self { success: true, data: Some(data), error: None }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self { success: false, data: None, error: Some(message.into()) }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Error::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            Error::NotFound => (StatusCode::NOT_FOUND, self.to_string()),
            Error::Persistence(source) => {
                tracing::error!(%source, "persist failed, in-memory change rolled back");
                (StatusCode::INTERNAL_SERVER_ERROR, "Failed to save changes".into())
            }
            Error::CorruptStore { .. } => {
                tracing::error!(error = %self, "reminder store unreadable");
                (StatusCode::INTERNAL_SERVER_ERROR, "Reminder store unavailable".into())
            }
        };
        (status, Json(ApiResponse::<serde_json::Value>::failure(message))).into_response()
    }
}

/// Accepts a body as JSON or as a URL-encoded form, keyed off `Content-Type`.
pub struct JsonOrForm<T>(pub T);

#[async_trait]
impl<S, T> FromRequest<S> for JsonOrForm<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = Response;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default();

        if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(value) = Form::<T>::from_request(req, state)
                .await
                .map_err(|rej| bad_request(rej.body_text()))?;
            return Ok(Self(value));
        }
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rej| bad_request(rej.body_text()))?;
        Ok(Self(value))
    }
}

fn bad_request(message: String) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ApiResponse::<serde_json::Value>::failure(message)),
    )
        .into_response()
}
