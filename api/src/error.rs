use rocket::http::Status;
use rocket::response::{self, Responder};
use rocket::serde::json::Json;
use rocket::Request;
use serde_json::json;

use crate::repository::store::StoreError;
use crate::services::payment_gateway::PaymentError;

pub const UNAUTHORIZED_MESSAGE: &str = "unauthorized access";
pub const FORBIDDEN_MESSAGE: &str = "Forbidden access";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("unauthorized access")]
    Unauthorized,

    #[error("Forbidden access")]
    Forbidden,

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Payment(#[from] PaymentError),

    #[error("failed to sign access token: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn status(&self) -> Status {
        match self {
            ApiError::Unauthorized => Status::Unauthorized,
            ApiError::Forbidden => Status::Forbidden,
            ApiError::BadRequest(_) => Status::BadRequest,
            ApiError::Store(_) | ApiError::Token(_) => Status::InternalServerError,
            ApiError::Payment(PaymentError::NotConfigured) => Status::ServiceUnavailable,
            ApiError::Payment(_) => Status::BadGateway,
        }
    }

    /// Message returned to the client. Server-side failures stay opaque.
    fn public_message(&self) -> String {
        match self {
            ApiError::Unauthorized => UNAUTHORIZED_MESSAGE.to_string(),
            ApiError::Forbidden => FORBIDDEN_MESSAGE.to_string(),
            ApiError::BadRequest(message) => message.clone(),
            ApiError::Store(_) | ApiError::Token(_) => "Internal server error".to_string(),
            ApiError::Payment(PaymentError::NotConfigured) => {
                "Payment provider is not configured".to_string()
            }
            ApiError::Payment(_) => "Payment provider request failed".to_string(),
        }
    }
}

impl<'r> Responder<'r, 'static> for ApiError {
    fn respond_to(self, request: &'r Request<'_>) -> response::Result<'static> {
        let status = self.status();
        if status.code >= 500 {
            tracing::error!(error = %self, method = %request.method(), uri = %request.uri(), "request failed");
        } else {
            tracing::debug!(error = %self, uri = %request.uri(), "request rejected");
        }
        (status, Json(json!({ "message": self.public_message() }))).respond_to(request)
    }
}
