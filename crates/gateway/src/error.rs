//! Error responses for the HTTP layer

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use flatseller_auth::AuthError;
use flatseller_housing::HousingError;
use serde::Serialize;
use tracing::{error, warn};
use utoipa::ToSchema;

pub const INTERNAL_ERROR_MESSAGE: &str = "internal server error";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// JSON body of every non-2xx response produced by the gateway.
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub message: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub details: Vec<FieldError>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub request_id: Option<String>,
}

#[derive(Debug)]
pub struct ApiError {
    pub status: StatusCode,
    pub message: String,
    pub details: Vec<FieldError>,
}

pub type ApiResult<T> = Result<T, ApiError>;

impl ApiError {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
            details: Vec::new(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(StatusCode::BAD_REQUEST, message)
    }

    pub fn validation(details: Vec<FieldError>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: "invalid request".to_string(),
            details,
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::new(StatusCode::UNAUTHORIZED, message)
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::new(StatusCode::FORBIDDEN, message)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(StatusCode::NOT_FOUND, message)
    }

    pub fn internal_server_error() -> Self {
        Self::new(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let body = ErrorResponse {
            message: self.message,
            details: self.details,
            request_id: None,
        };

        let mut response = (self.status, Json(body.clone())).into_response();
        // picked up by the request id middleware
        response.extensions_mut().insert(body);
        response
    }
}

impl From<AuthError> for ApiError {
    fn from(error: AuthError) -> Self {
        match error {
            AuthError::InvalidRole | AuthError::UserExists => Self::bad_request(error.to_string()),
            AuthError::InvalidCredentials => {
                warn!(error = %error, "rejected login");
                Self::unauthorized(error.to_string())
            }
            AuthError::InvalidToken | AuthError::TokenExpired => {
                Self::unauthorized(error.to_string())
            }
            AuthError::PasswordHash(_) | AuthError::Token(_) | AuthError::Store(_) => {
                error!(error = ?error, "auth error");
                Self::internal_server_error()
            }
        }
    }
}

impl From<HousingError> for ApiError {
    fn from(error: HousingError) -> Self {
        match error {
            HousingError::InvalidFlatStatus(_) | HousingError::InvalidStatusTransition { .. } => {
                Self::bad_request(error.to_string())
            }
            HousingError::FlatNotFound(_) => Self::not_found(error.to_string()),
            HousingError::Store(_) => {
                error!(error = ?error, "housing error");
                Self::internal_server_error()
            }
        }
    }
}
