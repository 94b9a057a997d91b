//! Authentication extractors and cross-cutting HTTP concerns

use std::any::Any;

use axum::{
    async_trait,
    body::{Body, Bytes},
    extract::{FromRequest, FromRequestParts, Request},
    http::{
        header::{AUTHORIZATION, CONTENT_LENGTH},
        request::Parts,
        HeaderMap,
    },
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use flatseller_auth::Identity;
use serde::de::DeserializeOwned;
use tower_http::classify::{ServerErrorsAsFailures, SharedClassifier};
use tower_http::trace::{DefaultOnRequest, DefaultOnResponse, MakeSpan, TraceLayer};
use tracing::{debug, error, Level, Span};

use crate::error::{ApiError, ErrorResponse};
use crate::state::GatewayState;

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Pull the token out of an `Authorization: Bearer <token>` header.
/// The scheme is matched case-insensitively.
pub fn require_bearer(headers: &HeaderMap) -> Result<String, ApiError> {
    let value = headers
        .get(AUTHORIZATION)
        .and_then(|header| header.to_str().ok())
        .ok_or_else(|| ApiError::unauthorized("missing authorization header"))?;

    let mut parts = value.split_whitespace();
    let scheme = parts.next().unwrap_or("");
    if !scheme.eq_ignore_ascii_case("Bearer") {
        return Err(ApiError::unauthorized("invalid authorization scheme"));
    }

    let token = parts.next().unwrap_or("");
    if token.is_empty() {
        return Err(ApiError::unauthorized("missing bearer token"));
    }

    Ok(token.to_string())
}

/// Any authenticated caller.
#[derive(Debug, Clone)]
pub struct Caller(pub Identity);

/// An authenticated caller holding the admin role.
#[derive(Debug, Clone)]
pub struct AdminCaller(pub Identity);

#[async_trait]
impl FromRequestParts<GatewayState> for Caller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &GatewayState,
    ) -> Result<Self, Self::Rejection> {
        let token = require_bearer(&parts.headers)?;
        let identity = state.authenticate(&token)?;
        Ok(Caller(identity))
    }
}

#[async_trait]
impl FromRequestParts<GatewayState> for AdminCaller {
    type Rejection = ApiError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &GatewayState,
    ) -> Result<Self, Self::Rejection> {
        let Caller(identity) = Caller::from_request_parts(parts, state).await?;
        if !identity.is_admin() {
            debug!(user_id = %identity.user_id, "non-admin caller on admin route");
            return Err(ApiError::forbidden("admin role required"));
        }
        Ok(AdminCaller(identity))
    }
}

/// JSON body whose decoding failures become `400 invalid request body`,
/// including an empty body or a missing content type.
#[derive(Debug, Clone)]
pub struct JsonBody<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for JsonBody<T>
where
    T: DeserializeOwned,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => {
                debug!(error = %rejection.body_text(), "rejected request body");
                Err(ApiError::bad_request("invalid request body"))
            }
        }
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &axum::http::Request<B>) -> Span {
        let request_id = request
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .unwrap_or("-");

        tracing::info_span!(
            "http_request",
            method = %request.method(),
            uri = %request.uri(),
            request_id = %request_id,
        )
    }
}

pub fn create_trace_middleware() -> TraceLayer<SharedClassifier<ServerErrorsAsFailures>, RequestSpan> {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_request(DefaultOnRequest::new().level(Level::DEBUG))
        .on_response(DefaultOnResponse::new().level(Level::INFO))
}

/// Logging middleware for request/response logging
pub async fn logging_middleware(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let start = std::time::Instant::now();
    let response = next.run(request).await;
    let duration = start.elapsed();

    tracing::info!(
        method = %method,
        uri = %uri,
        status = %response.status(),
        duration_ms = duration.as_millis(),
        "request completed"
    );

    response
}

/// Turn a handler panic into the generic internal error body.
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = panic
        .downcast_ref::<&str>()
        .copied()
        .or_else(|| panic.downcast_ref::<String>().map(String::as_str))
        .unwrap_or("non-string panic payload");
    error!(panic = detail, "request handler panicked");

    ApiError::internal_server_error().into_response()
}

/// Copy the request id into error bodies produced by [`ApiError`].
pub async fn attach_request_id(request: Request, next: Next) -> Response {
    let request_id = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let response = next.run(request).await;

    let Some(request_id) = request_id else {
        return response;
    };
    let Some(error) = response.extensions().get::<ErrorResponse>().cloned() else {
        return response;
    };

    let body = ErrorResponse {
        request_id: Some(request_id),
        ..error
    };
    let Ok(bytes) = serde_json::to_vec(&body) else {
        return response;
    };

    let (mut parts, _) = response.into_parts();
    parts.headers.remove(CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(Bytes::from(bytes)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::{HeaderValue, StatusCode};

    #[test]
    fn require_bearer_extracts_token_case_insensitive() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("bearer TOKEN123"));

        let token = require_bearer(&headers).expect("token should be extracted");
        assert_eq!(token, "TOKEN123");
    }

    #[test]
    fn require_bearer_rejects_missing_token() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Bearer"));

        let error = require_bearer(&headers).expect_err("should reject missing token");
        assert_eq!(error.status, StatusCode::UNAUTHORIZED);
        assert!(error.message.contains("missing bearer token"));
    }

    #[test]
    fn require_bearer_rejects_other_schemes() {
        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, HeaderValue::from_static("Basic dXNlcjpwYXNz"));

        let error = require_bearer(&headers).expect_err("basic auth is not a bearer token");
        assert!(error.message.contains("scheme"));

        assert!(require_bearer(&HeaderMap::new()).is_err());
    }
}
