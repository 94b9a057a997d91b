//! REST API endpoints for the gateway

pub mod auth;
pub mod flat;
pub mod health;
pub mod house;

use axum::{
    routing::{get, post},
    Router,
};

use crate::error::{ApiError, ApiResult, FieldError};
use crate::state::GatewayState;

pub fn create_rest_routes() -> Router<GatewayState> {
    Router::new()
        .route("/health", get(health::health_check))
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/flat/create", post(flat::create_flat))
        .route("/flat/update", post(flat::update_flat))
        .route("/house/create", post(house::create_house))
        .route("/house/:id", get(house::list_house_flats))
}

/// Collects field-level failures for a request body.
#[derive(Default)]
pub(crate) struct Violations(Vec<FieldError>);

impl Violations {
    pub(crate) fn required(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            self.0.push(FieldError::new(field, "is required"));
        }
        self
    }

    /// Presence only: whitespace counts as a value.
    pub(crate) fn present(&mut self, field: &str, value: &str) -> &mut Self {
        if value.is_empty() {
            self.0.push(FieldError::new(field, "is required"));
        }
        self
    }

    pub(crate) fn positive(&mut self, field: &str, value: i64) -> &mut Self {
        if value <= 0 {
            self.0.push(FieldError::new(field, "must be a positive integer"));
        }
        self
    }

    pub(crate) fn finish(&mut self) -> ApiResult<()> {
        if self.0.is_empty() {
            Ok(())
        } else {
            Err(ApiError::validation(std::mem::take(&mut self.0)))
        }
    }
}
