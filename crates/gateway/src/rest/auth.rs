//! Registration and login endpoints

use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Violations;
use crate::error::{ApiResult, ErrorResponse};
use crate::middleware::JsonBody;
use crate::state::GatewayState;

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    /// `user` or `admin`
    pub user_type: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct RegisterResponse {
    pub id: String,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct LoginRequest {
    /// Identifier returned by `/register`
    pub id: String,
    pub password: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LoginResponse {
    pub token: String,
}

#[utoipa::path(
    post,
    path = "/register",
    tag = "auth",
    request_body = RegisterRequest,
    responses(
        (status = 200, description = "Account created", body = RegisterResponse),
        (status = 400, description = "Invalid body, role or duplicate email", body = ErrorResponse),
        (status = 500, description = "Internal error", body = ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<GatewayState>,
    JsonBody(request): JsonBody<RegisterRequest>,
) -> ApiResult<Json<RegisterResponse>> {
    Violations::default()
        .required("email", &request.email)
        .present("password", &request.password)
        .required("user_type", &request.user_type)
        .finish()?;

    let id = state
        .authenticator()
        .register_new_user(&request.email, &request.password, &request.user_type)
        .await?;

    Ok(Json(RegisterResponse { id }))
}

#[utoipa::path(
    post,
    path = "/login",
    tag = "auth",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Session token issued", body = LoginResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Invalid credentials", body = ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<GatewayState>,
    JsonBody(request): JsonBody<LoginRequest>,
) -> ApiResult<Json<LoginResponse>> {
    Violations::default()
        .required("id", &request.id)
        .present("password", &request.password)
        .finish()?;

    let token = state
        .authenticator()
        .login(&request.id, &request.password)
        .await?;

    Ok(Json(LoginResponse { token }))
}
