//! Flat endpoints

use axum::{extract::State, Json};
use flatseller_database::Flat;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::Violations;
use crate::error::{ApiResult, ErrorResponse};
use crate::middleware::{AdminCaller, Caller, JsonBody};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct FlatResponse {
    pub id: i64,
    pub house_id: i64,
    pub price: i64,
    pub rooms: i64,
    pub flat_number: i64,
    pub status: String,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Flat> for FlatResponse {
    fn from(flat: Flat) -> Self {
        Self {
            id: flat.id,
            house_id: flat.house_id,
            price: flat.price,
            rooms: flat.rooms,
            flat_number: flat.flat_number,
            status: flat.status.as_str().to_string(),
            created_at: flat.created_at.to_rfc3339(),
            updated_at: flat.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateFlatRequest {
    pub house_id: i64,
    pub price: i64,
    pub room: i64,
    /// Accepted for compatibility and ignored; new flats start as `created`.
    pub status: Option<String>,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct UpdateFlatRequest {
    pub id: i64,
    pub price: i64,
    pub room: i64,
    pub status: String,
}

#[utoipa::path(
    post,
    path = "/flat/create",
    tag = "flats",
    request_body = CreateFlatRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Flat created", body = FlatResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn create_flat(
    State(state): State<GatewayState>,
    Caller(caller): Caller,
    JsonBody(request): JsonBody<CreateFlatRequest>,
) -> ApiResult<Json<FlatResponse>> {
    Violations::default()
        .positive("house_id", request.house_id)
        .positive("price", request.price)
        .positive("room", request.room)
        .finish()?;

    tracing::debug!(user_id = %caller.user_id, house_id = request.house_id, "create flat");
    let flat = state
        .flats()
        .save_flat(request.house_id, request.price, request.room)
        .await?;

    Ok(Json(flat.into()))
}

#[utoipa::path(
    post,
    path = "/flat/update",
    tag = "flats",
    request_body = UpdateFlatRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Flat updated", body = FlatResponse),
        (status = 400, description = "Invalid body or status", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse),
        (status = 404, description = "Flat not found", body = ErrorResponse)
    )
)]
pub async fn update_flat(
    State(state): State<GatewayState>,
    AdminCaller(caller): AdminCaller,
    JsonBody(request): JsonBody<UpdateFlatRequest>,
) -> ApiResult<Json<FlatResponse>> {
    Violations::default()
        .positive("id", request.id)
        .positive("price", request.price)
        .positive("room", request.room)
        .required("status", &request.status)
        .finish()?;

    tracing::debug!(user_id = %caller.user_id, flat_id = request.id, "update flat");
    let flat = state
        .flats()
        .update_flat(request.id, request.price, request.room, &request.status)
        .await?;

    Ok(Json(flat.into()))
}
