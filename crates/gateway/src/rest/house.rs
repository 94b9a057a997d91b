//! House endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use flatseller_database::House;
use flatseller_housing::FlatVisibility;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::flat::FlatResponse;
use super::Violations;
use crate::error::{ApiError, ApiResult, ErrorResponse};
use crate::middleware::{AdminCaller, Caller, JsonBody};
use crate::state::GatewayState;

#[derive(Debug, Serialize, ToSchema)]
pub struct HouseResponse {
    pub id: i64,
    pub address: String,
    pub year: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub developer: Option<String>,
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl From<House> for HouseResponse {
    fn from(house: House) -> Self {
        Self {
            id: house.id,
            address: house.address,
            year: house.year,
            developer: house.developer,
            created_at: house.created_at.to_rfc3339(),
            updated_at: house.updated_at.map(|at| at.to_rfc3339()),
        }
    }
}

#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(default)]
pub struct CreateHouseRequest {
    pub address: String,
    pub year: i64,
    pub developer: Option<String>,
}

#[utoipa::path(
    post,
    path = "/house/create",
    tag = "houses",
    request_body = CreateHouseRequest,
    security(("bearer" = [])),
    responses(
        (status = 200, description = "House created", body = HouseResponse),
        (status = 400, description = "Invalid body", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse),
        (status = 403, description = "Caller is not an admin", body = ErrorResponse)
    )
)]
pub async fn create_house(
    State(state): State<GatewayState>,
    AdminCaller(_admin): AdminCaller,
    JsonBody(request): JsonBody<CreateHouseRequest>,
) -> ApiResult<Json<HouseResponse>> {
    Violations::default()
        .required("address", &request.address)
        .positive("year", request.year)
        .finish()?;

    let developer = request
        .developer
        .as_deref()
        .map(str::trim)
        .filter(|developer| !developer.is_empty());

    let house = state
        .houses()
        .save_house(&request.address, request.year, developer)
        .await?;

    Ok(Json(house.into()))
}

#[utoipa::path(
    get,
    path = "/house/{id}",
    tag = "houses",
    params(("id" = i64, Path, description = "House identifier")),
    security(("bearer" = [])),
    responses(
        (status = 200, description = "Flats visible to the caller", body = [FlatResponse]),
        (status = 400, description = "Malformed house id", body = ErrorResponse),
        (status = 401, description = "Missing or invalid token", body = ErrorResponse)
    )
)]
pub async fn list_house_flats(
    State(state): State<GatewayState>,
    Caller(caller): Caller,
    path: Result<Path<i64>, axum::extract::rejection::PathRejection>,
) -> ApiResult<Json<Vec<FlatResponse>>> {
    let Path(house_id) = path.map_err(|_| ApiError::bad_request("invalid house id"))?;

    let flats = state
        .houses()
        .list_flats(house_id, FlatVisibility::for_role(caller.role))
        .await?;

    Ok(Json(flats.into_iter().map(FlatResponse::from).collect()))
}
