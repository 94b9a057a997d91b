//! # Flatseller Gateway Crate
//!
//! HTTP boundary of the service: request decoding and validation, bearer
//! token authentication, role checks and dispatch to the housing and auth
//! services.
//!
//! - **REST**: handlers under [`rest`], documented with OpenAPI
//! - **State**: [`GatewayState`] holds the service handles
//! - **Middleware**: typed caller extractors, request ids, tracing and logging

pub mod error;
pub mod middleware;
pub mod rest;
pub mod state;

pub use error::{ApiError, ApiResult, ErrorResponse, FieldError};
pub use middleware::{AdminCaller, Caller, JsonBody};
pub use state::GatewayState;

use std::time::Duration;

use axum::{
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        Method, StatusCode,
    },
    middleware as axum_middleware, Router,
};
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;

/// Build the application router.
///
/// Requests get an `x-request-id` (generated unless supplied), a tracing span,
/// a hard timeout and a completion log line. A panicking handler answers 500.
pub fn create_router(state: GatewayState, request_timeout: Duration) -> Router {
    #[allow(unused_mut)]
    let mut router = rest::create_rest_routes().with_state(state);

    #[cfg(debug_assertions)]
    {
        use utoipa::OpenApi;
        use utoipa_swagger_ui::SwaggerUi;

        router = router
            .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", docs::ApiDoc::openapi()));
    }

    with_middleware(router, request_timeout)
}

fn with_middleware(router: Router, request_timeout: Duration) -> Router {
    router.layer(
        ServiceBuilder::new()
            .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
            .layer(middleware::create_trace_middleware())
            .layer(PropagateRequestIdLayer::x_request_id())
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                request_timeout,
            ))
            .layer(
                CorsLayer::new()
                    .allow_origin(Any)
                    .allow_methods([Method::GET, Method::POST])
                    .allow_headers([AUTHORIZATION, CONTENT_TYPE]),
            )
            .layer(axum_middleware::from_fn(middleware::logging_middleware))
            .layer(axum_middleware::from_fn(middleware::attach_request_id))
            .layer(CatchPanicLayer::custom(middleware::panic_response)),
    )
}

#[cfg(debug_assertions)]
mod docs {
    use utoipa::openapi::security::{Http, HttpAuthScheme, SecurityScheme};
    use utoipa::{Modify, OpenApi};

    use crate::rest;

    #[derive(OpenApi)]
    #[openapi(
        paths(
            rest::health::health_check,
            rest::auth::register,
            rest::auth::login,
            rest::flat::create_flat,
            rest::flat::update_flat,
            rest::house::create_house,
            rest::house::list_house_flats,
        ),
        components(schemas(
            rest::health::HealthResponse,
            rest::auth::RegisterRequest,
            rest::auth::RegisterResponse,
            rest::auth::LoginRequest,
            rest::auth::LoginResponse,
            rest::flat::FlatResponse,
            rest::flat::CreateFlatRequest,
            rest::flat::UpdateFlatRequest,
            rest::house::HouseResponse,
            rest::house::CreateHouseRequest,
            crate::error::ErrorResponse,
            crate::error::FieldError,
        )),
        modifiers(&BearerAuth),
        tags(
            (name = "auth", description = "Registration and login"),
            (name = "flats", description = "Flat lifecycle"),
            (name = "houses", description = "Houses and flat listings"),
            (name = "health", description = "Liveness check"),
        )
    )]
    pub struct ApiDoc;

    struct BearerAuth;

    impl Modify for BearerAuth {
        fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
            if let Some(components) = openapi.components.as_mut() {
                components.add_security_scheme(
                    "bearer",
                    SecurityScheme::Http(Http::new(HttpAuthScheme::Bearer)),
                );
            }
        }
    }
}
