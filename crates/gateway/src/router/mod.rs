use axum::{Json, Router, extract::DefaultBodyLimit, routing::get};
use utoipa::openapi::tag::TagBuilder;
use utoipa::openapi::{Info, OpenApi};

pub mod gateway;

pub use gateway::{DEFAULT_MAX_BODY_SIZE, GatewayService, create_router};

pub const OPENAPI_PATH: &str = "/openapi.json";

/// Builds the full HTTP surface: gateway routes plus the OpenAPI document.
/// Request bodies are capped at the service's `max_body_size`.
pub fn initiate_router(service: GatewayService) -> Router {
    let (gateway_router, _) = gateway::create_router().split_for_parts();
    let spec = generate_openapi_spec();
    let max_body_size = service.max_body_size();

    gateway_router
        .with_state(service)
        .route(
            OPENAPI_PATH,
            get(move || {
                let spec = spec.clone();
                async move { Json(spec) }
            }),
        )
        .layer(DefaultBodyLimit::max(max_body_size))
}

pub fn generate_openapi_spec() -> OpenApi {
    let (_, mut spec) = gateway::create_router().split_for_parts();

    let mut info = Info::new("Inference Gateway API", "1.0.0");
    info.description = Some("API to interact with a managed inference endpoint".to_string());
    spec.info = info;

    spec.tags = Some(vec![
        TagBuilder::new()
            .name(gateway::SERVICE_ROUTE_KEY)
            .description(Some(
                "Liveness check and prediction proxy to the inference backend",
            ))
            .build(),
    ]);

    spec
}
