pub mod api;
pub mod config;
pub mod services;
pub mod utils;

use crate::config::AppConfig;
use crate::services::media_storage::MediaStorage;
use crate::services::staging::StagingArea;
use axum::{
    Router,
    routing::{delete, get, post},
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

#[derive(OpenApi)]
#[openapi(
    paths(
        api::handlers::media::upload_image,
        api::handlers::media::delete_image,
        api::handlers::health::health_check,
    ),
    components(
        schemas(
            api::handlers::media::UploadResponse,
            api::handlers::media::DeleteResponse,
        )
    ),
    tags(
        (name = "media", description = "Image relay endpoints"),
        (name = "system", description = "Service status endpoints")
    )
)]
pub struct ApiDoc;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn MediaStorage>,
    pub staging: Arc<StagingArea>,
    pub config: AppConfig,
}

pub fn create_app(state: AppState) -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
        .route("/", get(api::handlers::health::health_check))
        .route("/upload", post(api::handlers::media::upload_image))
        .route(
            "/delete/:public_id",
            delete(api::handlers::media::delete_image),
        )
        .with_state(state)
}
