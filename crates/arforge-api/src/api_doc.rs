//! OpenAPI documentation.

use utoipa::OpenApi;

use crate::error;
use crate::handlers;
use arforge_core::models;

/// The OpenAPI document served at `/api/openapi.json`.
pub fn get_openapi_spec() -> utoipa::openapi::OpenApi {
    ApiDoc::openapi()
}

#[derive(OpenApi)]
#[openapi(
    info(
        title = "ARForge Upload API",
        version = "0.1.0",
        description = "Upload endpoints for AR experiences: MindAR image-tracking targets (.mind) and demo videos, stored in Supabase Storage."
    ),
    paths(
        handlers::mind_upload::upload_mind_file,
        handlers::video_upload::upload_video,
        handlers::health::liveness_check,
    ),
    components(
        schemas(
            models::MindUploadResponse,
            models::VideoUploadResponse,
            error::ErrorResponse,
        )
    ),
    tags(
        (name = "uploads", description = "AR asset uploads"),
        (name = "health", description = "Liveness probe")
    )
)]
pub struct ApiDoc;
