use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::services::LibraryHandle;

mod book;
mod review;

const BOOK_TAG: &str = "book";
const REVIEW_TAG: &str = "review";

#[derive(OpenApi)]
#[openapi(
    paths(
        health,
    ),
    components(
        schemas(
            book::CreateBookRequest,
            book::UpdateBookRequest,
            review::CreateReviewRequest,
            review::UpdateReviewRequest
        )
    ),
    tags(
        (name = BOOK_TAG, description = "Book API endpoints"),
        (name = REVIEW_TAG, description = "Review API endpoints")
    )
)]
struct ApiDoc;

/// Get health of the API.
#[utoipa::path(
    method(get, head),
    path = "/api/health",
    responses(
        (status = OK, description = "Success", body = str, content_type = "text/plain")
    )
)]
async fn health() -> &'static str {
    "ok"
}

pub type AppState = LibraryHandle;

pub fn create_api(state: AppState) -> Router {
    let (router, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(health))
        .nest("/api/book", book::router(state.clone()))
        .nest("/api/review", review::router(state.clone()))
        .split_for_parts();

    router
        .merge(SwaggerUi::new("/swagger-ui").url("/apidoc/openapi.json", api))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
