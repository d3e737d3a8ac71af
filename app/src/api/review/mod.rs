use axum::{Json, extract::Path, extract::State, http::StatusCode, response::IntoResponse};
use domain::review::{NewReview, Review, ReviewPatch, ReviewRepoExt, TOP_REVIEWS_LIMIT};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use super::AppState;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateReviewRequest {
    pub book_id: Uuid,
    pub review: String,
    pub rating: f64,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateReviewRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub book_id: Option<Uuid>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f64>,
}

pub fn router(state: AppState) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .with_state(state)
        .routes(routes!(get_reviews, post_review))
        .routes(routes!(get_top_reviews))
        .routes(routes!(get_review, put_review, delete_review))
}

/// Get all reviews
///
/// Get all reviews in the system
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Reviews found", body = Vec<Review>),
        (status = 500, description = "Internal server error")
    ),
    tag = super::REVIEW_TAG
)]
async fn get_reviews(State(state): State<AppState>) -> impl IntoResponse {
    match state.library().review_repo.get_all() {
        Ok(reviews) => Json(reviews).into_response(),
        Err(e) => {
            tracing::error!("Failed to list reviews: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Create a new review
///
/// Create a new review. All fields are required. The referenced book id is
/// not checked against the book store.
#[utoipa::path(
    post,
    path = "/",
    request_body = CreateReviewRequest,
    responses(
        (status = 201, description = "Review created successfully", body = Review),
        (status = 422, description = "Invalid request data"),
        (status = 500, description = "Internal server error")
    ),
    tag = super::REVIEW_TAG
)]
async fn post_review(
    State(state): State<AppState>,
    Json(payload): Json<CreateReviewRequest>,
) -> impl IntoResponse {
    let new_review = NewReview {
        book_id: payload.book_id,
        review: payload.review,
        rating: payload.rating,
    };

    match state.library().review_repo.create_review(new_review) {
        Ok(review) => (StatusCode::CREATED, Json(review)).into_response(),
        Err(e) => {
            tracing::error!("Failed to create review: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Get top rated reviews
///
/// Get the ten highest-rated reviews, rating descending
#[utoipa::path(
    get,
    path = "/top",
    responses(
        (status = 200, description = "Reviews found", body = Vec<Review>),
        (status = 500, description = "Internal server error")
    ),
    tag = super::REVIEW_TAG
)]
async fn get_top_reviews(State(state): State<AppState>) -> impl IntoResponse {
    match state.library().review_repo.top_reviews(TOP_REVIEWS_LIMIT) {
        Ok(reviews) => Json(reviews).into_response(),
        Err(e) => {
            tracing::error!("Failed to list top reviews: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Get review by UUID
///
/// Get a specific review by its UUID
#[utoipa::path(
    get,
    path = "/{review_id}",
    params(
        ("review_id" = Uuid, Path, description = "Review UUID")
    ),
    responses(
        (status = 200, description = "Review found", body = Review),
        (status = 404, description = "Review not found"),
        (status = 400, description = "Invalid UUID format")
    ),
    tag = super::REVIEW_TAG
)]
async fn get_review(
    State(state): State<AppState>,
    Path(review_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.library().review_repo.get(&review_id) {
        Ok(Some(review)) => Json(review).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!("Failed to get review {review_id}: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Update review by UUID
///
/// Update an existing review. Only provided fields are changed.
#[utoipa::path(
    put,
    path = "/{review_id}",
    params(
        ("review_id" = Uuid, Path, description = "Review UUID")
    ),
    request_body = UpdateReviewRequest,
    responses(
        (status = 200, description = "Review updated successfully", body = Review),
        (status = 400, description = "Review not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = super::REVIEW_TAG
)]
async fn put_review(
    State(state): State<AppState>,
    Path(review_id): Path<Uuid>,
    Json(payload): Json<UpdateReviewRequest>,
) -> impl IntoResponse {
    let patch = ReviewPatch {
        book_id: payload.book_id,
        review: payload.review,
        rating: payload.rating,
    };

    match state.library().review_repo.update_review(&review_id, patch) {
        Ok(Some(review)) => Json(review).into_response(),
        // Updating a missing id is a bad request, not a 404
        Ok(None) => (StatusCode::BAD_REQUEST, "Review not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to update review {review_id}: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Delete review by UUID
///
/// Delete a specific review by its UUID, returning the removed record
#[utoipa::path(
    delete,
    path = "/{review_id}",
    params(
        ("review_id" = Uuid, Path, description = "Review UUID")
    ),
    responses(
        (status = 200, description = "Review deleted successfully", body = Review),
        (status = 400, description = "Review not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = super::REVIEW_TAG
)]
async fn delete_review(
    State(state): State<AppState>,
    Path(review_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.library().review_repo.delete(&review_id) {
        Ok(Some(review)) => Json(review).into_response(),
        Ok(None) => (StatusCode::BAD_REQUEST, "Review not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to delete review {review_id}: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
