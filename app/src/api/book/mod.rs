use axum::{Json, extract::Path, extract::State, http::StatusCode, response::IntoResponse};
use domain::book::{Book, BookPatch, BookRepoExt, NewBook};
use domain::review::{Review, ReviewRepoExt};

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;
use uuid::Uuid;

use super::AppState;

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct CreateBookRequest {
    pub author: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Deserialize, Serialize, ToSchema)]
pub struct UpdateBookRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

pub fn router(state: AppState) -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .with_state(state)
        .routes(routes!(get_books, post_book))
        .routes(routes!(get_book, put_book, delete_book))
        .routes(routes!(get_book_reviews))
}

/// Get all books
///
/// Get all books in the system
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Books found", body = Vec<Book>),
        (status = 500, description = "Internal server error")
    ),
    tag = super::BOOK_TAG
)]
async fn get_books(State(state): State<AppState>) -> impl IntoResponse {
    match state.library().book_repo.get_all() {
        Ok(books) => Json(books).into_response(),
        Err(e) => {
            tracing::error!("Failed to list books: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Create a new book
///
/// Create a new book. All fields are required.
#[utoipa::path(
    post,
    path = "/",
    request_body = CreateBookRequest,
    responses(
        (status = 201, description = "Book created successfully", body = Book),
        (status = 422, description = "Invalid request data"),
        (status = 500, description = "Internal server error")
    ),
    tag = super::BOOK_TAG
)]
async fn post_book(
    State(state): State<AppState>,
    Json(payload): Json<CreateBookRequest>,
) -> impl IntoResponse {
    let new_book = NewBook {
        author: payload.author,
        title: payload.title,
        description: payload.description,
    };

    match state.library().book_repo.create_book(new_book) {
        Ok(book) => (StatusCode::CREATED, Json(book)).into_response(),
        Err(e) => {
            tracing::error!("Failed to create book: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Get book by UUID
///
/// Get a specific book by its UUID
#[utoipa::path(
    get,
    path = "/{book_id}",
    params(
        ("book_id" = Uuid, Path, description = "Book UUID")
    ),
    responses(
        (status = 200, description = "Book found", body = Book),
        (status = 404, description = "Book not found"),
        (status = 400, description = "Invalid UUID format")
    ),
    tag = super::BOOK_TAG
)]
async fn get_book(State(state): State<AppState>, Path(book_id): Path<Uuid>) -> impl IntoResponse {
    match state.library().book_repo.get(&book_id) {
        Ok(Some(book)) => Json(book).into_response(),
        Ok(None) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            tracing::error!("Failed to get book {book_id}: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Update book by UUID
///
/// Update an existing book. Only provided fields are changed.
#[utoipa::path(
    put,
    path = "/{book_id}",
    params(
        ("book_id" = Uuid, Path, description = "Book UUID")
    ),
    request_body = UpdateBookRequest,
    responses(
        (status = 200, description = "Book updated successfully", body = Book),
        (status = 400, description = "Book not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = super::BOOK_TAG
)]
async fn put_book(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
    Json(payload): Json<UpdateBookRequest>,
) -> impl IntoResponse {
    let patch = BookPatch {
        author: payload.author,
        title: payload.title,
        description: payload.description,
    };

    match state.library().book_repo.update_book(&book_id, patch) {
        Ok(Some(book)) => Json(book).into_response(),
        // Updating a missing id is a bad request, not a 404
        Ok(None) => (StatusCode::BAD_REQUEST, "Book not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to update book {book_id}: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Delete book by UUID
///
/// Delete a specific book by its UUID, returning the removed record
#[utoipa::path(
    delete,
    path = "/{book_id}",
    params(
        ("book_id" = Uuid, Path, description = "Book UUID")
    ),
    responses(
        (status = 200, description = "Book deleted successfully", body = Book),
        (status = 400, description = "Book not found"),
        (status = 500, description = "Internal server error")
    ),
    tag = super::BOOK_TAG
)]
async fn delete_book(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.library().book_repo.delete(&book_id) {
        Ok(Some(book)) => Json(book).into_response(),
        Ok(None) => (StatusCode::BAD_REQUEST, "Book not found").into_response(),
        Err(e) => {
            tracing::error!("Failed to delete book {book_id}: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// Get a book's reviews
///
/// Get all reviews referencing the given book UUID. The book itself does not
/// have to exist; an unknown id yields an empty array.
#[utoipa::path(
    get,
    path = "/{book_id}/reviews",
    params(
        ("book_id" = Uuid, Path, description = "Book UUID")
    ),
    responses(
        (status = 200, description = "Reviews found", body = Vec<Review>),
        (status = 500, description = "Internal server error")
    ),
    tag = super::BOOK_TAG
)]
async fn get_book_reviews(
    State(state): State<AppState>,
    Path(book_id): Path<Uuid>,
) -> impl IntoResponse {
    match state.library().review_repo.reviews_for_book(&book_id) {
        Ok(reviews) => Json(reviews).into_response(),
        Err(e) => {
            tracing::error!("Failed to list reviews for book {book_id}: {e}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests;
