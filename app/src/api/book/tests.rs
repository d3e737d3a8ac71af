#[cfg(test)]
mod tests {
    use axum::{
        Router,
        body::Body,
        http::{Method, Request, StatusCode},
    };
    use domain::book::Book;
    use domain::core::Library;
    use domain::review::{NewReview, Review, ReviewRepoExt};
    use serde_json::json;
    use tower::ServiceExt; // for `oneshot`
    use uuid::Uuid;

    use crate::api::book::{CreateBookRequest, UpdateBookRequest};
    use crate::services::LibraryHandle;

    // Each test gets its own isolated in-memory library
    fn create_test_setup() -> (Router, LibraryHandle) {
        let handle = LibraryHandle::new(Library::in_memory());
        let (router, _api) = crate::api::book::router(handle.clone()).split_for_parts();
        (router.with_state(handle.clone()), handle)
    }

    async fn post_book(app: &Router, author: &str, title: &str, description: &str) -> Book {
        let create_request = CreateBookRequest {
            author: author.to_string(),
            title: title.to_string(),
            description: description.to_string(),
        };

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&create_request).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::CREATED);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_get_books_empty() {
        let (app, _) = create_test_setup();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let books: Vec<Book> = serde_json::from_slice(&body).unwrap();
        assert!(books.is_empty());
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_book_crud_scenario() {
        let (app, _) = create_test_setup();

        // Create
        let created = post_book(&app, "Orwell", "1984", "Dystopia").await;
        assert_eq!(created.author, "Orwell");
        assert_eq!(created.title, "1984");
        assert_eq!(created.created_at, created.updated_at);

        // Read back
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri(format!("/{}", created.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let fetched: Book = serde_json::from_slice(&body).unwrap();
        assert_eq!(fetched.id, created.id);
        assert_eq!(fetched.title, "1984");

        // Update the title only
        let update_request = UpdateBookRequest {
            author: None,
            title: Some("Animal Farm".to_string()),
            description: None,
        };
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::PUT)
                    .uri(format!("/{}", created.id))
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&update_request).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let updated: Book = serde_json::from_slice(&body).unwrap();
        assert_eq!(updated.title, "Animal Farm");
        assert_eq!(updated.author, "Orwell");
        assert!(updated.updated_at >= updated.created_at);

        // Delete returns the removed record
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(format!("/{}", created.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let removed: Book = serde_json::from_slice(&body).unwrap();
        assert_eq!(removed.id, created.id);

        // Gone now
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri(format!("/{}", created.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_book_json_is_camel_case() {
        let (app, _) = create_test_setup();
        let created = post_book(&app, "Orwell", "1984", "Dystopia").await;

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri(format!("/{}", created.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let raw = String::from_utf8(body.to_vec()).unwrap();
        assert!(raw.contains("createdAt"));
        assert!(raw.contains("updatedAt"));
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_get_book_not_found() {
        let (app, _) = create_test_setup();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri(format!("/{}", Uuid::new_v4()))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_get_book_invalid_uuid() {
        let (app, _) = create_test_setup();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri("/invalid-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Axum should return 400 for invalid UUID format
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_put_book_missing_is_bad_request() {
        let (app, _) = create_test_setup();

        let update_request = UpdateBookRequest {
            author: None,
            title: Some("No such book".to_string()),
            description: None,
        };

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::PUT)
                    .uri(format!("/{}", Uuid::new_v4()))
                    .header("content-type", "application/json")
                    .body(Body::from(serde_json::to_string(&update_request).unwrap()))
                    .unwrap(),
            )
            .await
            .unwrap();

        // Mutation on a missing id is 400, unlike the 404 of a pure read
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_delete_book_missing_is_bad_request_twice() {
        let (app, _) = create_test_setup();
        let id = Uuid::new_v4();

        for _ in 0..2 {
            let response = app
                .clone()
                .oneshot(
                    Request::builder()
                        .method(Method::DELETE)
                        .uri(format!("/{}", id))
                        .body(Body::empty())
                        .unwrap(),
                )
                .await
                .unwrap();

            assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        }
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_post_book_invalid_data() {
        let (app, _) = create_test_setup();

        // Test with invalid JSON
        let invalid_json = r#"{"invalid": "json"#;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(invalid_json))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        // Test with missing required fields
        let incomplete_request = json!({
            "author": "Orwell"
            // Missing title, description
        });

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/")
                    .header("content-type", "application/json")
                    .body(Body::from(incomplete_request.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test(flavor = "multi_thread")]
    async fn test_get_book_reviews_filters_by_book() {
        let (app, handle) = create_test_setup();
        let book = post_book(&app, "Orwell", "1984", "Dystopia").await;

        // Seed reviews through the repository, one for another book
        let review_repo = &handle.library().review_repo;
        review_repo
            .create_review(NewReview {
                book_id: book.id,
                review: "Bleak".to_string(),
                rating: 5.0,
            })
            .unwrap();
        review_repo
            .create_review(NewReview {
                book_id: Uuid::new_v4(),
                review: "Unrelated".to_string(),
                rating: 1.0,
            })
            .unwrap();

        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::GET)
                    .uri(format!("/{}/reviews", book.id))
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let reviews: Vec<Review> = serde_json::from_slice(&body).unwrap();
        assert_eq!(reviews.len(), 1);
        assert_eq!(reviews[0].book_id, book.id);
        assert_eq!(reviews[0].review, "Bleak");
    }
}
