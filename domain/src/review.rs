use serde::{Deserialize, Serialize};
use store_adapter::store::StoreError;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::book::BookId;
use crate::repository::{EntityRepo, now_ms};

pub type ReviewId = Uuid;

/// Number of reviews returned by the top-rated query.
pub const TOP_REVIEWS_LIMIT: usize = 10;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Assigned at creation, immutable thereafter
    #[schema(value_type = String, format = Uuid)]
    pub id: ReviewId,
    /// Reference to a book id. Not validated: a review may point to a book
    /// that does not exist
    #[schema(value_type = String, format = Uuid)]
    pub book_id: BookId,
    pub review: String,
    pub rating: f64,
    /// Milliseconds since epoch, set once at creation
    pub created_at: i64,
    /// Milliseconds since epoch, refreshed on every successful update
    pub updated_at: i64,
}

/// Fully populated creation input, validated at the HTTP boundary.
#[derive(Debug, Clone)]
pub struct NewReview {
    pub book_id: BookId,
    pub review: String,
    pub rating: f64,
}

/// Field overrides for a merge-update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ReviewPatch {
    pub book_id: Option<BookId>,
    pub review: Option<String>,
    pub rating: Option<f64>,
}

pub type ReviewRepo = EntityRepo<Review>;

pub trait ReviewRepoExt {
    /// Creates a review under a freshly generated id
    /// # Errors
    /// - Returns `StoreError` if the store fails
    fn create_review(&self, new: NewReview) -> Result<Review, StoreError>;
    /// Merges `patch` over the stored review and refreshes `updated_at`;
    /// `None` if the id is not present
    /// # Errors
    /// - Returns `StoreError` if the store fails
    fn update_review(&self, id: &ReviewId, patch: ReviewPatch)
    -> Result<Option<Review>, StoreError>;
    /// All reviews whose `book_id` equals `book_id`. Linear scan, no index
    /// # Errors
    /// - Returns `StoreError` if the store fails
    fn reviews_for_book(&self, book_id: &BookId) -> Result<Vec<Review>, StoreError>;
    /// The `n` highest-rated reviews, rating descending, ties in scan order
    /// # Errors
    /// - Returns `StoreError` if the store fails
    fn top_reviews(&self, n: usize) -> Result<Vec<Review>, StoreError>;
}

impl ReviewRepoExt for ReviewRepo {
    fn create_review(&self, new: NewReview) -> Result<Review, StoreError> {
        let now = now_ms();
        let review = Review {
            id: Uuid::new_v4(),
            book_id: new.book_id,
            review: new.review,
            rating: new.rating,
            created_at: now,
            updated_at: now,
        };

        let _guard = self.lock_writes();
        self.store.insert(&review.id.to_string(), &review)?;

        Ok(review)
    }

    fn update_review(
        &self,
        id: &ReviewId,
        patch: ReviewPatch,
    ) -> Result<Option<Review>, StoreError> {
        let _guard = self.lock_writes();

        let Some(mut review) = self.store.get(&id.to_string())? else {
            return Ok(None);
        };

        if let Some(book_id) = patch.book_id {
            review.book_id = book_id;
        }
        if let Some(body) = patch.review {
            review.review = body;
        }
        if let Some(rating) = patch.rating {
            review.rating = rating;
        }
        review.updated_at = now_ms();

        self.store.insert(&review.id.to_string(), &review)?;

        Ok(Some(review))
    }

    fn reviews_for_book(&self, book_id: &BookId) -> Result<Vec<Review>, StoreError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|review| review.book_id == *book_id)
            .collect())
    }

    fn top_reviews(&self, n: usize) -> Result<Vec<Review>, StoreError> {
        let mut reviews = self.get_all()?;
        // Stable sort keeps scan order for equal ratings
        reviews.sort_by(|a, b| b.rating.total_cmp(&a.rating));
        reviews.truncate(n);
        Ok(reviews)
    }
}
