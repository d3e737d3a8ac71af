use serde::{Deserialize, Serialize};
use store_adapter::store::StoreError;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::repository::{EntityRepo, now_ms};

pub type BookId = Uuid;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Book {
    /// Assigned at creation, immutable thereafter
    #[schema(value_type = String, format = Uuid)]
    pub id: BookId,
    pub author: String,
    pub title: String,
    pub description: String,
    /// Milliseconds since epoch, set once at creation
    pub created_at: i64,
    /// Milliseconds since epoch, refreshed on every successful update
    pub updated_at: i64,
}

/// Fully populated creation input, validated at the HTTP boundary.
#[derive(Debug, Clone)]
pub struct NewBook {
    pub author: String,
    pub title: String,
    pub description: String,
}

/// Field overrides for a merge-update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct BookPatch {
    pub author: Option<String>,
    pub title: Option<String>,
    pub description: Option<String>,
}

pub type BookRepo = EntityRepo<Book>;

pub trait BookRepoExt {
    /// Creates a book under a freshly generated id
    /// # Errors
    /// - Returns `StoreError` if the store fails
    fn create_book(&self, new: NewBook) -> Result<Book, StoreError>;
    /// Merges `patch` over the stored book and refreshes `updated_at`;
    /// `None` if the id is not present
    /// # Errors
    /// - Returns `StoreError` if the store fails
    fn update_book(&self, id: &BookId, patch: BookPatch) -> Result<Option<Book>, StoreError>;
}

impl BookRepoExt for BookRepo {
    fn create_book(&self, new: NewBook) -> Result<Book, StoreError> {
        // One clock read so created_at == updated_at on fresh records
        let now = now_ms();
        let book = Book {
            id: Uuid::new_v4(),
            author: new.author,
            title: new.title,
            description: new.description,
            created_at: now,
            updated_at: now,
        };

        let _guard = self.lock_writes();
        self.store.insert(&book.id.to_string(), &book)?;

        Ok(book)
    }

    fn update_book(&self, id: &BookId, patch: BookPatch) -> Result<Option<Book>, StoreError> {
        let _guard = self.lock_writes();

        let Some(mut book) = self.store.get(&id.to_string())? else {
            return Ok(None);
        };

        if let Some(author) = patch.author {
            book.author = author;
        }
        if let Some(title) = patch.title {
            book.title = title;
        }
        if let Some(description) = patch.description {
            book.description = description;
        }
        book.updated_at = now_ms();

        self.store.insert(&book.id.to_string(), &book)?;

        Ok(Some(book))
    }
}
