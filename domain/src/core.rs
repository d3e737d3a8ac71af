use std::path::Path;
use std::sync::Arc;

use in_memory_adapter::InMemoryStore;
use store_adapter::store::{BoxedStore, RedbStore, StoreError, open_database};
use tracing::info;

use crate::book::{Book, BookRepo};
use crate::repository::EntityRepo;
use crate::review::{Review, ReviewRepo};

/// The two entity repositories over their injected stores. Constructed once
/// at startup and handed to the HTTP layer; there is no global store state.
#[derive(Debug)]
pub struct Library {
    pub book_repo: BookRepo,
    pub review_repo: ReviewRepo,
}

impl Library {
    #[must_use]
    pub fn new(books: BoxedStore<Book>, reviews: BoxedStore<Review>) -> Self {
        Self {
            book_repo: EntityRepo::new(books),
            review_repo: EntityRepo::new(reviews),
        }
    }

    /// Open the persistent library under `data_dir`: one database file, one
    /// table per entity store, no coupling between the two
    /// # Errors
    /// - Returns `StoreError` if the database cannot be opened
    pub fn open(data_dir: &Path) -> Result<Self, StoreError> {
        let db = open_database(&data_dir.join("bookshelf.redb"))?;
        let books = RedbStore::new(Arc::clone(&db), "books")?;
        let reviews = RedbStore::new(db, "reviews")?;
        info!("Library opened under {}", data_dir.display());

        Ok(Self::new(Box::new(books), Box::new(reviews)))
    }

    /// Isolated, non-durable library for tests.
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(
            Box::new(InMemoryStore::new()),
            Box::new(InMemoryStore::new()),
        )
    }
}
