use domain::core::Library;
use std::sync::Arc;

/// Lightweight handle to the Library that can be cheaply cloned across threads.
/// Stores are internally synchronized and each repository carries its own
/// write lock, so handlers access the library without an outer mutex.
#[derive(Clone)]
pub struct LibraryHandle {
    inner: Arc<Library>,
}

impl LibraryHandle {
    pub fn new(library: Library) -> Self {
        Self {
            inner: Arc::new(library),
        }
    }

    /// Get a reference to the library
    pub fn library(&self) -> &Library {
        &self.inner
    }
}
