pub mod book;
pub mod core;
pub mod repository;
pub mod review;

pub use store_adapter::store::{BoxedStore, Store, StoreError};
