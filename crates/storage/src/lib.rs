#![forbid(unsafe_code)]

pub mod catalog_file;
pub mod repository;
pub mod sqlite;

pub use catalog_file::{CatalogLoadError, load_catalog};
pub use repository::{
    HistoryStore, InMemoryRepository, ResultRepository, Storage, StorageError, history_key,
};
