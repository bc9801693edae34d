#![forbid(unsafe_code)]

pub mod backend;
pub mod file;
pub mod repository;
pub mod sqlite;

pub use backend::{StorageBackend, StorageInitError};
pub use repository::{InMemoryRepository, QuestionRepository, Storage, StorageError};
