#![forbid(unsafe_code)]

pub mod demo;
pub mod repository;
pub mod session_store;
pub mod sqlite;

pub use repository::{Storage, StorageError};
pub use session_store::{InMemorySessionStore, SessionStore};
