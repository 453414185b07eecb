//! SQLite implementations backing the session store port.

pub mod connection;
pub mod session_store;

pub use connection::{create_pool, create_test_pool, ConnectionError};
pub use session_store::SqliteSessionStore;
