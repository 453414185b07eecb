//! Adapters for external systems.
//!
//! Implementations of the domain ports: HTTP clients for the collaborator
//! services, SQLite for the session store mirror, and an in-process channel
//! gateway for broadcasts.

pub mod channel;
pub mod http;
pub mod sqlite;
