//! Configuration management infrastructure
//!
//! Hierarchical configuration using figment: YAML file loading, environment
//! variable overrides, and post-load validation of the typed config tree.

pub mod loader;

pub use loader::{ConfigError, ConfigLoader};
