//! Storage backend implementations.
//!
//! This module provides concrete implementations of the `StarSchemaRepository`
//! trait defined in `starschema_core::storage`. The in-memory backend is
//! always available; SQLite is compiled in via a feature flag.
//!
//! # Feature Flags
//!
//! - `sqlite` (default): SQLite storage backend using `rusqlite` and `tokio-rusqlite`
//!
//! # Examples
//!
//! Build with SQLite (default):
//! ```bash
//! cargo build -p starschema
//! ```
//!
//! Build with the in-memory backend only:
//! ```bash
//! cargo build -p starschema --no-default-features
//! ```

pub mod inmemory;

#[cfg(feature = "sqlite")]
pub mod sqlite;

pub use inmemory::InMemoryRepository;

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteRepository;
