//! In-memory storage backend.
//!
//! This module provides an in-memory implementation of `StarSchemaRepository`
//! that stores every table in a `Vec` wrapped in `Arc<RwLock<_>>`. Used by
//! `--backend memory` and by the pipeline tests.
//!
//! # Example
//!
//! ```rust,ignore
//! use starschema::storage::inmemory::InMemoryRepository;
//!
//! let repo = InMemoryRepository::new();
//! repo.create_tables().await?;
//! ```

mod repository;

pub use repository::InMemoryRepository;
