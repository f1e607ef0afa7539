//! Functional core of the star schema ETL.
//!
//! Everything in this crate is pure: source records go in, dimension and
//! fact rows come out. Persistence is described by the
//! [`storage::StarSchemaRepository`] trait and implemented elsewhere.

pub mod serde;
pub mod source;
pub mod storage;
pub mod transform;
