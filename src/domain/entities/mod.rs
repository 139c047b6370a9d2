//! Core domain entities representing the business data model.
//!
//! The service persists a single entity: a [`Link`] mapping a short code to a
//! target URL plus click-tracking metadata. Entities are plain data structures
//! without business logic.
//!
//! Creation uses a separate [`NewLink`] struct; the storage layer assigns the
//! identifier and timestamps.

pub mod link;

pub use link::{Link, NewLink};
