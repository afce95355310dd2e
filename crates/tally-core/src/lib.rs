//! Core entry storage and amount normalization for tally
//!
//! The collection of expense entries lives in a single JSON document on
//! disk. This crate owns the entry model, the free-form amount
//! normalizer, and the file-backed store the HTTP handlers talk to.

pub mod amount;
pub mod error;
pub mod models;
pub mod store;

pub use amount::normalize_amount;
pub use error::{StoreError, StoreResult};
pub use models::{total_of, Entry};
pub use store::{EntryStore, JsonFileStore, StoreRef};
