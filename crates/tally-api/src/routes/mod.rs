//! Route handlers for the tally API
//!
//! Structure:
//! - entries: JSON entry collection API (list, create, delete, reset)

pub mod entries;

pub use entries::{api_create_entry, api_delete_entry, api_list_entries, api_reset_entries};
