//! Entry data model

use chrono::Utc;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A single expense entry
///
/// Field names on the wire and on disk are camelCase. Every field is
/// defaulted on deserialization so a hand-edited entry file with missing
/// fields still lists instead of wiping the collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Entry {
    /// Unique entry id (unique within the collection)
    #[serde(default)]
    pub id: String,
    /// Normalized amount; the only field used in aggregation
    #[serde(default)]
    pub amount: f64,
    /// The user's original input text, trimmed; informational only
    #[serde(default)]
    pub raw_value: String,
    /// Free-text description, trimmed, may be empty
    #[serde(default)]
    pub label: String,
    /// Creation time in milliseconds since the Unix epoch
    #[serde(default)]
    pub created_at: i64,
}

impl Entry {
    /// Create a new entry stamped with the current time
    ///
    /// When the caller supplies no id (or an empty one), a UUID v4 is
    /// generated; collisions within one collection are not a practical
    /// concern at that rate.
    pub fn create(id: Option<String>, amount: f64, raw_value: &str, label: &str) -> Self {
        Self {
            id: id.filter(|s| !s.is_empty()).unwrap_or_else(generate_id),
            amount,
            raw_value: raw_value.trim().to_string(),
            label: label.trim().to_string(),
            created_at: Utc::now().timestamp_millis(),
        }
    }
}

/// Generate a collision-resistant entry id
pub fn generate_id() -> String {
    Uuid::new_v4().to_string()
}

/// Sum of entry amounts; non-finite values count as zero
pub fn total_of(entries: &[Entry]) -> f64 {
    entries
        .iter()
        .map(|e| if e.amount.is_finite() { e.amount } else { 0.0 })
        .sum()
}
