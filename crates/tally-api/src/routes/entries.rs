//! Entry collection routes - list, create, delete, reset
//!
//! Every handler reads the collection at most once and writes at most
//! once; totals are computed over the in-memory collection from that
//! same read, never from a second one.

use crate::error::ApiError;
use crate::AppState;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tally_core::{normalize_amount, total_of, Entry};

/// Create-entry request body
///
/// `amount` may arrive as a JSON number or as text; the other fields are
/// text. An absent field and an explicit `null` are equivalent.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEntryRequest {
    #[serde(default)]
    pub amount: Option<Value>,
    #[serde(default)]
    pub raw_value: Option<String>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub id: Option<String>,
}

/// Response for `GET /api/entries`
#[derive(Debug, Serialize)]
pub struct EntriesResponse {
    pub entries: Vec<Entry>,
    pub total: f64,
}

/// Response for `POST /api/entries`
#[derive(Debug, Serialize)]
pub struct CreateEntryResponse {
    pub entry: Entry,
    pub total: f64,
}

/// Response for `DELETE /api/entries/:id`
#[derive(Debug, Serialize)]
pub struct TotalResponse {
    pub total: f64,
}

/// Response for `POST /api/entries/reset`
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: &'static str,
}

/// List all entries with their running total (JSON API)
pub async fn api_list_entries(
    State(state): State<AppState>,
) -> Result<Json<EntriesResponse>, ApiError> {
    let entries = state
        .store
        .read_all()
        .await
        .map_err(|e| ApiError::storage("Failed to read entries.", e))?;
    let total = total_of(&entries);
    Ok(Json(EntriesResponse { entries, total }))
}

/// Create an entry from a loosely-typed request body (JSON API)
pub async fn api_create_entry(
    State(state): State<AppState>,
    Json(body): Json<CreateEntryRequest>,
) -> Result<(StatusCode, Json<CreateEntryResponse>), ApiError> {
    // The text backing this entry: rawValue wins, then amount as text.
    let raw_text = body
        .raw_value
        .clone()
        .or_else(|| body.amount.as_ref().and_then(value_as_text));

    // A finite numeric amount is taken as-is; anything else goes through
    // normalization of the raw text.
    let amount = match body.amount {
        Some(Value::Number(ref n)) => n.as_f64().filter(|v| v.is_finite()),
        _ => None,
    }
    .or_else(|| normalize_amount(raw_text.as_deref()));

    let amount = match amount {
        Some(value) => value,
        None => return Err(ApiError::InvalidAmount),
    };

    let entry = Entry::create(
        body.id,
        amount,
        raw_text.as_deref().unwrap_or(""),
        body.label.as_deref().unwrap_or(""),
    );

    let entries = state
        .store
        .append(entry.clone())
        .await
        .map_err(|e| ApiError::storage("Failed to save entry.", e))?;
    let total = total_of(&entries);

    Ok((StatusCode::CREATED, Json(CreateEntryResponse { entry, total })))
}

/// Delete one entry by id (JSON API)
pub async fn api_delete_entry(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<TotalResponse>, ApiError> {
    let remaining = state
        .store
        .remove_by_id(&id)
        .await
        .map_err(|e| ApiError::storage("Failed to remove entry.", e))?;

    match remaining {
        Some(entries) => Ok(Json(TotalResponse {
            total: total_of(&entries),
        })),
        None => Err(ApiError::EntryNotFound),
    }
}

/// Clear the whole collection (JSON API)
pub async fn api_reset_entries(
    State(state): State<AppState>,
) -> Result<Json<MessageResponse>, ApiError> {
    state
        .store
        .clear()
        .await
        .map_err(|e| ApiError::storage("Failed to clear entries.", e))?;
    Ok(Json(MessageResponse {
        message: "All entries cleared.",
    }))
}

/// Textual form of a loosely-typed amount field
///
/// Numbers and booleans stringify the way a form value would read;
/// `null` counts as absent; structured values carry no useful text.
fn value_as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}
