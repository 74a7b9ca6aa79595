use chrono::{SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// A named, user-owned ordered collection of book references.
///
/// Stored in DynamoDB with camelCase attribute names under the composite key
/// (`id`, `userId`). Timestamps are ISO-8601 strings with millisecond
/// precision, so lexicographic order matches chronological order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReadingList {
    pub id: String,
    pub user_id: String,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub book_ids: Vec<String>,
    // Defaulted so that a sparse record produced by updating a key that was
    // never created still deserializes.
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub updated_at: String,
}

/// Fields overwritten by an update, regardless of their prior values.
#[derive(Debug, Clone)]
pub struct ListUpdate {
    pub name: String,
    pub description: String,
    pub book_ids: Vec<String>,
    pub updated_at: String,
}

/// Current time as an ISO-8601 UTC string, e.g. `2026-08-26T12:00:00.000Z`.
pub fn iso_now() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}
