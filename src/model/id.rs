//! Record identifiers, parsed per schema id kind.

use std::fmt;

use serde_json::Value;
use uuid::Uuid;

use crate::error::ApiError;

/// Id representation an entity's backend uses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum IdKind {
    Int,
    Uuid,
    Text,
}

/// Server-assigned identity of a persisted record. Absent until the first
/// save; immutable once set.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum RecordId {
    Int(i64),
    Uuid(Uuid),
    Text(String),
}

impl RecordId {
    pub fn parse(raw: &str, kind: IdKind) -> Result<Self, ApiError> {
        match kind {
            IdKind::Int => raw
                .parse::<i64>()
                .map(RecordId::Int)
                .map_err(|_| ApiError::InvalidId(raw.to_string())),
            IdKind::Uuid => Uuid::parse_str(raw)
                .map(RecordId::Uuid)
                .map_err(|_| ApiError::InvalidId(raw.to_string())),
            IdKind::Text => {
                if raw.is_empty() {
                    Err(ApiError::InvalidId(raw.to_string()))
                } else {
                    Ok(RecordId::Text(raw.to_string()))
                }
            }
        }
    }

    /// Id carried by a fetched payload, when the `id` key parses as `kind`.
    pub fn from_value(value: &Value, kind: IdKind) -> Option<Self> {
        let raw = value.get("id")?;
        match kind {
            IdKind::Int => raw
                .as_i64()
                .or_else(|| raw.as_str().and_then(|s| s.parse().ok()))
                .map(RecordId::Int),
            IdKind::Uuid => raw
                .as_str()
                .and_then(|s| Uuid::parse_str(s).ok())
                .map(RecordId::Uuid),
            IdKind::Text => raw
                .as_str()
                .filter(|s| !s.is_empty())
                .map(|s| RecordId::Text(s.to_string())),
        }
    }
}

impl From<i64> for RecordId {
    fn from(raw: i64) -> Self {
        RecordId::Int(raw)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Int(n) => write!(f, "{n}"),
            RecordId::Uuid(u) => write!(f, "{u}"),
            RecordId::Text(s) => f.write_str(s),
        }
    }
}
