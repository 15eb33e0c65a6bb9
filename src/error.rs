//! Typed errors for schema and transport layers.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("missing reference: {kind} '{id}'")]
    MissingReference { kind: &'static str, id: String },
    #[error("unknown field: {entity}.{path}")]
    UnknownField { entity: &'static str, path: String },
    #[error("duplicate path segment: {0}")]
    DuplicatePathSegment(String),
    #[error("duplicate route base: {0}")]
    DuplicateRouteBase(String),
    #[error("duplicate field: {0}")]
    DuplicateField(String),
    #[error("line items not supported: {0}")]
    LinesUnsupported(&'static str),
}

#[derive(Error, Debug)]
pub enum ApiError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error("request: {0}")]
    Request(#[from] reqwest::Error),
    #[error("{message}")]
    Backend { status: u16, message: String },
    #[error("decode: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("invalid record id: {0}")]
    InvalidId(String),
}

impl ApiError {
    /// HTTP status of a backend rejection, if this error carries one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Backend { status, .. } => Some(*status),
            _ => None,
        }
    }
}
