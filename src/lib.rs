//! Gescom SDK: schema-driven client library for the business-management
//! REST backend. Headless form and list sessions reproduce the record
//! lifecycle (draft, validate, submit, paginate, status actions) over a
//! typed entity catalog.

pub mod api;
pub mod config;
pub mod error;
pub mod model;
pub mod routes;
pub mod schema;
pub mod session;
pub mod transport;

pub use api::{fetch_feed, FeedOption, RecordApi};
pub use config::Config;
pub use error::{ApiError, SchemaError};
pub use model::{EntityKind, IdKind, RecordId, Status, StatusAction};
pub use routes::Route;
pub use schema::{Catalog, EntityConfig, FeedKind, FieldKind, FieldPath, FieldSpec};
pub use session::{
    FeedState, FieldState, FormSession, LineField, ListColumn, ListSession, LoadState, Pager,
    PointerTarget, PrimaryAction, RowAction, SubmitOutcome, TransformSession,
};
pub use transport::HttpTransport;
