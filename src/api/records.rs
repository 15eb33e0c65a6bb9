//! Generic record operations against the backend REST API.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::model::{RecordId, StatusAction};
use crate::schema::EntityConfig;
use crate::transport::HttpTransport;

pub struct RecordApi;

impl RecordApi {
    /// Fetch the whole collection. The backend paginates nothing; slicing is
    /// the caller's job.
    pub async fn list(
        transport: &HttpTransport,
        entity: &EntityConfig,
    ) -> Result<Vec<Value>, ApiError> {
        let body = transport.get_json(&entity.collection_path()).await?;
        Ok(serde_json::from_value(body)?)
    }

    /// Fetch the collection into typed records.
    pub async fn list_as<T>(
        transport: &HttpTransport,
        entity: &EntityConfig,
    ) -> Result<Vec<T>, ApiError>
    where
        T: DeserializeOwned,
    {
        let body = transport.get_json(&entity.collection_path()).await?;
        Ok(serde_json::from_value(body)?)
    }

    pub async fn fetch(
        transport: &HttpTransport,
        entity: &EntityConfig,
        id: &RecordId,
    ) -> Result<Value, ApiError> {
        transport.get_json(&entity.record_path(id)).await
    }

    pub async fn create(
        transport: &HttpTransport,
        entity: &EntityConfig,
        body: &Value,
    ) -> Result<(), ApiError> {
        transport.post_json(&entity.collection_path(), body).await
    }

    /// Update one record; the path follows the entity's update style.
    pub async fn update(
        transport: &HttpTransport,
        entity: &EntityConfig,
        id: &RecordId,
        body: &Value,
    ) -> Result<(), ApiError> {
        transport.put_json(&entity.update_path(id), body).await
    }

    pub async fn delete(
        transport: &HttpTransport,
        entity: &EntityConfig,
        id: &RecordId,
    ) -> Result<(), ApiError> {
        transport.delete(&entity.record_path(id)).await
    }

    /// Move a record through the validate action. No body.
    pub async fn validate_record(
        transport: &HttpTransport,
        entity: &EntityConfig,
        id: &RecordId,
    ) -> Result<(), ApiError> {
        transport
            .put_empty(&entity.action_path(StatusAction::Validate, id))
            .await
    }

    /// Transform endpoint; the body carries the full record with its new
    /// status already set.
    pub async fn transform(
        transport: &HttpTransport,
        entity: &EntityConfig,
        id: &RecordId,
        body: &Value,
    ) -> Result<(), ApiError> {
        transport
            .put_json(&entity.action_path(StatusAction::Transform, id), body)
            .await
    }
}
