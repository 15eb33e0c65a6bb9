//! Quotation transform: the single-field payment-delay form.

use serde_json::{Map, Value};

use crate::api::RecordApi;
use crate::error::ApiError;
use crate::model::{RecordId, Status};
use crate::routes::Route;
use crate::schema::EntityConfig;
use crate::session::form::{number_value, SubmitOutcome};
use crate::session::validate::FieldState;
use crate::transport::HttpTransport;

/// Turns a validated quotation into an invoice. Reachable only through the
/// list's transform action, so it always has an id.
pub struct TransformSession<'c> {
    entity: &'c EntityConfig,
    id: RecordId,
    validated: bool,
    payment_delay: String,
    base: Map<String, Value>,
}

impl<'c> TransformSession<'c> {
    pub fn new(entity: &'c EntityConfig, id: RecordId) -> Self {
        Self {
            entity,
            id,
            validated: false,
            payment_delay: String::new(),
            base: Map::new(),
        }
    }

    pub fn id(&self) -> &RecordId {
        &self.id
    }

    /// Fetch the quotation; its full payload is resubmitted on transform.
    pub async fn load(&mut self, transport: &HttpTransport) -> Result<(), ApiError> {
        let record = RecordApi::fetch(transport, self.entity, &self.id).await?;
        if let Value::Object(map) = record {
            self.base = map;
        }
        Ok(())
    }

    pub fn set_payment_delay(&mut self, value: impl Into<String>) {
        self.payment_delay = value.into();
    }

    pub fn payment_delay(&self) -> &str {
        &self.payment_delay
    }

    pub fn payment_delay_state(&self) -> FieldState {
        if !self.validated {
            FieldState::Neutral
        } else if self.delay_ok() {
            FieldState::Valid
        } else {
            FieldState::Invalid
        }
    }

    fn delay_ok(&self) -> bool {
        !self.payment_delay.is_empty() && self.payment_delay.parse::<f64>().is_ok()
    }

    /// Submit with status forced to `TRANSFORMED`. Validation failure issues
    /// no call; success navigates back to the quotation list.
    pub async fn submit(&mut self, transport: &HttpTransport) -> SubmitOutcome {
        self.validated = true;
        if !self.delay_ok() {
            return SubmitOutcome::Rejected;
        }
        let mut body = self.base.clone();
        if let Some(key) = self.entity.status_field {
            body.insert(
                key.to_string(),
                Value::String(Status::Transformed.as_wire().to_string()),
            );
        }
        body.insert(
            "paymentDelay".to_string(),
            number_value(&self.payment_delay),
        );
        let result =
            RecordApi::transform(transport, self.entity, &self.id, &Value::Object(body)).await;
        match result {
            Ok(()) => SubmitOutcome::Saved(Route::List(self.entity.kind)),
            Err(error) => {
                tracing::error!(entity = self.entity.path_segment, %error, "transform failed");
                SubmitOutcome::Failed(error)
            }
        }
    }

    pub fn cancel(&self) -> Route {
        Route::List(self.entity.kind)
    }
}
