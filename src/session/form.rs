//! Record form lifecycle: draft, validation, submit.
//!
//! A `FormSession` is the headless contract of one record form: it owns the
//! draft strings the inputs bind to, the validated flag that gates visual
//! states, the reference feeds behind select fields, and the submit path
//! that turns the draft into a wire body.

use std::collections::{BTreeMap, HashMap};

use serde_json::{Map, Value};

use crate::api::{fetch_feed, FeedOption, RecordApi};
use crate::error::{ApiError, SchemaError};
use crate::model::{Quotation, RecordId, Status};
use crate::routes::Route;
use crate::schema::{AfterSave, EntityConfig, FeedKind, FieldKind, FieldPath};
use crate::session::validate::{field_problem, visual_state, FieldState};
use crate::transport::HttpTransport;

/// What the primary button does in the current state.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PrimaryAction {
    Save,
    EnterEdit,
}

/// Result of a submit attempt.
#[derive(Debug)]
pub enum SubmitOutcome {
    /// Persisted; navigate to the entity's after-save target.
    Saved(Route),
    /// Client-side validation failed; no request was issued.
    Rejected,
    /// The backend refused or the wire failed; the draft is intact and the
    /// submit can be retried.
    Failed(ApiError),
}

/// Loading state of one reference feed.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FeedState {
    #[default]
    Idle,
    Loaded,
    Failed,
}

#[derive(Clone, Debug, Default)]
struct FeedSlot {
    state: FeedState,
    options: Vec<FeedOption>,
}

/// Which half of a quotation line an edit targets.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LineField {
    Product,
    Quantity,
}

/// Draft of one product line. `label` mirrors the selected product and is
/// display-only.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LineDraft {
    pub product_id: String,
    pub quantity: String,
    pub label: String,
}

pub struct FormSession<'c> {
    entity: &'c EntityConfig,
    id: Option<RecordId>,
    edit: bool,
    validated: bool,
    draft: BTreeMap<FieldPath, String>,
    status: Option<Status>,
    lines: Vec<LineDraft>,
    feeds: HashMap<FeedKind, FeedSlot>,
}

impl<'c> FormSession<'c> {
    /// New records open editable; existing ones open read-only unless the
    /// caller passes the edit override (the `editMode=true` query).
    pub fn new(entity: &'c EntityConfig, id: Option<RecordId>, edit_override: Option<bool>) -> Self {
        let edit = id.is_none() || edit_override == Some(true);
        let draft = entity
            .fields
            .iter()
            .map(|f| (f.path, String::new()))
            .collect();
        let lines = if entity.has_lines {
            vec![LineDraft::default()]
        } else {
            Vec::new()
        };
        let feeds = entity
            .feeds()
            .into_iter()
            .map(|kind| (kind, FeedSlot::default()))
            .collect();
        Self {
            entity,
            id,
            edit,
            validated: false,
            draft,
            status: entity.status_field.map(|_| Status::Saved),
            lines,
            feeds,
        }
    }

    pub fn entity(&self) -> &EntityConfig {
        self.entity
    }

    pub fn id(&self) -> Option<&RecordId> {
        self.id.as_ref()
    }

    pub fn is_edit(&self) -> bool {
        self.edit
    }

    pub fn is_validated(&self) -> bool {
        self.validated
    }

    pub fn status(&self) -> Option<Status> {
        self.status
    }

    /// Fetch the record behind `id` and replace the draft wholesale. A
    /// failure is returned rather than leaving a silently empty form.
    pub async fn load(&mut self, transport: &HttpTransport) -> Result<(), ApiError> {
        let Some(id) = &self.id else {
            return Ok(());
        };
        let record = RecordApi::fetch(transport, self.entity, id).await?;
        self.apply_record(&record)
    }

    fn apply_record(&mut self, record: &Value) -> Result<(), ApiError> {
        for field in &self.entity.fields {
            let value = field
                .path
                .value_in(record)
                .map(display_value)
                .unwrap_or_default();
            self.draft.insert(field.path, value);
        }
        if let Some(key) = self.entity.status_field {
            if let Some(status) = record.get(key).and_then(Value::as_str).and_then(Status::from_wire) {
                self.status = Some(status);
            }
        }
        if self.entity.has_lines {
            let quotation: Quotation = serde_json::from_value(record.clone())?;
            self.lines = quotation
                .quotation_products
                .into_iter()
                .map(|line| LineDraft {
                    product_id: line.product_id.to_string(),
                    quantity: line.quantity.to_string(),
                    label: line.label.unwrap_or_default(),
                })
                .collect();
            if self.lines.is_empty() {
                self.lines.push(LineDraft::default());
            }
        }
        Ok(())
    }

    /// Load every feed the entity uses. Each fetch fails soft.
    pub async fn load_feeds(&mut self, transport: &HttpTransport) {
        for kind in self.entity.feeds() {
            self.load_feed(transport, kind).await;
        }
    }

    /// Fail-soft single-feed load: a broken feed logs a warning and leaves
    /// empty options in a `Failed` state the caller can retry.
    pub async fn load_feed(&mut self, transport: &HttpTransport, kind: FeedKind) {
        if !self.feeds.contains_key(&kind) {
            return;
        }
        match fetch_feed(transport, kind).await {
            Ok(options) => {
                if let Some(slot) = self.feeds.get_mut(&kind) {
                    slot.options = options;
                    slot.state = FeedState::Loaded;
                }
                if kind == FeedKind::Customers {
                    self.autofill_customer();
                }
            }
            Err(error) => {
                tracing::warn!(feed = ?kind, %error, "reference feed unavailable");
                if let Some(slot) = self.feeds.get_mut(&kind) {
                    slot.options.clear();
                    slot.state = FeedState::Failed;
                }
            }
        }
    }

    fn autofill_customer(&mut self) {
        if !self.entity.auto_customer {
            return;
        }
        let path = FieldPath::top("customerId");
        if !self.field_value(path).is_empty() {
            return;
        }
        let first = self
            .feeds
            .get(&FeedKind::Customers)
            .and_then(|slot| slot.options.first())
            .map(|option| option.value.clone());
        if let Some(value) = first {
            self.draft.insert(path, value);
        }
    }

    pub fn feed_state(&self, kind: FeedKind) -> FeedState {
        self.feeds.get(&kind).map(|s| s.state).unwrap_or_default()
    }

    pub fn feed_options(&self, kind: FeedKind) -> &[FeedOption] {
        self.feeds
            .get(&kind)
            .map(|s| s.options.as_slice())
            .unwrap_or(&[])
    }

    pub fn set_field(
        &mut self,
        path: FieldPath,
        value: impl Into<String>,
    ) -> Result<(), SchemaError> {
        if self.entity.field(path).is_none() {
            return Err(SchemaError::UnknownField {
                entity: self.entity.path_segment,
                path: path.to_string(),
            });
        }
        self.draft.insert(path, value.into());
        Ok(())
    }

    pub fn field_value(&self, path: FieldPath) -> &str {
        self.draft.get(&path).map(String::as_str).unwrap_or("")
    }

    pub fn field_state(&self, path: FieldPath) -> FieldState {
        match self.entity.field(path) {
            Some(spec) => visual_state(self.validated, spec, self.field_value(path)),
            None => FieldState::Neutral,
        }
    }

    pub fn lines(&self) -> &[LineDraft] {
        &self.lines
    }

    pub fn add_line(&mut self) -> Result<(), SchemaError> {
        self.ensure_lines()?;
        self.lines.push(LineDraft::default());
        Ok(())
    }

    /// The remove affordance is disabled while only one line remains.
    pub fn can_remove_line(&self) -> bool {
        self.lines.len() > 1
    }

    /// Returns whether a line was actually removed.
    pub fn remove_line(&mut self, index: usize) -> Result<bool, SchemaError> {
        self.ensure_lines()?;
        if !self.can_remove_line() || index >= self.lines.len() {
            return Ok(false);
        }
        self.lines.remove(index);
        Ok(true)
    }

    /// Edits one half of a line; picking a product also refreshes its label
    /// from the product feed.
    pub fn set_line(
        &mut self,
        index: usize,
        which: LineField,
        value: impl Into<String>,
    ) -> Result<(), SchemaError> {
        self.ensure_lines()?;
        let value = value.into();
        let label = match which {
            LineField::Product => self.product_label(&value),
            LineField::Quantity => None,
        };
        if let Some(line) = self.lines.get_mut(index) {
            match which {
                LineField::Product => {
                    line.product_id = value;
                    line.label = label.unwrap_or_default();
                }
                LineField::Quantity => line.quantity = value,
            }
        }
        Ok(())
    }

    pub fn line_state(&self, index: usize) -> (FieldState, FieldState) {
        if !self.validated {
            return (FieldState::Neutral, FieldState::Neutral);
        }
        match self.lines.get(index) {
            Some(line) => {
                let product = if line.product_id.is_empty() {
                    FieldState::Invalid
                } else {
                    FieldState::Valid
                };
                let quantity = if line.quantity.parse::<f64>().is_ok() {
                    FieldState::Valid
                } else {
                    FieldState::Invalid
                };
                (product, quantity)
            }
            None => (FieldState::Neutral, FieldState::Neutral),
        }
    }

    fn ensure_lines(&self) -> Result<(), SchemaError> {
        if self.entity.has_lines {
            Ok(())
        } else {
            Err(SchemaError::LinesUnsupported(self.entity.path_segment))
        }
    }

    fn product_label(&self, product_id: &str) -> Option<String> {
        self.feeds
            .get(&FeedKind::Products)?
            .options
            .iter()
            .find(|option| option.value == product_id)
            .map(|option| option.label.clone())
    }

    fn draft_valid(&self) -> bool {
        let fields_ok = self
            .entity
            .fields
            .iter()
            .all(|spec| field_problem(spec, self.field_value(spec.path)).is_none());
        let lines_ok = !self.entity.has_lines
            || self
                .lines
                .iter()
                .all(|line| !line.product_id.is_empty() && line.quantity.parse::<f64>().is_ok());
        fields_ok && lines_ok
    }

    /// Validate, then create or update depending on id presence. Validation
    /// failure never issues a wire call.
    pub async fn submit(&mut self, transport: &HttpTransport) -> SubmitOutcome {
        self.validated = true;
        if !self.draft_valid() {
            return SubmitOutcome::Rejected;
        }
        let body = self.build_body();
        let result = match &self.id {
            Some(id) => RecordApi::update(transport, self.entity, id, &body).await,
            None => RecordApi::create(transport, self.entity, &body).await,
        };
        match result {
            Ok(()) => SubmitOutcome::Saved(self.after_save_route()),
            Err(error) => {
                tracing::error!(entity = self.entity.path_segment, %error, "submit failed");
                SubmitOutcome::Failed(error)
            }
        }
    }

    fn after_save_route(&self) -> Route {
        match self.entity.after_save {
            AfterSave::Home => Route::Home,
            AfterSave::OwnList => Route::List(self.entity.kind),
        }
    }

    fn build_body(&self) -> Value {
        let mut root = Map::new();
        if let (Some(key), Some(status)) = (self.entity.status_field, self.status) {
            root.insert(key.to_string(), Value::String(status.as_wire().to_string()));
        }
        for field in &self.entity.fields {
            let raw = self.field_value(field.path);
            if raw.is_empty() {
                continue;
            }
            let value = wire_value(field.kind, raw);
            match field.path.leaf {
                None => {
                    root.insert(field.path.root.to_string(), value);
                }
                Some(leaf) => {
                    let nested = root
                        .entry(field.path.root.to_string())
                        .or_insert_with(|| Value::Object(Map::new()));
                    if let Value::Object(map) = nested {
                        map.insert(leaf.to_string(), value);
                    }
                }
            }
        }
        if self.entity.has_lines {
            let pairs = self
                .lines
                .iter()
                .map(|line| {
                    let mut pair = Map::new();
                    pair.insert("productId".to_string(), number_value(&line.product_id));
                    pair.insert("quantity".to_string(), number_value(&line.quantity));
                    Value::Object(pair)
                })
                .collect();
            root.insert("productQuantities".to_string(), Value::Array(pairs));
        }
        Value::Object(root)
    }

    pub fn primary_action(&self) -> PrimaryAction {
        if self.id.is_some() && !self.edit {
            PrimaryAction::EnterEdit
        } else {
            PrimaryAction::Save
        }
    }

    pub fn toggle_edit(&mut self) {
        self.edit = !self.edit;
    }

    /// Cancel target: back to the list for existing records, home for new.
    pub fn cancel(&self) -> Route {
        if self.id.is_some() {
            Route::List(self.entity.kind)
        } else {
            Route::Home
        }
    }
}

/// Draft string for a fetched JSON value, as an input would show it.
pub(crate) fn display_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        Value::Number(n) => n.to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Numbers go on the wire as numbers; anything unparseable stays a string.
pub(crate) fn number_value(raw: &str) -> Value {
    if let Ok(n) = raw.parse::<i64>() {
        return Value::from(n);
    }
    match raw.parse::<f64>().ok().and_then(serde_json::Number::from_f64) {
        Some(n) => Value::Number(n),
        None => Value::String(raw.to_string()),
    }
}

fn wire_value(kind: FieldKind, raw: &str) -> Value {
    match kind {
        FieldKind::Number => number_value(raw),
        FieldKind::Select(feed) if feed.is_id_valued() => number_value(raw),
        _ => Value::String(raw.to_string()),
    }
}
