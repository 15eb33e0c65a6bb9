//! Record list lifecycle: load, paginate, act on rows.

use std::collections::HashMap;
use std::ops::Range;

use serde_json::Value;

use crate::api::{fetch_feed, RecordApi};
use crate::error::ApiError;
use crate::model::{RecordId, Status, StatusAction};
use crate::routes::Route;
use crate::schema::{EntityConfig, FieldPath};
use crate::session::form::display_value;
use crate::session::pager::Pager;
use crate::transport::HttpTransport;

/// Whole-screen state. Failure is explicit and carries the error so the
/// caller can show it and offer a reload.
#[derive(Debug, Default)]
pub enum LoadState {
    #[default]
    Loading,
    Ready,
    Failed(ApiError),
}

/// Entries a row's action menu can offer.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RowAction {
    View,
    Edit,
    Delete,
    Validate,
    Transform,
}

/// Where a pointer-down lands, for menu dismissal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerTarget {
    MenuToggle(usize),
    MenuItem,
    Outside,
}

/// List column handle: the status column or a schema field.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ListColumn {
    Status,
    Field(FieldPath),
}

pub struct ListSession<'c> {
    entity: &'c EntityConfig,
    state: LoadState,
    rows: Vec<Value>,
    lookup: HashMap<String, String>,
    pager: Pager,
    open_menu: Option<usize>,
    pending_delete: Option<RecordId>,
}

impl<'c> ListSession<'c> {
    pub fn new(entity: &'c EntityConfig) -> Self {
        Self {
            entity,
            state: LoadState::Loading,
            rows: Vec::new(),
            lookup: HashMap::new(),
            pager: Pager::new(),
            open_menu: None,
            pending_delete: None,
        }
    }

    pub fn entity(&self) -> &EntityConfig {
        self.entity
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_ready(&self) -> bool {
        matches!(self.state, LoadState::Ready)
    }

    /// Initial fetch; same as `reload`.
    pub async fn open(&mut self, transport: &HttpTransport) {
        self.reload(transport).await;
    }

    /// Fetch the rows and, where the schema declares a lookup join, the feed
    /// behind it. Session state only changes once every fetch succeeded, so
    /// a failure never leaves half a screen.
    pub async fn reload(&mut self, transport: &HttpTransport) {
        match self.fetch_all(transport).await {
            Ok((rows, lookup)) => {
                self.pager.set_total(rows.len());
                self.rows = rows;
                self.lookup = lookup;
                self.state = LoadState::Ready;
            }
            Err(error) => {
                tracing::error!(entity = self.entity.path_segment, %error, "list fetch failed");
                self.state = LoadState::Failed(error);
            }
        }
    }

    async fn fetch_all(
        &self,
        transport: &HttpTransport,
    ) -> Result<(Vec<Value>, HashMap<String, String>), ApiError> {
        let rows = RecordApi::list(transport, self.entity).await?;
        let lookup = match &self.entity.lookup {
            Some(join) => fetch_feed(transport, join.feed)
                .await?
                .into_iter()
                .map(|option| (option.value, option.label))
                .collect(),
            None => HashMap::new(),
        };
        Ok((rows, lookup))
    }

    pub fn rows(&self) -> &[Value] {
        &self.rows
    }

    pub fn row(&self, index: usize) -> Option<&Value> {
        self.rows.get(index)
    }

    pub fn pager(&self) -> &Pager {
        &self.pager
    }

    pub fn set_page(&mut self, page: usize) {
        self.pager.set_page(page);
    }

    pub fn set_page_size(&mut self, size: usize) -> bool {
        self.pager.set_page_size(size)
    }

    pub fn next_page(&mut self) {
        self.pager.next_page();
    }

    pub fn prev_page(&mut self) {
        self.pager.prev_page();
    }

    /// Absolute row indices of the current page.
    pub fn page_indices(&self) -> Range<usize> {
        self.pager.slice()
    }

    pub fn page_rows(&self) -> &[Value] {
        &self.rows[self.pager.slice()]
    }

    /// Columns in display order: status first where listed, then the listed
    /// schema fields.
    pub fn columns(&self) -> Vec<ListColumn> {
        let mut columns = Vec::new();
        if self.entity.status_listed {
            columns.push(ListColumn::Status);
        }
        columns.extend(self.entity.listed_fields().map(|f| ListColumn::Field(f.path)));
        columns
    }

    /// Display text of one cell. Foreign ids go through the lookup join;
    /// nested paths (the accountant address) are flattened.
    pub fn cell(&self, index: usize, column: ListColumn) -> String {
        let Some(row) = self.rows.get(index) else {
            return String::new();
        };
        match column {
            ListColumn::Status => self
                .entity
                .status_field
                .and_then(|key| row.get(key))
                .and_then(Value::as_str)
                .unwrap_or_default()
                .to_string(),
            ListColumn::Field(path) => {
                let raw = path.value_in(row).map(display_value).unwrap_or_default();
                if let Some(join) = &self.entity.lookup {
                    if join.field == path {
                        if let Some(label) = self.lookup.get(&raw) {
                            return label.clone();
                        }
                    }
                }
                raw
            }
        }
    }

    fn row_status(&self, index: usize) -> Option<Status> {
        let key = self.entity.status_field?;
        self.rows
            .get(index)?
            .get(key)?
            .as_str()
            .and_then(Status::from_wire)
    }

    fn row_id(&self, index: usize) -> Option<RecordId> {
        self.rows
            .get(index)
            .and_then(|row| RecordId::from_value(row, self.entity.id_kind))
    }

    /// Visible actions for one row. Status-gated entries are derived from
    /// the transition table and are absent, not disabled, when illegal.
    pub fn row_actions(&self, index: usize) -> Vec<RowAction> {
        if self.rows.get(index).is_none() {
            return Vec::new();
        }
        let mut actions = vec![RowAction::View];
        if self.entity.edit_in_list {
            actions.push(RowAction::Edit);
        }
        actions.push(RowAction::Delete);
        if let Some(status) = self.row_status(index) {
            for action in self.entity.status_actions {
                if status.allows(*action) {
                    actions.push(match action {
                        StatusAction::Validate => RowAction::Validate,
                        StatusAction::Transform => RowAction::Transform,
                    });
                }
            }
        }
        actions
    }

    pub fn add(&self) -> Route {
        Route::Form {
            kind: self.entity.kind,
            id: None,
            edit: false,
        }
    }

    pub fn view_row(&self, index: usize) -> Option<Route> {
        Some(Route::Form {
            kind: self.entity.kind,
            id: Some(self.row_id(index)?),
            edit: false,
        })
    }

    pub fn edit_row(&self, index: usize) -> Option<Route> {
        if !self.entity.edit_in_list {
            return None;
        }
        Some(Route::Form {
            kind: self.entity.kind,
            id: Some(self.row_id(index)?),
            edit: true,
        })
    }

    pub fn transform_row(&self, index: usize) -> Option<Route> {
        if !self.entity.status_actions.contains(&StatusAction::Transform) {
            return None;
        }
        if !self.row_status(index)?.allows(StatusAction::Transform) {
            return None;
        }
        Some(Route::QuotationTransform {
            id: self.row_id(index)?,
        })
    }

    /// Fire the validate action and refetch in place; no navigation. A no-op
    /// for rows where the action is not offered.
    pub async fn validate_row(
        &mut self,
        transport: &HttpTransport,
        index: usize,
    ) -> Result<(), ApiError> {
        if !self.entity.status_actions.contains(&StatusAction::Validate) {
            return Ok(());
        }
        let Some(status) = self.row_status(index) else {
            return Ok(());
        };
        if !status.allows(StatusAction::Validate) {
            return Ok(());
        }
        let Some(id) = self.row_id(index) else {
            return Ok(());
        };
        self.open_menu = None;
        RecordApi::validate_record(transport, self.entity, &id).await?;
        self.reload(transport).await;
        Ok(())
    }

    /// Stage a delete: remember the target and open the dialog. Nothing goes
    /// over the wire yet.
    pub fn request_delete(&mut self, index: usize) {
        self.pending_delete = self.row_id(index);
        self.open_menu = None;
    }

    pub fn dialog_open(&self) -> bool {
        self.pending_delete.is_some()
    }

    pub fn pending_delete(&self) -> Option<&RecordId> {
        self.pending_delete.as_ref()
    }

    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Issue the DELETE for the confirmed target, close the dialog and
    /// refetch. On failure the dialog stays open for a retry.
    pub async fn confirm_delete(&mut self, transport: &HttpTransport) -> Result<(), ApiError> {
        let Some(id) = self.pending_delete.clone() else {
            return Ok(());
        };
        if let Err(error) = RecordApi::delete(transport, self.entity, &id).await {
            tracing::error!(entity = self.entity.path_segment, %id, %error, "delete failed");
            return Err(error);
        }
        self.pending_delete = None;
        self.reload(transport).await;
        Ok(())
    }

    pub fn menu_row(&self) -> Option<usize> {
        self.open_menu
    }

    /// At most one menu is open; toggling the open row closes it.
    pub fn toggle_menu(&mut self, index: usize) {
        self.open_menu = if self.open_menu == Some(index) {
            None
        } else {
            Some(index)
        };
    }

    /// Document-level dismissal: only a pointer-down outside the menu and
    /// its items closes it.
    pub fn pointer_down(&mut self, target: PointerTarget) {
        if matches!(target, PointerTarget::Outside) {
            self.open_menu = None;
        }
    }
}
