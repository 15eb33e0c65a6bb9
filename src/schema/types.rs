//! Schema types describing each entity's form and list surface.

use std::fmt;

use crate::model::{EntityKind, IdKind, RecordId, StatusAction};

/// One-level structured field path, e.g. `companyName` or `address.city`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FieldPath {
    pub root: &'static str,
    pub leaf: Option<&'static str>,
}

impl FieldPath {
    pub const fn top(root: &'static str) -> Self {
        Self { root, leaf: None }
    }

    pub const fn nested(root: &'static str, leaf: &'static str) -> Self {
        Self {
            root,
            leaf: Some(leaf),
        }
    }

    /// Value this path points at inside a record payload.
    pub fn value_in<'v>(&self, record: &'v serde_json::Value) -> Option<&'v serde_json::Value> {
        match self.leaf {
            Some(leaf) => record.get(self.root)?.get(leaf),
            None => record.get(self.root),
        }
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.leaf {
            Some(leaf) => write!(f, "{}.{}", self.root, leaf),
            None => f.write_str(self.root),
        }
    }
}

/// Reference data a select field draws its options from.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FeedKind {
    Cities,
    Countries,
    Clients,
    Products,
    Customers,
}

impl FeedKind {
    pub fn path(self) -> &'static str {
        match self {
            FeedKind::Cities => "/api/v1/cities",
            FeedKind::Countries => "/api/v1/countries",
            FeedKind::Clients => "/api/v1/clients",
            FeedKind::Products => "/api/v1/products",
            FeedKind::Customers => "/api/v1/customers",
        }
    }

    /// Feeds whose option values are record ids rather than display names.
    pub fn is_id_valued(self) -> bool {
        matches!(
            self,
            FeedKind::Clients | FeedKind::Products | FeedKind::Customers
        )
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Number,
    Email,
    Select(FeedKind),
}

#[derive(Clone, Debug)]
pub struct FieldSpec {
    pub path: FieldPath,
    pub kind: FieldKind,
    pub required: bool,
    /// Shown as a column on the list screen.
    pub listed: bool,
}

/// How updates address the backend.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum UpdateStyle {
    /// `PUT /api/v1/{segment}/{id}`
    ById,
    /// `PUT /api/v1/{segment}/update/{id}`
    ActionPath,
}

/// Where a successful save navigates.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum AfterSave {
    Home,
    OwnList,
}

/// Substitute a display label for a raw foreign id on list screens.
#[derive(Clone, Debug)]
pub struct LookupJoin {
    pub field: FieldPath,
    pub feed: FeedKind,
}

#[derive(Clone, Debug)]
pub struct EntityConfig {
    pub kind: EntityKind,
    /// API collection segment, e.g. `accountants` in `/api/v1/accountants`.
    pub path_segment: &'static str,
    pub id_kind: IdKind,
    pub fields: Vec<FieldSpec>,
    /// Wire key of the status field when the entity carries one.
    pub status_field: Option<&'static str>,
    /// Show the status as the leading list column.
    pub status_listed: bool,
    pub status_actions: &'static [StatusAction],
    pub update_style: UpdateStyle,
    pub after_save: AfterSave,
    /// Whether the list screen offers an edit entry.
    pub edit_in_list: bool,
    /// Quotation product lines.
    pub has_lines: bool,
    /// Auto-fill `customerId` from the customer feed.
    pub auto_customer: bool,
    pub lookup: Option<LookupJoin>,
}

impl EntityConfig {
    pub fn collection_path(&self) -> String {
        format!("/api/v1/{}", self.path_segment)
    }

    pub fn record_path(&self, id: &RecordId) -> String {
        format!("/api/v1/{}/{}", self.path_segment, id)
    }

    pub fn update_path(&self, id: &RecordId) -> String {
        match self.update_style {
            UpdateStyle::ById => self.record_path(id),
            UpdateStyle::ActionPath => format!("/api/v1/{}/update/{}", self.path_segment, id),
        }
    }

    pub fn action_path(&self, action: StatusAction, id: &RecordId) -> String {
        format!(
            "/api/v1/{}/{}/{}",
            self.path_segment,
            action.path_segment(),
            id
        )
    }

    pub fn field(&self, path: FieldPath) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.path == path)
    }

    pub fn listed_fields(&self) -> impl Iterator<Item = &FieldSpec> {
        self.fields.iter().filter(|f| f.listed)
    }

    /// Distinct feeds this entity draws on, in schema order.
    pub fn feeds(&self) -> Vec<FeedKind> {
        let mut feeds = Vec::new();
        for field in &self.fields {
            if let FieldKind::Select(feed) = field.kind {
                if !feeds.contains(&feed) {
                    feeds.push(feed);
                }
            }
        }
        if self.has_lines && !feeds.contains(&FeedKind::Products) {
            feeds.push(FeedKind::Products);
        }
        if self.auto_customer && !feeds.contains(&FeedKind::Customers) {
            feeds.push(FeedKind::Customers);
        }
        feeds
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_paths_display() {
        assert_eq!(FieldPath::top("email").to_string(), "email");
        assert_eq!(
            FieldPath::nested("address", "city").to_string(),
            "address.city"
        );
    }

    #[test]
    fn update_paths_follow_style() {
        let id = RecordId::Int(4);
        let mut entity = EntityConfig {
            kind: EntityKind::Accountant,
            path_segment: "accountants",
            id_kind: IdKind::Int,
            fields: Vec::new(),
            status_field: None,
            status_listed: false,
            status_actions: &[],
            update_style: UpdateStyle::ById,
            after_save: AfterSave::Home,
            edit_in_list: true,
            has_lines: false,
            auto_customer: false,
            lookup: None,
        };
        assert_eq!(entity.update_path(&id), "/api/v1/accountants/4");
        entity.update_style = UpdateStyle::ActionPath;
        assert_eq!(entity.update_path(&id), "/api/v1/accountants/update/4");
        assert_eq!(
            entity.action_path(StatusAction::Validate, &id),
            "/api/v1/accountants/validate/4"
        );
    }
}
