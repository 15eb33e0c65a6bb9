//! Built-in entity catalog, indexed for runtime lookup.

use std::collections::HashMap;

use crate::error::SchemaError;
use crate::model::{EntityKind, IdKind, StatusAction};
use crate::schema::types::{
    AfterSave, EntityConfig, FeedKind, FieldKind, FieldPath, FieldSpec, LookupJoin, UpdateStyle,
};
use crate::schema::validator::validate;

#[derive(Clone, Debug)]
pub struct Catalog {
    entities: Vec<EntityConfig>,
    by_path: HashMap<&'static str, usize>,
}

impl Catalog {
    /// The seven built-in business entities.
    pub fn new() -> Self {
        Self::index(builtin_entities())
    }

    /// Build from an explicit entity set, rejecting inconsistent configs.
    pub fn from_entities(entities: Vec<EntityConfig>) -> Result<Self, SchemaError> {
        validate(&entities)?;
        Ok(Self::index(entities))
    }

    fn index(entities: Vec<EntityConfig>) -> Self {
        let by_path = entities
            .iter()
            .enumerate()
            .map(|(i, e)| (e.path_segment, i))
            .collect();
        Self { entities, by_path }
    }

    pub fn validate(&self) -> Result<(), SchemaError> {
        validate(&self.entities)
    }

    pub fn entities(&self) -> &[EntityConfig] {
        &self.entities
    }

    pub fn entity(&self, kind: EntityKind) -> Option<&EntityConfig> {
        self.entities.iter().find(|e| e.kind == kind)
    }

    pub fn entity_by_path(&self, segment: &str) -> Option<&EntityConfig> {
        self.by_path.get(segment).map(|&i| &self.entities[i])
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::new()
    }
}

// path, kind, required, listed
const fn spec(path: FieldPath, kind: FieldKind, required: bool, listed: bool) -> FieldSpec {
    FieldSpec {
        path,
        kind,
        required,
        listed,
    }
}

fn builtin_entities() -> Vec<EntityConfig> {
    vec![
        accountant(),
        client(),
        customer(),
        product(),
        expense_report(),
        quotation(),
        invoice(),
    ]
}

fn accountant() -> EntityConfig {
    EntityConfig {
        kind: EntityKind::Accountant,
        path_segment: "accountants",
        id_kind: IdKind::Int,
        fields: vec![
            spec(FieldPath::top("companyName"), FieldKind::Text, true, true),
            spec(FieldPath::top("rc"), FieldKind::Number, true, true),
            spec(FieldPath::top("email"), FieldKind::Email, true, true),
            spec(FieldPath::top("mobilePhone"), FieldKind::Number, true, true),
            spec(FieldPath::top("phone"), FieldKind::Number, false, true),
            spec(FieldPath::top("fax"), FieldKind::Number, false, false),
            spec(
                FieldPath::nested("address", "primaryAddress"),
                FieldKind::Text,
                true,
                false,
            ),
            spec(
                FieldPath::nested("address", "secondaryAddress"),
                FieldKind::Text,
                false,
                false,
            ),
            spec(
                FieldPath::nested("address", "postalCode"),
                FieldKind::Number,
                true,
                false,
            ),
            spec(
                FieldPath::nested("address", "city"),
                FieldKind::Select(FeedKind::Cities),
                true,
                true,
            ),
            spec(
                FieldPath::nested("address", "country"),
                FieldKind::Select(FeedKind::Countries),
                true,
                true,
            ),
        ],
        status_field: None,
        status_listed: false,
        status_actions: &[],
        update_style: UpdateStyle::ById,
        after_save: AfterSave::Home,
        edit_in_list: true,
        has_lines: false,
        auto_customer: false,
        lookup: None,
    }
}

// Clients and customers share a shape; their address fields are flat.
fn company_fields() -> Vec<FieldSpec> {
    vec![
        spec(FieldPath::top("companyName"), FieldKind::Text, true, true),
        spec(FieldPath::top("rc"), FieldKind::Number, true, true),
        spec(FieldPath::top("email"), FieldKind::Email, true, true),
        spec(FieldPath::top("mobilePhone"), FieldKind::Number, true, true),
        spec(FieldPath::top("phone"), FieldKind::Number, false, true),
        spec(FieldPath::top("fax"), FieldKind::Number, false, false),
        spec(
            FieldPath::top("city"),
            FieldKind::Select(FeedKind::Cities),
            true,
            true,
        ),
        spec(
            FieldPath::top("country"),
            FieldKind::Select(FeedKind::Countries),
            true,
            true,
        ),
    ]
}

fn client() -> EntityConfig {
    EntityConfig {
        kind: EntityKind::Client,
        path_segment: "clients",
        id_kind: IdKind::Int,
        fields: company_fields(),
        status_field: None,
        status_listed: false,
        status_actions: &[],
        update_style: UpdateStyle::ById,
        after_save: AfterSave::Home,
        edit_in_list: true,
        has_lines: false,
        auto_customer: false,
        lookup: None,
    }
}

fn customer() -> EntityConfig {
    EntityConfig {
        kind: EntityKind::Customer,
        path_segment: "customers",
        ..client()
    }
}

fn product() -> EntityConfig {
    EntityConfig {
        kind: EntityKind::Product,
        path_segment: "products",
        id_kind: IdKind::Int,
        fields: vec![
            spec(FieldPath::top("label"), FieldKind::Text, true, true),
            spec(FieldPath::top("reference"), FieldKind::Text, true, true),
            spec(FieldPath::top("priceExclTax"), FieldKind::Number, true, true),
            spec(FieldPath::top("unity"), FieldKind::Text, true, true),
            spec(FieldPath::top("qualification"), FieldKind::Text, true, true),
            spec(FieldPath::top("tax"), FieldKind::Number, true, true),
            spec(FieldPath::top("customerId"), FieldKind::Number, false, false),
        ],
        status_field: None,
        status_listed: false,
        status_actions: &[],
        update_style: UpdateStyle::ById,
        after_save: AfterSave::Home,
        edit_in_list: true,
        has_lines: false,
        auto_customer: true,
        lookup: None,
    }
}

fn expense_report() -> EntityConfig {
    EntityConfig {
        kind: EntityKind::ExpenseReport,
        path_segment: "expense_reports",
        id_kind: IdKind::Int,
        fields: vec![
            spec(FieldPath::top("label"), FieldKind::Text, true, true),
            spec(FieldPath::top("priceExclTax"), FieldKind::Number, true, true),
            spec(FieldPath::top("qualification"), FieldKind::Text, true, true),
            spec(FieldPath::top("tax"), FieldKind::Number, true, true),
            spec(FieldPath::top("customerId"), FieldKind::Number, false, false),
        ],
        status_field: Some("status"),
        status_listed: false,
        status_actions: &[],
        update_style: UpdateStyle::ActionPath,
        after_save: AfterSave::Home,
        edit_in_list: true,
        has_lines: false,
        auto_customer: true,
        lookup: None,
    }
}

fn quotation() -> EntityConfig {
    EntityConfig {
        kind: EntityKind::Quotation,
        path_segment: "quotations",
        id_kind: IdKind::Int,
        fields: vec![
            spec(
                FieldPath::top("validationDelay"),
                FieldKind::Number,
                true,
                true,
            ),
            spec(
                FieldPath::top("clientId"),
                FieldKind::Select(FeedKind::Clients),
                true,
                true,
            ),
            spec(FieldPath::top("customerId"), FieldKind::Number, false, false),
        ],
        status_field: Some("status"),
        status_listed: true,
        status_actions: &[StatusAction::Validate, StatusAction::Transform],
        update_style: UpdateStyle::ActionPath,
        after_save: AfterSave::OwnList,
        edit_in_list: false,
        has_lines: true,
        auto_customer: true,
        lookup: Some(LookupJoin {
            field: FieldPath::top("clientId"),
            feed: FeedKind::Clients,
        }),
    }
}

fn invoice() -> EntityConfig {
    EntityConfig {
        kind: EntityKind::Invoice,
        path_segment: "invoices",
        id_kind: IdKind::Int,
        fields: vec![
            spec(FieldPath::top("paymentDelay"), FieldKind::Number, true, true),
            spec(
                FieldPath::top("clientId"),
                FieldKind::Select(FeedKind::Clients),
                true,
                true,
            ),
        ],
        status_field: Some("status"),
        status_listed: true,
        status_actions: &[StatusAction::Validate],
        update_style: UpdateStyle::ById,
        after_save: AfterSave::OwnList,
        edit_in_list: true,
        has_lines: false,
        auto_customer: false,
        lookup: Some(LookupJoin {
            field: FieldPath::top("clientId"),
            feed: FeedKind::Clients,
        }),
    }
}
