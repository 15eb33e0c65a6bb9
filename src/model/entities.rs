//! Entity identities and typed record payloads.

use serde::{Deserialize, Serialize};

use crate::model::status::Status;

/// The seven business entities the backend serves.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum EntityKind {
    Accountant,
    Client,
    Customer,
    Product,
    ExpenseReport,
    Quotation,
    Invoice,
}

impl EntityKind {
    pub const ALL: [EntityKind; 7] = [
        EntityKind::Accountant,
        EntityKind::Client,
        EntityKind::Customer,
        EntityKind::Product,
        EntityKind::ExpenseReport,
        EntityKind::Quotation,
        EntityKind::Invoice,
    ];

    /// Base segment of client-side routes, e.g. `accountant` in
    /// `/accountant-list` and `/accountant/7`.
    pub fn route_base(self) -> &'static str {
        match self {
            EntityKind::Accountant => "accountant",
            EntityKind::Client => "client",
            EntityKind::Customer => "customer",
            EntityKind::Product => "product",
            EntityKind::ExpenseReport => "expense-report",
            EntityKind::Quotation => "quotation",
            EntityKind::Invoice => "invoice",
        }
    }

    pub fn from_route_base(raw: &str) -> Option<Self> {
        EntityKind::ALL.into_iter().find(|k| k.route_base() == raw)
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Address {
    pub primary_address: String,
    #[serde(default)]
    pub secondary_address: Option<String>,
    pub postal_code: i64,
    pub city: String,
    pub country: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Accountant {
    #[serde(default)]
    pub id: Option<i64>,
    pub company_name: String,
    pub rc: i64,
    pub email: String,
    pub mobile_phone: i64,
    #[serde(default)]
    pub phone: Option<i64>,
    #[serde(default)]
    pub fax: Option<i64>,
    pub address: Address,
}

/// Clients carry their address fields flat, unlike accountants.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Client {
    #[serde(default)]
    pub id: Option<i64>,
    pub company_name: String,
    pub rc: i64,
    pub email: String,
    pub mobile_phone: i64,
    #[serde(default)]
    pub phone: Option<i64>,
    #[serde(default)]
    pub fax: Option<i64>,
    pub city: String,
    pub country: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    #[serde(default)]
    pub id: Option<i64>,
    pub company_name: String,
    pub rc: i64,
    pub email: String,
    pub mobile_phone: i64,
    #[serde(default)]
    pub phone: Option<i64>,
    #[serde(default)]
    pub fax: Option<i64>,
    pub city: String,
    pub country: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    #[serde(default)]
    pub id: Option<i64>,
    pub label: String,
    pub reference: String,
    pub price_excl_tax: f64,
    pub unity: String,
    pub qualification: String,
    pub tax: f64,
    #[serde(default)]
    pub customer_id: Option<i64>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseReport {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub status: Status,
    pub label: String,
    pub price_excl_tax: f64,
    pub qualification: String,
    pub tax: f64,
    #[serde(default)]
    pub customer_id: Option<i64>,
}

/// Line item as fetched payloads carry it; `label` is display-only.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuotationLine {
    pub product_id: i64,
    pub quantity: i64,
    #[serde(default)]
    pub label: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Quotation {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub status: Status,
    pub validation_delay: i64,
    #[serde(default)]
    pub customer_id: Option<i64>,
    pub client_id: i64,
    #[serde(default)]
    pub quotation_products: Vec<QuotationLine>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub status: Status,
    pub payment_delay: i64,
    pub client_id: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn route_bases_round_trip() {
        for kind in EntityKind::ALL {
            assert_eq!(EntityKind::from_route_base(kind.route_base()), Some(kind));
        }
        assert_eq!(EntityKind::from_route_base("supplier"), None);
    }

    #[test]
    fn quotation_payload_decodes() {
        let quotation: Quotation = serde_json::from_value(serde_json::json!({
            "id": 5,
            "status": "VALIDATED",
            "validationDelay": 30,
            "clientId": 2,
            "quotationProducts": [
                {"productId": 9, "quantity": 3, "label": "Desk"}
            ]
        }))
        .unwrap();
        assert_eq!(quotation.status, Status::Validated);
        assert_eq!(quotation.quotation_products.len(), 1);
        assert_eq!(quotation.quotation_products[0].label.as_deref(), Some("Desk"));
        assert_eq!(quotation.customer_id, None);
    }
}
