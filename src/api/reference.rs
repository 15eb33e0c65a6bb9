//! Reference feeds backing select options and list lookups.

use serde::Deserialize;
use serde_json::Value;

use crate::error::ApiError;
use crate::schema::FeedKind;
use crate::transport::HttpTransport;

#[derive(Clone, Debug, Deserialize)]
pub struct CityRef {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CountryRef {
    pub id: i64,
    pub name: String,
}

#[derive(Clone, Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClientRef {
    pub id: i64,
    pub company_name: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct ProductRef {
    pub id: i64,
    pub label: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct CustomerRef {
    pub id: i64,
}

/// Option of a select field: wire value plus display label.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FeedOption {
    pub value: String,
    pub label: String,
}

/// Fetch one feed as select options. City and country options are valued by
/// name; client, product and customer options by id.
pub async fn fetch_feed(
    transport: &HttpTransport,
    feed: FeedKind,
) -> Result<Vec<FeedOption>, ApiError> {
    let raw = transport.get_json(feed.path()).await?;
    options_from(feed, raw)
}

fn options_from(feed: FeedKind, raw: Value) -> Result<Vec<FeedOption>, ApiError> {
    let options = match feed {
        FeedKind::Cities => serde_json::from_value::<Vec<CityRef>>(raw)?
            .into_iter()
            .map(|c| FeedOption {
                value: c.name.clone(),
                label: c.name,
            })
            .collect(),
        FeedKind::Countries => serde_json::from_value::<Vec<CountryRef>>(raw)?
            .into_iter()
            .map(|c| FeedOption {
                value: c.name.clone(),
                label: c.name,
            })
            .collect(),
        FeedKind::Clients => serde_json::from_value::<Vec<ClientRef>>(raw)?
            .into_iter()
            .map(|c| FeedOption {
                value: c.id.to_string(),
                label: c.company_name,
            })
            .collect(),
        FeedKind::Products => serde_json::from_value::<Vec<ProductRef>>(raw)?
            .into_iter()
            .map(|p| FeedOption {
                value: p.id.to_string(),
                label: p.label,
            })
            .collect(),
        FeedKind::Customers => serde_json::from_value::<Vec<CustomerRef>>(raw)?
            .into_iter()
            .map(|c| FeedOption {
                value: c.id.to_string(),
                label: c.id.to_string(),
            })
            .collect(),
    };
    Ok(options)
}
