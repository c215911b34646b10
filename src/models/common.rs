//! Common types shared across helpdesk API models.
//!
//! This module defines pagination metadata, the `included` side-load block,
//! field readers for raw records and the envelope helpers used by every
//! resource endpoint.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::DeskError;

use super::TicketStatus;

/// Pagination metadata returned with every list response.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    /// Total number of records matching the query, across all pages.
    #[serde(default)]
    pub records: u64,

    /// Number of pages available at the current page size.
    #[serde(default)]
    pub pages: u64,

    /// The page this response holds (1-based).
    #[serde(default)]
    pub page: u64,

    /// Number of records per page.
    #[serde(default)]
    pub page_size: u64,
}

/// Reads `key` as an unsigned integer; `null`, missing or mistyped values give `None`.
pub(crate) fn u64_field(fields: &Map<String, Value>, key: &str) -> Option<u64> {
    fields.get(key).and_then(Value::as_u64)
}

/// Reads `key` as a string; `null`, missing or mistyped values give `None`.
pub(crate) fn str_field<'a>(fields: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    fields.get(key).and_then(Value::as_str)
}

/// Records side-loaded alongside a list response.
///
/// Only ticket statuses are interpreted; other collections are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Included {
    /// Ticket statuses referenced by the listed records.
    #[serde(default)]
    pub ticketstatuses: Vec<TicketStatus>,
}

/// A decoded list response.
#[derive(Debug, Clone)]
pub struct ListResponse<T> {
    /// The records on this page.
    pub items: Vec<T>,

    /// Side-loaded records used to resolve references.
    pub included: Included,

    /// Pagination metadata.
    pub pagination: PageInfo,
}

/// Raw list response body before the resource-specific collection is extracted.
#[derive(Debug, Deserialize)]
struct RawListResponse {
    #[serde(default)]
    included: Included,

    #[serde(default)]
    pagination: PageInfo,

    #[serde(flatten)]
    rest: Map<String, Value>,
}

impl<T: DeserializeOwned> ListResponse<T> {
    /// Decodes a list response whose records live under `collection`.
    ///
    /// A missing or `null` collection decodes as an empty page.
    pub fn from_body(body: &str, collection: &str) -> Result<Self, DeskError> {
        let mut raw: RawListResponse = serde_json::from_str(body)?;

        let items = match raw.rest.remove(collection) {
            Some(Value::Null) | None => Vec::new(),
            Some(value) => serde_json::from_value(value)?,
        };

        Ok(Self {
            items,
            included: raw.included,
            pagination: raw.pagination,
        })
    }
}

/// Decodes a single-record envelope `{ "<key>": record }`.
pub fn from_envelope<T: DeserializeOwned>(body: &str, key: &str) -> Result<T, DeskError> {
    let mut envelope: Map<String, Value> = serde_json::from_str(body)?;
    let record = envelope
        .remove(key)
        .filter(|value| !value.is_null())
        .ok_or_else(|| DeskError::UnexpectedResponse(key.to_string()))?;
    Ok(serde_json::from_value(record)?)
}

/// Wraps `record` in a single-record envelope `{ "<key>": record }`.
pub fn to_envelope<T: Serialize>(record: &T, key: &str) -> Result<Value, DeskError> {
    let mut envelope = Map::new();
    envelope.insert(key.to_string(), serde_json::to_value(record)?);
    Ok(Value::Object(envelope))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Tag;

    #[test]
    fn test_list_response_extracts_collection() {
        let body = r#"{
            "tags": [{"id": 1, "name": "vip"}, {"id": 2, "name": "billing"}],
            "pagination": {"records": 2, "pages": 1, "page": 1, "pageSize": 10}
        }"#;
        let resp: ListResponse<Tag> = ListResponse::from_body(body, "tags").unwrap();
        assert_eq!(resp.items.len(), 2);
        assert_eq!(resp.items[1].fields["name"], "billing");
        assert_eq!(resp.pagination.records, 2);
        assert_eq!(resp.pagination.page_size, 10);
        assert!(resp.included.ticketstatuses.is_empty());
    }

    #[test]
    fn test_list_response_missing_collection_is_empty() {
        let resp: ListResponse<Tag> = ListResponse::from_body("{}", "tags").unwrap();
        assert!(resp.items.is_empty());
        assert_eq!(resp.pagination, PageInfo::default());
    }

    #[test]
    fn test_list_response_reads_included_statuses() {
        let body = r#"{
            "tickets": [],
            "included": {
                "ticketstatuses": [{"id": 5, "name": "Open"}],
                "customers": [{"id": 9}]
            }
        }"#;
        let resp: ListResponse<Value> = ListResponse::from_body(body, "tickets").unwrap();
        assert_eq!(resp.included.ticketstatuses.len(), 1);
        assert_eq!(resp.included.ticketstatuses[0].name(), Some("Open"));
    }

    #[test]
    fn test_from_envelope_missing_key() {
        let err = from_envelope::<Tag>(r#"{"other": {}}"#, "tag").unwrap_err();
        assert!(matches!(err, DeskError::UnexpectedResponse(ref key) if key == "tag"));
    }

    #[test]
    fn test_to_envelope_wraps_record() {
        let value = to_envelope(&serde_json::json!({"name": "vip"}), "tag").unwrap();
        assert_eq!(value, serde_json::json!({"tag": {"name": "vip"}}));
    }

    #[test]
    fn test_field_readers_treat_null_and_missing_alike() {
        let fields: Map<String, Value> =
            serde_json::from_str(r#"{"id": 5, "name": null, "count": "7"}"#).unwrap();
        assert_eq!(u64_field(&fields, "id"), Some(5));
        assert_eq!(u64_field(&fields, "count"), None);
        assert_eq!(u64_field(&fields, "absent"), None);
        assert_eq!(str_field(&fields, "name"), None);
        assert_eq!(str_field(&fields, "count"), Some("7"));
    }
}
