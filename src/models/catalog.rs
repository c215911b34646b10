//! Named catalogue records: companies, tags, ticket statuses and ticket types.
//!
//! Records hold every field exactly as the API sent it, including `null`s,
//! so they serialize back unchanged.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{str_field, u64_field};

/// A company that customers belong to.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Company {
    /// Fields as sent by the API.
    pub fields: Map<String, Value>,
}

/// A label that can be attached to tickets.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Tag {
    /// Fields as sent by the API.
    pub fields: Map<String, Value>,
}

/// A ticket workflow status such as "Open" or "Solved".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketStatus {
    /// Fields as sent by the API.
    pub fields: Map<String, Value>,
}

impl TicketStatus {
    /// Status ID, if present.
    pub fn id(&self) -> Option<u64> {
        u64_field(&self.fields, "id")
    }

    /// Status display name, if present.
    pub fn name(&self) -> Option<&str> {
        str_field(&self.fields, "name")
    }
}

/// A ticket classification such as "Question" or "Problem".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TicketType {
    /// Fields as sent by the API.
    pub fields: Map<String, Value>,
}

/// Create payload for any name-only resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NamedDraft {
    /// Name of the new record.
    pub name: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ticket_status_keeps_unknown_fields() {
        let json = r##"{"id": 5, "name": "Open", "color": "#00ff00", "displayOrder": 1}"##;
        let status: TicketStatus = serde_json::from_str(json).unwrap();
        assert_eq!(status.id(), Some(5));
        assert_eq!(status.name(), Some("Open"));

        let back = serde_json::to_value(&status).unwrap();
        assert_eq!(back, serde_json::from_str::<Value>(json).unwrap());
    }

    #[test]
    fn test_company_keeps_nulls_and_omits_nothing_extra() {
        let json = r#"{"id": 3, "name": null, "domains": [], "description": null}"#;
        let company: Company = serde_json::from_str(json).unwrap();

        let back = serde_json::to_value(&company).unwrap();
        assert_eq!(back, serde_json::from_str::<Value>(json).unwrap());
    }

    #[test]
    fn test_ticket_status_without_name() {
        let status: TicketStatus = serde_json::from_str(r#"{"id": 9, "name": null}"#).unwrap();
        assert_eq!(status.id(), Some(9));
        assert_eq!(status.name(), None);
    }

    #[test]
    fn test_named_draft_serializes_name_only() {
        let draft = NamedDraft {
            name: "Enterprise".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({"name": "Enterprise"})
        );
    }
}
