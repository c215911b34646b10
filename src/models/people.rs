//! People records: customers (who raise tickets) and users (agents).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A customer of the helpdesk.
///
/// Held as the raw field map so `null`s and absent fields pass through as sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Customer {
    /// Fields as sent by the API.
    pub fields: Map<String, Value>,
}

/// A helpdesk user (agent).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct User {
    /// Fields as sent by the API.
    pub fields: Map<String, Value>,
}

/// Create payload shared by customers and users.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonDraft {
    /// First name.
    pub first_name: String,
    /// Last name.
    pub last_name: String,
    /// Email address.
    pub email: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_customer_passes_through_nulls() {
        let json = r#"{
            "id": 77,
            "firstName": "Ada",
            "lastName": null,
            "organization": "Analytical Engines"
        }"#;
        let customer: Customer = serde_json::from_str(json).unwrap();
        assert_eq!(customer.fields["firstName"], "Ada");
        assert!(customer.fields["lastName"].is_null());
        assert!(!customer.fields.contains_key("email"));

        let back = serde_json::to_value(&customer).unwrap();
        assert_eq!(back, serde_json::from_str::<Value>(json).unwrap());
    }

    #[test]
    fn test_person_draft_payload() {
        let draft = PersonDraft {
            first_name: "A".to_string(),
            last_name: "B".to_string(),
            email: "a@b.com".to_string(),
        };
        assert_eq!(
            serde_json::to_value(&draft).unwrap(),
            serde_json::json!({"firstName": "A", "lastName": "B", "email": "a@b.com"})
        );
    }
}
