//! Ticket models for the helpdesk API.
//!
//! Besides the pass-through [`Ticket`] record, this module defines the
//! reduced [`TicketSummary`] view returned by `list_tickets`, whose status
//! name is resolved from the statuses side-loaded with the list response.

use chrono::{DateTime, SecondsFormat};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{str_field, u64_field};
use super::TicketStatus;

/// A helpdesk ticket.
///
/// Held as the raw field map so `get_ticket` returns the record exactly as
/// sent; the accessors read the fields the summary needs.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Ticket {
    /// Fields as sent by the API.
    pub fields: Map<String, Value>,
}

impl Ticket {
    /// Ticket ID, if present.
    pub fn id(&self) -> Option<u64> {
        u64_field(&self.fields, "id")
    }

    /// Subject line, if present.
    pub fn subject(&self) -> Option<&str> {
        str_field(&self.fields, "subject")
    }

    /// Short plain-text excerpt of the first message, if present.
    pub fn preview_text(&self) -> Option<&str> {
        str_field(&self.fields, "previewText")
    }

    /// ID of the referenced status record, if present.
    pub fn status_id(&self) -> Option<u64> {
        self.fields
            .get("status")
            .and_then(Value::as_object)
            .and_then(|status| u64_field(status, "id"))
    }

    /// Creation timestamp as sent by the API.
    pub fn created_at(&self) -> Option<&str> {
        str_field(&self.fields, "createdAt")
    }

    /// Last update timestamp as sent by the API.
    pub fn updated_at(&self) -> Option<&str> {
        str_field(&self.fields, "updatedAt")
    }
}

/// Create payload for a ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TicketDraft {
    /// Ticket subject line.
    pub subject: String,
    /// Ticket preview text.
    pub preview_text: String,
}

/// Reduced ticket view used by `list_tickets`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TicketSummary {
    /// Ticket ID.
    pub id: u64,
    /// Subject line.
    pub subject: String,
    /// Status name, or empty when the status is not among the included records.
    pub status: String,
    /// Creation time in RFC 3339.
    pub created_at: String,
    /// Last update time in RFC 3339.
    pub updated_at: String,
    /// Preview text.
    pub preview_text: String,
}

impl TicketSummary {
    /// Builds the summary of `ticket`, looking its status up in `statuses`.
    pub fn new(ticket: &Ticket, statuses: &[TicketStatus]) -> Self {
        let status = ticket
            .status_id()
            .and_then(|id| statuses.iter().find(|s| s.id() == Some(id)))
            .and_then(TicketStatus::name)
            .unwrap_or_default()
            .to_string();

        Self {
            id: ticket.id().unwrap_or_default(),
            subject: ticket.subject().unwrap_or_default().to_string(),
            status,
            created_at: format_timestamp(ticket.created_at()),
            updated_at: format_timestamp(ticket.updated_at()),
            preview_text: ticket.preview_text().unwrap_or_default().to_string(),
        }
    }
}

/// Summarizes every ticket in a list response.
pub fn summarize_tickets(tickets: &[Ticket], statuses: &[TicketStatus]) -> Vec<TicketSummary> {
    tickets
        .iter()
        .map(|ticket| TicketSummary::new(ticket, statuses))
        .collect()
}

/// Normalizes an API timestamp to RFC 3339 with second precision.
///
/// Values that do not parse are returned unchanged; a missing value is empty.
fn format_timestamp(raw: Option<&str>) -> String {
    match raw {
        None => String::new(),
        Some(raw) => DateTime::parse_from_rfc3339(raw)
            .map(|t| t.to_rfc3339_opts(SecondsFormat::Secs, true))
            .unwrap_or_else(|_| raw.to_string()),
    }
}
