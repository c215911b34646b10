//! Tool input parameter structs for MCP tools.
//!
//! This module defines the input types for each MCP tool, with
//! JSON Schema derivation for MCP tool discovery.
//!
//! Arguments whose JSON type the caller may get wrong (filters, sort and page
//! settings, record IDs) are received as raw JSON values and checked here, so
//! a mismatch becomes an [`ArgumentError`] naming the field instead of being
//! silently defaulted. The advertised schema still shows the expected type.

use rmcp::schemars::{self, JsonSchema};
use serde::Deserialize;
use serde_json::{Map, Value};

use crate::desk_client::ListParams;
use crate::error::ArgumentError;
use crate::models::{NamedDraft, PersonDraft, TicketDraft};

/// Input parameters for the `list_*` tools.
///
/// All fields are optional; unset sort and page settings use the defaults
/// (`createdAt`, `desc`, page 1, 10 per page).
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct ListInput {
    /// Field filters as an object of field name to value (e.g. {"email": "a@b.com"}).
    /// See the tool description for the available fields.
    #[serde(default)]
    #[schemars(with = "Option<Map<String, Value>>")]
    pub filter: Option<Value>,

    /// Field to order by (default: createdAt).
    #[serde(default, rename = "orderBy")]
    #[schemars(with = "Option<String>")]
    pub order_by: Option<Value>,

    /// Order mode: 'asc' or 'desc' (default: desc).
    #[serde(default, rename = "orderMode")]
    #[schemars(with = "Option<String>")]
    pub order_mode: Option<Value>,

    /// Page number, starting at 1 (default: 1).
    #[serde(default)]
    #[schemars(with = "Option<u32>")]
    pub page: Option<Value>,

    /// Number of records per page, 1 to 100 (default: 10).
    #[serde(default, rename = "pageSize")]
    #[schemars(with = "Option<u32>")]
    pub page_size: Option<Value>,
}

impl ListInput {
    /// Validates the arguments and converts them into list parameters.
    pub fn to_params(&self) -> Result<ListParams, ArgumentError> {
        let mut params = filter_params(self.filter.as_ref())?;

        if let Some(order_by) = &self.order_by {
            params = params.with_order_by(string_arg("orderBy", order_by)?);
        }
        if let Some(order_mode) = &self.order_mode {
            params = params.with_order_mode(string_arg("orderMode", order_mode)?);
        }
        if let Some(page) = &self.page {
            params = params.with_page(integer_arg("page", page)?);
        }
        if let Some(page_size) = &self.page_size {
            params = params.with_page_size(integer_arg("pageSize", page_size)?);
        }

        Ok(params)
    }
}

/// Input parameters for the `count_tickets` tool.
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct CountInput {
    /// Field filters as an object of field name to value (e.g. {"status": "open"}).
    #[serde(default)]
    #[schemars(with = "Option<Map<String, Value>>")]
    pub filter: Option<Value>,
}

impl CountInput {
    /// Validates the filter and converts it into list parameters with
    /// default sort and pagination.
    pub fn to_params(&self) -> Result<ListParams, ArgumentError> {
        filter_params(self.filter.as_ref())
    }
}

/// Input parameters for the `get_*` tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct GetInput {
    /// The numeric ID of the record, as a string (e.g. "42").
    #[schemars(with = "String")]
    pub id: Value,
}

impl GetInput {
    /// Parses the ID with strict integer parsing: ASCII digits only.
    pub fn parse_id(&self) -> Result<u64, ArgumentError> {
        let raw = match &self.id {
            Value::String(s) => s,
            other => return Err(ArgumentError::wrong_type("id", "a numeric string", describe(other))),
        };

        let not_numeric = || {
            ArgumentError::wrong_type(
                "id",
                "a numeric string",
                format!("{:?}", raw.chars().take(50).collect::<String>()),
            )
        };

        if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
            return Err(not_numeric());
        }
        raw.parse::<u64>().map_err(|_| not_numeric())
    }
}

/// A create-tool input that can be turned into a create payload.
pub trait DraftInput {
    /// The payload type produced.
    type Draft;

    /// Trims all fields and checks the required ones are non-empty.
    fn into_draft(self) -> Result<Self::Draft, ArgumentError>;
}

/// Input parameters for the `create_ticket` tool.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateTicketInput {
    /// Ticket subject.
    pub subject: String,

    /// Ticket preview text.
    pub preview_text: String,
}

impl DraftInput for CreateTicketInput {
    type Draft = TicketDraft;

    fn into_draft(self) -> Result<TicketDraft, ArgumentError> {
        Ok(TicketDraft {
            subject: required("subject", &self.subject)?,
            preview_text: required("preview_text", &self.preview_text)?,
        })
    }
}

/// Input parameters for the `create_customer` and `create_user` tools.
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreatePersonInput {
    /// First name.
    pub first_name: String,

    /// Last name.
    pub last_name: String,

    /// Email address.
    pub email: String,
}

impl DraftInput for CreatePersonInput {
    type Draft = PersonDraft;

    fn into_draft(self) -> Result<PersonDraft, ArgumentError> {
        Ok(PersonDraft {
            first_name: required("first_name", &self.first_name)?,
            last_name: required("last_name", &self.last_name)?,
            email: required("email", &self.email)?,
        })
    }
}

/// Input parameters for the create tools of name-only resources
/// (companies, tags, ticket statuses, ticket types).
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct CreateNamedInput {
    /// Name of the new record.
    pub name: String,
}

impl DraftInput for CreateNamedInput {
    type Draft = NamedDraft;

    fn into_draft(self) -> Result<NamedDraft, ArgumentError> {
        Ok(NamedDraft {
            name: required("name", &self.name)?,
        })
    }
}

/// Converts the `filter` argument into list parameters.
///
/// Scalars are stringified (strings verbatim, numbers and booleans in their
/// JSON form); `null` entries are skipped; nested values are rejected.
fn filter_params(filter: Option<&Value>) -> Result<ListParams, ArgumentError> {
    let mut params = ListParams::new();

    let fields = match filter {
        None | Some(Value::Null) => return Ok(params),
        Some(Value::Object(fields)) => fields,
        Some(other) => return Err(ArgumentError::wrong_type("filter", "an object", describe(other))),
    };

    for (field, value) in fields {
        let value = match value {
            Value::Null => continue,
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Bool(b) => b.to_string(),
            other => {
                return Err(ArgumentError::wrong_type(
                    format!("filter.{}", field),
                    "a string, number or boolean",
                    describe(other),
                ))
            }
        };
        params = params.with_filter(field.as_str(), value);
    }

    Ok(params)
}

fn string_arg(field: &str, value: &Value) -> Result<String, ArgumentError> {
    match value {
        Value::String(s) => Ok(s.trim().to_string()),
        other => Err(ArgumentError::wrong_type(field, "a string", describe(other))),
    }
}

/// Reads a JSON integer. Integral floats such as `2.0` are accepted.
fn integer_arg(field: &str, value: &Value) -> Result<i64, ArgumentError> {
    let Value::Number(n) = value else {
        return Err(ArgumentError::wrong_type(field, "an integer", describe(value)));
    };

    if let Some(i) = n.as_i64() {
        return Ok(i);
    }
    match n.as_f64() {
        Some(f) if f.fract() == 0.0 && f.abs() <= i64::MAX as f64 => Ok(f as i64),
        _ => Err(ArgumentError::wrong_type(field, "an integer", format!("{}", n))),
    }
}

fn required(field: &str, value: &str) -> Result<String, ArgumentError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ArgumentError::empty(field));
    }
    Ok(value.to_string())
}

/// Names the JSON type of `value` for error messages.
fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
