//! HTTP client for the Teamwork Desk API.
//!
//! This module provides [`DeskClient`], which holds the authenticated HTTP
//! client, and [`ResourceClient`], a per-resource view offering `list`, `get`
//! and `create`. [`ListParams`] turns filters and sort/page settings into the
//! query string every list call sends.
//!
//! Failed calls are never retried and no request timeout is imposed beyond
//! the HTTP client's defaults; every error is returned to the caller as is.
//!
//! # Security
//!
//! The API token is never logged. All error messages are sanitized before logging.

use std::marker::PhantomData;
use std::time::Duration;

use reqwest::{Client, Method, StatusCode};
use serde_json::Value;

use crate::config::Config;
use crate::error::DeskError;
use crate::models::{from_envelope, to_envelope, ListResponse};
use crate::resource::{
    Companies, Customers, Resource, Tags, TicketStatuses, TicketTypes, Tickets, Users,
};

/// API prefix appended to the site URL.
const API_PREFIX: &str = "/desk/api/v2";

/// Maximum length for HTTP error response bodies.
const MAX_ERROR_BODY_LEN: usize = 500;

/// Sort field used when none is given.
pub const DEFAULT_ORDER_BY: &str = "createdAt";

/// Sort direction used when none is given.
pub const DEFAULT_ORDER_MODE: &str = "desc";

/// Page requested when none (or zero) is given.
pub const DEFAULT_PAGE: i64 = 1;

/// Page size requested when none (or zero) is given.
pub const DEFAULT_PAGE_SIZE: i64 = 10;

/// HTTP client for the helpdesk API.
///
/// Handles authentication, request formatting, and response parsing.
/// Cloning is cheap; one instance is shared by every tool handler.
///
/// # Example
///
/// ```ignore
/// let config = Config::from_env()?;
/// let client = DeskClient::new(&config)?;
///
/// let page = client.tickets().list(&ListParams::new()).await?;
/// println!("{} tickets in total", page.pagination.records);
/// ```
#[derive(Clone)]
pub struct DeskClient {
    /// The underlying HTTP client (cloning is cheap).
    http: Client,

    /// API root (e.g., `https://acme.teamwork.com/desk/api/v2`).
    base_url: String,

    /// Bearer token for authentication.
    /// SECURITY: Never log this value!
    api_token: String,
}

impl DeskClient {
    /// Creates a new client from configuration.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::HttpClient` if the HTTP client fails to initialize.
    pub fn new(config: &Config) -> Result<Self, DeskError> {
        let http = Client::builder()
            .user_agent(concat!("deskmcp/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(DeskError::HttpClient)?;

        Ok(Self {
            http,
            base_url: Self::normalize_base_url(&config.base_url),
            api_token: config.api_token.clone(),
        })
    }

    /// Normalizes the base URL to ensure it includes the API prefix.
    fn normalize_base_url(url: &str) -> String {
        let url = url.trim_end_matches('/');
        if url.ends_with(API_PREFIX) {
            url.to_string()
        } else if url.ends_with("/desk/api") {
            format!("{}/v2", url)
        } else {
            format!("{}{}", url, API_PREFIX)
        }
    }

    /// Returns the API root every request path is appended to.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Renders an error for logs and tool results with the token removed.
    pub fn sanitize_error(&self, error: &DeskError) -> String {
        error.sanitized_display(&self.api_token)
    }

    /// Returns the sub-client for resource `R`.
    pub fn resource<R: Resource>(&self) -> ResourceClient<'_, R> {
        ResourceClient {
            desk: self,
            resource: PhantomData,
        }
    }

    /// Ticket endpoints.
    pub fn tickets(&self) -> ResourceClient<'_, Tickets> {
        self.resource()
    }

    /// Customer endpoints.
    pub fn customers(&self) -> ResourceClient<'_, Customers> {
        self.resource()
    }

    /// Company endpoints.
    pub fn companies(&self) -> ResourceClient<'_, Companies> {
        self.resource()
    }

    /// User endpoints.
    pub fn users(&self) -> ResourceClient<'_, Users> {
        self.resource()
    }

    /// Tag endpoints.
    pub fn tags(&self) -> ResourceClient<'_, Tags> {
        self.resource()
    }

    /// Ticket status endpoints.
    pub fn ticket_statuses(&self) -> ResourceClient<'_, TicketStatuses> {
        self.resource()
    }

    /// Ticket type endpoints.
    pub fn ticket_types(&self) -> ResourceClient<'_, TicketTypes> {
        self.resource()
    }

    /// Makes a request to the helpdesk API and returns the response body.
    ///
    /// # Arguments
    ///
    /// * `method` - HTTP method
    /// * `path` - API endpoint path relative to the API root
    /// * `query` - Query-string pairs, sent in order
    /// * `payload` - Optional JSON body
    async fn execute(
        &self,
        method: Method,
        path: &str,
        query: &[(String, String)],
        payload: Option<&Value>,
    ) -> Result<String, DeskError> {
        let url = format!("{}{}", self.base_url, path);

        tracing::debug!(
            method = %method,
            path = %path,
            params = query.len(),
            "Making helpdesk API request"
        );

        let mut req = self
            .http
            .request(method, &url)
            .bearer_auth(&self.api_token)
            .header("Accept", "application/json");

        if !query.is_empty() {
            req = req.query(query);
        }
        if let Some(payload) = payload {
            req = req.json(payload);
        }

        let response = req.send().await.map_err(DeskError::Http)?;
        let status = response.status();

        if !status.is_success() {
            return Err(self.handle_http_error(status, response).await);
        }

        let body = response.text().await.map_err(DeskError::Http)?;

        tracing::trace!(body = %body, "Helpdesk API response");

        Ok(body)
    }

    /// Handles HTTP-level errors and converts to DeskError.
    async fn handle_http_error(&self, status: StatusCode, response: reqwest::Response) -> DeskError {
        let retry_after = response
            .headers()
            .get("retry-after")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u64>().ok())
            .map(Duration::from_secs);

        let path = response.url().path().to_string();
        let body = response.text().await.unwrap_or_default();
        let body = DeskError::sanitize_message(&body, &self.api_token);
        let body = truncate_body(body);

        match status {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => DeskError::Authentication,
            StatusCode::NOT_FOUND => DeskError::not_found("resource", path),
            StatusCode::TOO_MANY_REQUESTS => {
                tracing::warn!("Rate limited by helpdesk server");
                DeskError::RateLimited { retry_after }
            }
            _ => DeskError::HttpStatus { status, body },
        }
    }
}

/// Cuts an error body down to `MAX_ERROR_BODY_LEN` bytes on a char boundary.
fn truncate_body(body: String) -> String {
    if body.len() <= MAX_ERROR_BODY_LEN {
        return body;
    }
    let mut end = MAX_ERROR_BODY_LEN;
    while !body.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...[truncated]", &body[..end])
}

/// The list, get and create endpoints of one resource.
pub struct ResourceClient<'a, R> {
    desk: &'a DeskClient,
    resource: PhantomData<fn() -> R>,
}

impl<R: Resource> ResourceClient<'_, R> {
    /// Lists records matching `params`.
    ///
    /// Returns the page of records together with side-loaded references
    /// and pagination metadata.
    pub async fn list(&self, params: &ListParams) -> Result<ListResponse<R::Record>, DeskError> {
        let path = format!("/{}.json", R::PATH);
        let body = self
            .desk
            .execute(Method::GET, &path, &params.to_query(), None)
            .await?;

        ListResponse::from_body(&body, R::PATH)
    }

    /// Gets a single record by ID.
    ///
    /// # Errors
    ///
    /// Returns `DeskError::NotFound` if the record doesn't exist.
    pub async fn get(&self, id: u64) -> Result<R::Record, DeskError> {
        let path = format!("/{}/{}.json", R::PATH, id);
        let body = self
            .desk
            .execute(Method::GET, &path, &[], None)
            .await
            .map_err(|e| match e {
                DeskError::NotFound { .. } => DeskError::not_found(R::SINGULAR, id.to_string()),
                other => other,
            })?;

        from_envelope(&body, R::KEY)
    }

    /// Creates a record and returns it as stored by the helpdesk.
    pub async fn create(&self, draft: &R::Draft) -> Result<R::Record, DeskError> {
        let path = format!("/{}.json", R::PATH);
        let payload = to_envelope(draft, R::KEY)?;
        let body = self
            .desk
            .execute(Method::POST, &path, &[], Some(&payload))
            .await?;

        from_envelope(&body, R::KEY)
    }
}

/// Filter, sort and pagination parameters for list calls.
///
/// Unset or zero-valued settings fall back to the defaults when the query is
/// built, so every list call sends all four pagination fields.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListParams {
    /// Field filters, forwarded verbatim in insertion order.
    filters: Vec<(String, String)>,

    /// Field to sort by.
    order_by: Option<String>,

    /// Sort direction: "asc" or "desc".
    order_mode: Option<String>,

    /// Page number (1-based).
    page: Option<i64>,

    /// Records per page.
    page_size: Option<i64>,
}

impl ListParams {
    /// Creates empty list parameters (all defaults, no filters).
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a field filter. The field name is not checked locally.
    pub fn with_filter(mut self, field: impl Into<String>, value: impl Into<String>) -> Self {
        self.filters.push((field.into(), value.into()));
        self
    }

    /// Sets the sort field.
    pub fn with_order_by(mut self, order_by: impl Into<String>) -> Self {
        self.order_by = Some(order_by.into());
        self
    }

    /// Sets the sort direction.
    pub fn with_order_mode(mut self, order_mode: impl Into<String>) -> Self {
        self.order_mode = Some(order_mode.into());
        self
    }

    /// Sets the page number.
    pub fn with_page(mut self, page: i64) -> Self {
        self.page = Some(page);
        self
    }

    /// Sets the number of records per page.
    pub fn with_page_size(mut self, page_size: i64) -> Self {
        self.page_size = Some(page_size);
        self
    }

    /// Builds the query string pairs: filters first, then
    /// `orderBy`, `orderMode`, `page` and `pageSize` with defaults applied.
    ///
    /// Out-of-range pages and page sizes are passed through; the API
    /// enforces its own bounds.
    pub fn to_query(&self) -> Vec<(String, String)> {
        let order_by = self
            .order_by
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ORDER_BY);
        let order_mode = self
            .order_mode
            .as_deref()
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_ORDER_MODE);
        let page = self.page.filter(|&p| p != 0).unwrap_or(DEFAULT_PAGE);
        let page_size = self
            .page_size
            .filter(|&p| p != 0)
            .unwrap_or(DEFAULT_PAGE_SIZE);

        let mut query = self.filters.clone();
        query.push(("orderBy".to_string(), order_by.to_string()));
        query.push(("orderMode".to_string(), order_mode.to_string()));
        query.push(("page".to_string(), page.to_string()));
        query.push(("pageSize".to_string(), page_size.to_string()));
        query
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
        items
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            DeskClient::normalize_base_url("https://acme.teamwork.com"),
            "https://acme.teamwork.com/desk/api/v2"
        );
        assert_eq!(
            DeskClient::normalize_base_url("https://acme.teamwork.com/"),
            "https://acme.teamwork.com/desk/api/v2"
        );
        assert_eq!(
            DeskClient::normalize_base_url("https://acme.teamwork.com/desk/api/v2/"),
            "https://acme.teamwork.com/desk/api/v2"
        );
        assert_eq!(
            DeskClient::normalize_base_url("https://acme.teamwork.com/desk/api"),
            "https://acme.teamwork.com/desk/api/v2"
        );
    }

    #[test]
    fn test_list_params_defaults() {
        assert_eq!(
            ListParams::new().to_query(),
            pairs(&[
                ("orderBy", "createdAt"),
                ("orderMode", "desc"),
                ("page", "1"),
                ("pageSize", "10"),
            ])
        );
    }

    #[test]
    fn test_list_params_zero_and_empty_fall_back_to_defaults() {
        let params = ListParams::new()
            .with_order_by("")
            .with_order_mode("")
            .with_page(0)
            .with_page_size(0);
        assert_eq!(params.to_query(), ListParams::new().to_query());
    }

    #[test]
    fn test_list_params_explicit_values() {
        let params = ListParams::new()
            .with_order_by("updatedAt")
            .with_order_mode("asc")
            .with_page(3)
            .with_page_size(50);
        assert_eq!(
            params.to_query(),
            pairs(&[
                ("orderBy", "updatedAt"),
                ("orderMode", "asc"),
                ("page", "3"),
                ("pageSize", "50"),
            ])
        );
    }

    #[test]
    fn test_list_params_out_of_range_passes_through() {
        let query = ListParams::new().with_page(-2).with_page_size(500).to_query();
        assert!(query.contains(&("page".to_string(), "-2".to_string())));
        assert!(query.contains(&("pageSize".to_string(), "500".to_string())));
    }

    #[test]
    fn test_list_params_filters_come_first() {
        let query = ListParams::new()
            .with_filter("email", "a@b.com")
            .with_filter("role", "admin")
            .to_query();
        assert_eq!(query.len(), 6);
        assert_eq!(
            &query[..2],
            &pairs(&[("email", "a@b.com"), ("role", "admin")])[..]
        );
    }

    #[test]
    fn test_truncate_body() {
        assert_eq!(truncate_body("short".to_string()), "short");

        let long = "é".repeat(400);
        let truncated = truncate_body(long);
        assert!(truncated.ends_with("...[truncated]"));
        assert!(truncated.len() <= MAX_ERROR_BODY_LEN + "...[truncated]".len());
    }

    /// Creates a DeskClient for unit tests without requiring env vars.
    fn test_client() -> DeskClient {
        DeskClient {
            http: Client::new(),
            base_url: "https://acme.teamwork.com/desk/api/v2".to_string(),
            api_token: "tkn_unit".to_string(),
        }
    }

    #[test]
    fn test_sanitize_error_hides_token() {
        let client = test_client();
        let err = DeskError::HttpStatus {
            status: StatusCode::BAD_REQUEST,
            body: "token tkn_unit rejected".to_string(),
        };
        assert_eq!(
            client.sanitize_error(&err),
            "HTTP 400 Bad Request: token [REDACTED] rejected"
        );
    }

    #[test]
    fn test_base_url_accessor() {
        assert_eq!(test_client().base_url(), "https://acme.teamwork.com/desk/api/v2");
    }
}
