//! Generic tool handlers.
//!
//! One implementation of list, get and create serves every resource; the
//! resource is chosen with a [`Resource`] type parameter. Each handler
//! returns the tool's text on success or a step-prefixed message on
//! failure, e.g. `Failed to list tickets: ...` or `Invalid ticket ID: ...`.

use std::fmt::Debug;

use serde::Serialize;

use crate::desk_client::{DeskClient, ListParams};
use crate::error::DeskError;
use crate::models::{summarize_tickets, ListResponse};
use crate::resource::{Resource, Tickets};

use super::inputs::{CountInput, DraftInput, GetInput, ListInput};

/// Lists records of `R` and returns them as a JSON array.
pub async fn list<R: Resource>(desk: &DeskClient, input: ListInput) -> Result<String, String> {
    tracing::debug!(resource = R::PATH, ?input, "list tool called");

    let params = list_params::<R>(&input)?;
    let page = fetch_page::<R>(desk, &params).await?;

    to_json(&page.items, R::PLURAL)
}

/// Lists tickets, reshaping each into a summary with its status name
/// resolved from the side-loaded statuses.
pub async fn list_tickets(desk: &DeskClient, input: ListInput) -> Result<String, String> {
    tracing::debug!(?input, "list_tickets tool called");

    let params = list_params::<Tickets>(&input)?;
    let page = fetch_page::<Tickets>(desk, &params).await?;
    let summaries = summarize_tickets(&page.items, &page.included.ticketstatuses);

    to_json(&summaries, Tickets::PLURAL)
}

/// Returns the total number of tickets matching the filter as plain text.
pub async fn count_tickets(desk: &DeskClient, input: CountInput) -> Result<String, String> {
    tracing::debug!(?input, "count_tickets tool called");

    let params = input
        .to_params()
        .map_err(|e| format!("Invalid {} query: {}", Tickets::PLURAL, e))?;

    let page = desk
        .tickets()
        .list(&params)
        .await
        .map_err(|e| failure(desk, &e, "Failed to count tickets"))?;

    Ok(page.pagination.records.to_string())
}

/// Gets one record of `R` by its string ID and returns it as a JSON object.
pub async fn get<R: Resource>(desk: &DeskClient, input: GetInput) -> Result<String, String> {
    tracing::debug!(resource = R::PATH, id = %input.id, "get tool called");

    let id = input
        .parse_id()
        .map_err(|e| format!("Invalid {} ID: {}", R::SINGULAR, e))?;

    let record = desk
        .resource::<R>()
        .get(id)
        .await
        .map_err(|e| failure(desk, &e, &format!("Failed to get {}", R::SINGULAR)))?;

    to_json(&record, R::SINGULAR)
}

/// Creates a record of `R` and returns the stored record as a JSON object.
pub async fn create<R, I>(desk: &DeskClient, input: I) -> Result<String, String>
where
    R: Resource,
    I: DraftInput<Draft = R::Draft> + Debug,
{
    tracing::debug!(resource = R::PATH, ?input, "create tool called");

    let draft = input
        .into_draft()
        .map_err(|e| format!("Invalid {} arguments: {}", R::SINGULAR, e))?;

    let record = desk
        .resource::<R>()
        .create(&draft)
        .await
        .map_err(|e| failure(desk, &e, &format!("Failed to create {}", R::SINGULAR)))?;

    tracing::info!(resource = R::PATH, "Created {}", R::SINGULAR);

    to_json(&record, R::SINGULAR)
}

fn list_params<R: Resource>(input: &ListInput) -> Result<ListParams, String> {
    input
        .to_params()
        .map_err(|e| format!("Invalid {} query: {}", R::PLURAL, e))
}

async fn fetch_page<R: Resource>(
    desk: &DeskClient,
    params: &ListParams,
) -> Result<ListResponse<R::Record>, String> {
    desk.resource::<R>()
        .list(params)
        .await
        .map_err(|e| failure(desk, &e, &format!("Failed to list {}", R::PLURAL)))
}

/// Logs a failed remote call and renders it as a tool error.
fn failure(desk: &DeskClient, error: &DeskError, context: &str) -> String {
    let sanitized = desk.sanitize_error(error);
    tracing::error!(error = %sanitized, "{}", context);
    format!("{}: {}", context, sanitized)
}

fn to_json<T: Serialize + ?Sized>(value: &T, label: &str) -> Result<String, String> {
    serde_json::to_string(value).map_err(|e| {
        tracing::error!(error = %e, "Failed to marshal {}", label);
        format!("Failed to marshal {}: {}", label, e)
    })
}
