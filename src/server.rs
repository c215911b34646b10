//! MCP server implementation for deskmcp.
//!
//! This module defines the `DeskServer` struct that implements the MCP
//! `ServerHandler` trait, exposing helpdesk operations as tools. Each tool
//! delegates to a generic handler in [`crate::tools::handlers`].

use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};

use crate::desk_client::DeskClient;
use crate::resource::{Companies, Customers, Tags, TicketStatuses, TicketTypes, Tickets, Users};
use crate::tools::{
    handlers, CountInput, CreateNamedInput, CreatePersonInput, CreateTicketInput, GetInput,
    ListInput,
};

/// The deskmcp MCP server.
///
/// Holds the shared helpdesk client; every tool call borrows it.
#[derive(Clone)]
pub struct DeskServer {
    /// Helpdesk client for API operations.
    desk: DeskClient,
    /// Tool router for MCP tool dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl DeskServer {
    /// Creates a new server instance.
    ///
    /// # Arguments
    ///
    /// * `desk` - The helpdesk client used by every tool
    pub fn new(desk: DeskClient) -> Self {
        Self {
            desk,
            tool_router: Self::tool_router(),
        }
    }

    // ========================================================================
    // Tickets
    // ========================================================================

    #[tool(description = "List tickets. Returns a JSON array of {id, subject, status, created_at, updated_at, preview_text}. \
        Filter fields: status (e.g. \"open\", \"closed\", \"pending\"), priority, created_at, updated_at, customer_id, company_id, assigned_user_id. \
        orderBy: createdAt or updatedAt. orderMode: asc or desc.")]
    async fn list_tickets(
        &self,
        Parameters(input): Parameters<ListInput>,
    ) -> Result<String, String> {
        handlers::list_tickets(&self.desk, input).await
    }

    #[tool(description = "Count all tickets matching an optional filter. Returns the total as a plain number. \
        Filter fields: status, priority, created_at, updated_at, customer_id, company_id, assigned_user_id.")]
    async fn count_tickets(
        &self,
        Parameters(input): Parameters<CountInput>,
    ) -> Result<String, String> {
        handlers::count_tickets(&self.desk, input).await
    }

    #[tool(description = "Get a specific ticket by ID.")]
    async fn get_ticket(&self, Parameters(input): Parameters<GetInput>) -> Result<String, String> {
        handlers::get::<Tickets>(&self.desk, input).await
    }

    #[tool(description = "Create a new ticket. Subject and preview_text are required.")]
    async fn create_ticket(
        &self,
        Parameters(input): Parameters<CreateTicketInput>,
    ) -> Result<String, String> {
        handlers::create::<Tickets, _>(&self.desk, input).await
    }

    // ========================================================================
    // Customers
    // ========================================================================

    #[tool(description = "List customers as a JSON array. \
        Filter fields: email, first_name, last_name, company_id, created_at, updated_at. \
        orderBy: createdAt, updatedAt, firstName, lastName or email. orderMode: asc or desc.")]
    async fn list_customers(
        &self,
        Parameters(input): Parameters<ListInput>,
    ) -> Result<String, String> {
        handlers::list::<Customers>(&self.desk, input).await
    }

    #[tool(description = "Get a specific customer by ID.")]
    async fn get_customer(&self, Parameters(input): Parameters<GetInput>) -> Result<String, String> {
        handlers::get::<Customers>(&self.desk, input).await
    }

    #[tool(description = "Create a new customer. first_name, last_name and email are required.")]
    async fn create_customer(
        &self,
        Parameters(input): Parameters<CreatePersonInput>,
    ) -> Result<String, String> {
        handlers::create::<Customers, _>(&self.desk, input).await
    }

    // ========================================================================
    // Companies
    // ========================================================================

    #[tool(description = "List companies as a JSON array. \
        Filter fields: name, created_at, updated_at. \
        orderBy: createdAt, updatedAt or name. orderMode: asc or desc.")]
    async fn list_companies(
        &self,
        Parameters(input): Parameters<ListInput>,
    ) -> Result<String, String> {
        handlers::list::<Companies>(&self.desk, input).await
    }

    #[tool(description = "Get a specific company by ID.")]
    async fn get_company(&self, Parameters(input): Parameters<GetInput>) -> Result<String, String> {
        handlers::get::<Companies>(&self.desk, input).await
    }

    #[tool(description = "Create a new company. Name is required.")]
    async fn create_company(
        &self,
        Parameters(input): Parameters<CreateNamedInput>,
    ) -> Result<String, String> {
        handlers::create::<Companies, _>(&self.desk, input).await
    }

    // ========================================================================
    // Users
    // ========================================================================

    #[tool(description = "List helpdesk users (agents) as a JSON array. \
        Filter fields: email, first_name, last_name, role, created_at, updated_at. \
        orderBy: createdAt, updatedAt, firstName, lastName, email or role. orderMode: asc or desc.")]
    async fn list_users(&self, Parameters(input): Parameters<ListInput>) -> Result<String, String> {
        handlers::list::<Users>(&self.desk, input).await
    }

    #[tool(description = "Get a specific user by ID.")]
    async fn get_user(&self, Parameters(input): Parameters<GetInput>) -> Result<String, String> {
        handlers::get::<Users>(&self.desk, input).await
    }

    #[tool(description = "Create a new user. first_name, last_name and email are required.")]
    async fn create_user(
        &self,
        Parameters(input): Parameters<CreatePersonInput>,
    ) -> Result<String, String> {
        handlers::create::<Users, _>(&self.desk, input).await
    }

    // ========================================================================
    // Tags
    // ========================================================================

    #[tool(description = "List tags as a JSON array. \
        Filter fields: name, created_at, updated_at. \
        orderBy: createdAt, updatedAt or name. orderMode: asc or desc.")]
    async fn list_tags(&self, Parameters(input): Parameters<ListInput>) -> Result<String, String> {
        handlers::list::<Tags>(&self.desk, input).await
    }

    #[tool(description = "Get a specific tag by ID.")]
    async fn get_tag(&self, Parameters(input): Parameters<GetInput>) -> Result<String, String> {
        handlers::get::<Tags>(&self.desk, input).await
    }

    #[tool(description = "Create a new tag. Name is required.")]
    async fn create_tag(
        &self,
        Parameters(input): Parameters<CreateNamedInput>,
    ) -> Result<String, String> {
        handlers::create::<Tags, _>(&self.desk, input).await
    }

    // ========================================================================
    // Ticket statuses
    // ========================================================================

    #[tool(description = "List ticket statuses as a JSON array. \
        Filter fields: name, created_at, updated_at. \
        orderBy: createdAt, updatedAt or name. orderMode: asc or desc.")]
    async fn list_ticket_statuses(
        &self,
        Parameters(input): Parameters<ListInput>,
    ) -> Result<String, String> {
        handlers::list::<TicketStatuses>(&self.desk, input).await
    }

    #[tool(description = "Get a specific ticket status by ID.")]
    async fn get_ticket_status(
        &self,
        Parameters(input): Parameters<GetInput>,
    ) -> Result<String, String> {
        handlers::get::<TicketStatuses>(&self.desk, input).await
    }

    #[tool(description = "Create a new ticket status. Name is required.")]
    async fn create_ticket_status(
        &self,
        Parameters(input): Parameters<CreateNamedInput>,
    ) -> Result<String, String> {
        handlers::create::<TicketStatuses, _>(&self.desk, input).await
    }

    // ========================================================================
    // Ticket types
    // ========================================================================

    #[tool(description = "List ticket types as a JSON array. \
        Filter fields: name, created_at, updated_at. \
        orderBy: createdAt, updatedAt or name. orderMode: asc or desc.")]
    async fn list_ticket_types(
        &self,
        Parameters(input): Parameters<ListInput>,
    ) -> Result<String, String> {
        handlers::list::<TicketTypes>(&self.desk, input).await
    }

    #[tool(description = "Get a specific ticket type by ID.")]
    async fn get_ticket_type(
        &self,
        Parameters(input): Parameters<GetInput>,
    ) -> Result<String, String> {
        handlers::get::<TicketTypes>(&self.desk, input).await
    }

    #[tool(description = "Create a new ticket type. Name is required.")]
    async fn create_ticket_type(
        &self,
        Parameters(input): Parameters<CreateNamedInput>,
    ) -> Result<String, String> {
        handlers::create::<TicketTypes, _>(&self.desk, input).await
    }
}

#[tool_handler]
impl ServerHandler for DeskServer {
    /// Returns server information for the MCP initialize handshake.
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            instructions: Some(
                "deskmcp provides access to a Teamwork Desk helpdesk. \
                 Every resource (tickets, customers, companies, users, tags, ticket statuses, \
                 ticket types) has list_*, get_* and create_* tools. List tools accept a filter \
                 object plus orderBy, orderMode, page and pageSize; get tools take the record ID \
                 as a string. Use count_tickets for totals."
                    .into(),
            ),
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use serde_json::json;

    fn test_client() -> DeskClient {
        let config = Config::new("https://acme.teamwork.com", "tkn_server_tests")
            .expect("valid test config");
        DeskClient::new(&config).expect("Failed to create test client")
    }

    #[test]
    fn test_server_creation() {
        let server = DeskServer::new(test_client());
        let info = server.get_info();
        assert!(info.instructions.is_some());
    }

    #[test]
    fn test_server_info_has_tools_capability() {
        let server = DeskServer::new(test_client());
        let info = server.get_info();
        assert!(info.capabilities.tools.is_some());
    }

    #[test]
    fn test_all_tools_registered() {
        let server = DeskServer::new(test_client());
        let mut names: Vec<String> = server
            .tool_router
            .list_all()
            .into_iter()
            .map(|tool| tool.name.to_string())
            .collect();
        names.sort();

        let mut expected = vec!["count_tickets".to_string()];
        for (singular, plural) in [
            ("ticket", "tickets"),
            ("customer", "customers"),
            ("company", "companies"),
            ("user", "users"),
            ("tag", "tags"),
            ("ticket_status", "ticket_statuses"),
            ("ticket_type", "ticket_types"),
        ] {
            expected.push(format!("list_{}", plural));
            expected.push(format!("get_{}", singular));
            expected.push(format!("create_{}", singular));
        }
        expected.sort();

        assert_eq!(names, expected);
    }

    #[tokio::test]
    async fn test_get_tool_rejects_bad_id_without_network() {
        let server = DeskServer::new(test_client());
        let err = server
            .get_ticket_status(Parameters(GetInput { id: json!("open") }))
            .await
            .unwrap_err();
        assert!(err.starts_with("Invalid ticket status ID: "));
    }

    #[tokio::test]
    async fn test_list_tool_rejects_bad_page_without_network() {
        let server = DeskServer::new(test_client());
        let input: ListInput = serde_json::from_value(json!({"pageSize": "ten"})).unwrap();
        let err = server.list_users(Parameters(input)).await.unwrap_err();
        assert_eq!(
            err,
            "Invalid users query: pageSize must be an integer, got string"
        );
    }

    #[tokio::test]
    async fn test_create_tool_rejects_empty_name_without_network() {
        let server = DeskServer::new(test_client());
        let err = server
            .create_tag(Parameters(CreateNamedInput {
                name: "  ".to_string(),
            }))
            .await
            .unwrap_err();
        assert_eq!(
            err,
            "Invalid tag arguments: name is required and cannot be empty"
        );
    }
}
