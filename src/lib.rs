//! # deskmcp
//!
//! An MCP (Model Context Protocol) server for the Teamwork Desk helpdesk.
//!
//! Each helpdesk resource (tickets, customers, companies, users, tags,
//! ticket statuses and ticket types) is exposed as a set of list, get and
//! create tools. Tickets additionally have `count_tickets`, and
//! `list_tickets` reshapes tickets into compact summaries with the status
//! name resolved.
//!
//! ## Architecture
//!
//! - [`config`] - Configuration loading from environment variables
//! - [`error`] - Error types; the API token is redacted from messages
//! - [`desk_client`] - HTTP client for the helpdesk REST API
//! - [`resource`] - Per-resource paths, envelope keys and record types
//! - [`models`] - Wire records and the ticket summary
//! - [`tools`] - Tool inputs and the generic list/get/create handlers
//! - [`server`] - MCP server with tool routing
//!
//! ## Example
//!
//! ```ignore
//! use deskmcp::config::Config;
//! use deskmcp::desk_client::{DeskClient, ListParams};
//!
//! async fn example() -> Result<(), deskmcp::error::DeskError> {
//!     let config = Config::from_env()?;
//!     let desk = DeskClient::new(&config)?;
//!
//!     let params = ListParams::new()
//!         .with_filter("status", "open")
//!         .with_page_size(5);
//!
//!     let page = desk.tickets().list(&params).await?;
//!     println!("{} open tickets", page.pagination.records);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod config;
pub mod desk_client;
pub mod error;
pub mod models;
pub mod resource;
pub mod server;
pub mod tools;
