//! MCP tool implementations for deskmcp.
//!
//! This module contains the input types and the generic handlers behind
//! the MCP tools that expose helpdesk operations.

pub mod handlers;
mod inputs;

pub use inputs::*;
