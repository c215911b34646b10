//! Data models for the helpdesk API.
//!
//! This module contains type definitions for the helpdesk API, including
//! ticket models, people (customers and users), named catalogue records,
//! and common response types.

mod catalog;
mod common;
mod people;
mod ticket;

pub use catalog::*;
pub use common::*;
pub use people::*;
pub use ticket::*;
