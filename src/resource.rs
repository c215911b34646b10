//! Resource descriptors.
//!
//! Every helpdesk resource exposes the same list/get/create endpoints and
//! differs only in its path, envelope key, record type and create payload.
//! A [`Resource`] captures those differences so a single client and a single
//! set of tool handlers serve all of them.

use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::models::{
    Company, Customer, NamedDraft, PersonDraft, Tag, Ticket, TicketDraft, TicketStatus,
    TicketType, User,
};

/// Describes one helpdesk resource type.
pub trait Resource: Send + Sync + 'static {
    /// The record returned by list, get and create.
    type Record: DeserializeOwned + Serialize + Send + Sync;

    /// The payload sent to create a record.
    type Draft: Serialize + Send + Sync;

    /// URL path segment, also the list envelope key (e.g. `ticketstatuses`).
    const PATH: &'static str;

    /// Single-record envelope key (e.g. `ticketstatus`).
    const KEY: &'static str;

    /// Human-readable singular name used in messages (e.g. `ticket status`).
    const SINGULAR: &'static str;

    /// Human-readable plural name used in messages (e.g. `ticket statuses`).
    const PLURAL: &'static str;
}

/// Tickets.
pub struct Tickets;

impl Resource for Tickets {
    type Record = Ticket;
    type Draft = TicketDraft;
    const PATH: &'static str = "tickets";
    const KEY: &'static str = "ticket";
    const SINGULAR: &'static str = "ticket";
    const PLURAL: &'static str = "tickets";
}

/// Customers.
pub struct Customers;

impl Resource for Customers {
    type Record = Customer;
    type Draft = PersonDraft;
    const PATH: &'static str = "customers";
    const KEY: &'static str = "customer";
    const SINGULAR: &'static str = "customer";
    const PLURAL: &'static str = "customers";
}

/// Companies.
pub struct Companies;

impl Resource for Companies {
    type Record = Company;
    type Draft = NamedDraft;
    const PATH: &'static str = "companies";
    const KEY: &'static str = "company";
    const SINGULAR: &'static str = "company";
    const PLURAL: &'static str = "companies";
}

/// Users (agents).
pub struct Users;

impl Resource for Users {
    type Record = User;
    type Draft = PersonDraft;
    const PATH: &'static str = "users";
    const KEY: &'static str = "user";
    const SINGULAR: &'static str = "user";
    const PLURAL: &'static str = "users";
}

/// Tags.
pub struct Tags;

impl Resource for Tags {
    type Record = Tag;
    type Draft = NamedDraft;
    const PATH: &'static str = "tags";
    const KEY: &'static str = "tag";
    const SINGULAR: &'static str = "tag";
    const PLURAL: &'static str = "tags";
}

/// Ticket statuses.
pub struct TicketStatuses;

impl Resource for TicketStatuses {
    type Record = TicketStatus;
    type Draft = NamedDraft;
    const PATH: &'static str = "ticketstatuses";
    const KEY: &'static str = "ticketstatus";
    const SINGULAR: &'static str = "ticket status";
    const PLURAL: &'static str = "ticket statuses";
}

/// Ticket types.
pub struct TicketTypes;

impl Resource for TicketTypes {
    type Record = TicketType;
    type Draft = NamedDraft;
    const PATH: &'static str = "tickettypes";
    const KEY: &'static str = "tickettype";
    const SINGULAR: &'static str = "ticket type";
    const PLURAL: &'static str = "ticket types";
}
