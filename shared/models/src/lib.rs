//! # AQS View Models
//!
//! Typed view-models for the AQS portal pages, plus the boundary types used to
//! read the backend's loosely shaped JSON.
//!
//! ## Key Models
//!
//! - **BoqSummary**: an approved Bill of Quantities with its line items and approvers
//! - **Project**: a site the employee can pick BOQs for
//! - **Column / Task**: Kanban board columns and their ticket cards
//! - **BoardView**: the state of the board page (loading, empty, failed, ready, ...)
//! - **SessionContext**: the logged-in employee and role, passed explicitly
//!
//! ## Payload Handling
//!
//! - [`OneOrMany`] models endpoints that answer with one record or a list
//! - [`payload::lenient`] field readers never fail; odd fields read as absent
//! - [`EntityId`] keeps numeric and string ids comparable through one key

pub mod board;
pub mod boq;
pub mod id;
pub mod payload;
pub mod routing;
pub mod session;
pub mod timestamp;


pub use board::*;
pub use boq::*;
pub use id::EntityId;
pub use payload::{unwrap_data_envelope, OneOrMany};
pub use routing::{ticket_route, ticket_route_prefix};
pub use session::SessionContext;
pub use timestamp::format_day_month_year;
