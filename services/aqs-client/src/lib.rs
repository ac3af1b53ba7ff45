//! AQS Client
//!
//! Fetches portal payloads and keeps the page state the BOQ dashboard and the
//! Kanban board are rendered from.

pub mod api;
pub mod board;
pub mod enrichment;
pub mod store;

#[cfg(test)]
mod testing;

pub use api::{extract_data, BoardApi, BoqApi, HttpApi};
pub use board::BoardPage;
pub use enrichment::enrich_boq_list;
pub use store::{BoqState, BoqStore, RequestKind, RequestTicket};
