//! BOQ page state.
//!
//! Holds the projects, approved BOQ list and BOQ details together with their
//! loading and error flags. Every fetch is stamped with a [`RequestTicket`];
//! a completion is applied only when its ticket is still the newest one for
//! that kind of request, so a slow response for an old selection can never
//! overwrite a newer one.

use aqs_models::{BoqSummary, EntityId, Project};
use aqs_utils::{normalize_boq, normalize_projects, AqsResult, BoqCard};
use serde::Serialize;
use serde_json::Value;

use crate::api::{require_id, BoqApi};
use crate::enrichment::enrich_boq_list;

pub const SELECT_PROJECT_NOTICE: &str = "Please select a project to view approved BOQs";
pub const MISSING_BOQ_NOTICE: &str = "No BOQ ID provided. Please select a BOQ from the list.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    Projects,
    BoqList,
    BoqDetails,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTicket {
    kind: RequestKind,
    seq: u64,
}

impl RequestTicket {
    pub fn kind(&self) -> RequestKind {
        self.kind
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoqState {
    pub projects: Vec<Project>,
    pub approved_boq_list: Vec<BoqSummary>,
    pub approved_boq_details: Vec<BoqSummary>,

    pub loading: bool,
    pub boq_list_loading: bool,
    pub boq_details_loading: bool,

    pub error: Option<String>,
    pub boq_list_error: Option<String>,
    pub boq_details_error: Option<String>,

    /// Advisory text for the list page, e.g. no project selected yet.
    pub boq_list_notice: Option<String>,
    /// Advisory text for the detail page, e.g. no BOQ selected or nothing found.
    pub boq_details_notice: Option<String>,
}

impl BoqState {
    /// The BOQ a detail page shows.
    pub fn selected_boq(&self) -> Option<&BoqSummary> {
        self.approved_boq_details.first()
    }

    pub fn cards(&self) -> Vec<BoqCard> {
        self.approved_boq_list.iter().map(BoqCard::from_summary).collect()
    }
}

#[derive(Debug, Default)]
pub struct BoqStore {
    state: BoqState,
    next_seq: u64,
    latest_projects: u64,
    latest_list: u64,
    latest_details: u64,
}

impl BoqStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &BoqState {
        &self.state
    }

    /// Mark a request as in flight and make it the newest of its kind.
    pub fn begin(&mut self, kind: RequestKind) -> RequestTicket {
        let seq = self.bump(kind);
        match kind {
            RequestKind::Projects => {
                self.state.loading = true;
                self.state.error = None;
            }
            RequestKind::BoqList => {
                self.state.boq_list_loading = true;
                self.state.boq_list_error = None;
            }
            RequestKind::BoqDetails => {
                self.state.boq_details_loading = true;
                self.state.boq_details_error = None;
            }
        }
        RequestTicket { kind, seq }
    }

    pub fn is_current(&self, ticket: RequestTicket) -> bool {
        ticket.seq == self.latest(ticket.kind)
    }

    pub fn complete_projects(&mut self, ticket: RequestTicket, result: AqsResult<Value>) -> bool {
        if !self.accept(ticket, RequestKind::Projects) {
            return false;
        }
        self.state.loading = false;
        match result {
            Ok(raw) => self.state.projects = normalize_projects(raw),
            Err(e) => self.state.error = Some(e.user_message()),
        }
        true
    }

    pub fn complete_boq_list(
        &mut self,
        ticket: RequestTicket,
        result: AqsResult<Vec<BoqSummary>>,
    ) -> bool {
        if !self.accept(ticket, RequestKind::BoqList) {
            return false;
        }
        self.state.boq_list_loading = false;
        match result {
            Ok(list) => self.state.approved_boq_list = list,
            Err(e) => self.state.boq_list_error = Some(e.user_message()),
        }
        true
    }

    /// Replace the list with its enriched form, if the request is still current.
    pub fn set_approved_boq_list(&mut self, ticket: RequestTicket, list: Vec<BoqSummary>) -> bool {
        if !self.accept(ticket, RequestKind::BoqList) {
            return false;
        }
        self.state.approved_boq_list = list;
        true
    }

    pub fn complete_boq_details(
        &mut self,
        ticket: RequestTicket,
        boq_id: &EntityId,
        result: AqsResult<Value>,
    ) -> bool {
        if !self.accept(ticket, RequestKind::BoqDetails) {
            return false;
        }
        self.state.boq_details_loading = false;
        match result {
            Ok(raw) => {
                self.state.approved_boq_details = normalize_boq(raw);
                if self.state.approved_boq_details.is_empty() {
                    self.state.boq_details_notice =
                        Some(format!("No approved BOQ details found for BOQ ID: {}", boq_id));
                }
            }
            Err(e) => self.state.boq_details_error = Some(e.user_message()),
        }
        true
    }

    pub async fn fetch_projects<A: BoqApi>(&mut self, api: &A) {
        let ticket = self.begin(RequestKind::Projects);
        let result = api.approved_projects().await;
        if let Err(e) = &result {
            tracing::error!(error = %e, "BOQ Projects fetch failed");
        }
        self.complete_projects(ticket, result);
    }

    /// Fetch the approved BOQs of a project, show them, then show them again
    /// once approvers and items have been filled in.
    pub async fn fetch_approved_boq_list<A: BoqApi>(&mut self, api: &A, project_id: Option<&EntityId>) {
        let project_id = match require_id(project_id, "projectId", SELECT_PROJECT_NOTICE) {
            Ok(id) => id,
            Err(e) => {
                self.bump(RequestKind::BoqList);
                self.state.approved_boq_list.clear();
                self.state.boq_list_loading = false;
                self.state.boq_list_notice = Some(e.user_message());
                return;
            }
        };
        self.state.boq_list_notice = None;

        let ticket = self.begin(RequestKind::BoqList);
        let list = match api.approved_boq_list(project_id).await {
            Ok(raw) => normalize_boq(raw),
            Err(e) => {
                tracing::error!(project_id = %project_id, error = %e, "Approved BOQ list fetch failed");
                self.complete_boq_list(ticket, Err(e));
                return;
            }
        };

        self.complete_boq_list(ticket, Ok(list.clone()));
        let enriched = enrich_boq_list(api, list).await;
        self.set_approved_boq_list(ticket, enriched);
    }

    pub async fn fetch_approved_boq_details<A: BoqApi>(&mut self, api: &A, boq_id: Option<&EntityId>) {
        let boq_id = match require_id(boq_id, "boqId", MISSING_BOQ_NOTICE) {
            Ok(id) => id,
            Err(e) => {
                tracing::warn!("No boqId found - cannot fetch BOQ details");
                self.bump(RequestKind::BoqDetails);
                self.state.approved_boq_details.clear();
                self.state.boq_details_loading = false;
                self.state.boq_details_notice = Some(e.user_message());
                return;
            }
        };
        self.state.boq_details_notice = None;

        let ticket = self.begin(RequestKind::BoqDetails);
        let result = api.approved_boq_details(boq_id).await;
        if let Err(e) = &result {
            tracing::error!(boq_id = %boq_id, error = %e, "Approved BOQ details fetch failed");
        }
        self.complete_boq_details(ticket, boq_id, result);
    }

    fn bump(&mut self, kind: RequestKind) -> u64 {
        self.next_seq += 1;
        let seq = self.next_seq;
        match kind {
            RequestKind::Projects => self.latest_projects = seq,
            RequestKind::BoqList => self.latest_list = seq,
            RequestKind::BoqDetails => self.latest_details = seq,
        }
        seq
    }

    fn latest(&self, kind: RequestKind) -> u64 {
        match kind {
            RequestKind::Projects => self.latest_projects,
            RequestKind::BoqList => self.latest_list,
            RequestKind::BoqDetails => self.latest_details,
        }
    }

    fn accept(&self, ticket: RequestTicket, expected: RequestKind) -> bool {
        if ticket.kind != expected {
            tracing::warn!(kind = ?ticket.kind, expected = ?expected, "Ticket used for the wrong request kind");
            return false;
        }
        if !self.is_current(ticket) {
            tracing::debug!(kind = ?ticket.kind, seq = ticket.seq, "Dropping stale response");
            return false;
        }
        true
    }
}
