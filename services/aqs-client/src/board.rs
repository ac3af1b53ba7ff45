//! Kanban board page state.

use aqs_models::{BoardView, Column, EntityId, SessionContext};
use aqs_utils::{add_task_today, delete_column, derive_board_view, rename_column};
use serde_json::Value;

use crate::api::BoardApi;

pub const MISSING_USER_NOTICE: &str = "User information not found. Please log in again.";

/// Board view for the logged-in employee plus the local edits made to it.
#[derive(Debug)]
pub struct BoardPage {
    session: SessionContext,
    view: BoardView,
}

impl BoardPage {
    pub fn new(session: SessionContext) -> Self {
        Self {
            session,
            view: BoardView::Loading,
        }
    }

    pub fn view(&self) -> &BoardView {
        &self.view
    }

    pub fn session(&self) -> &SessionContext {
        &self.session
    }

    /// Fetch and derive the board. `handed_over` is an employee id passed by
    /// the navigating page; it wins over the session. Calling this again is
    /// how the page refreshes.
    pub async fn load<A: BoardApi>(&mut self, api: &A, handed_over: Option<&EntityId>) {
        let Some(employee_id) = self.session.resolve_employee_id(handed_over) else {
            tracing::warn!("No employee id in session; board not fetched");
            self.view = BoardView::Unavailable(MISSING_USER_NOTICE.to_string());
            return;
        };

        self.view = BoardView::Loading;
        match api.login_board_details(&employee_id).await {
            Ok(raw) => self.apply_payload(raw),
            Err(e) => {
                tracing::error!(employee_id = %employee_id, error = %e, "Board fetch failed");
                self.view = BoardView::Unavailable(e.user_message());
            }
        }
    }

    /// Recompute the view from a payload, discarding any local edits.
    pub fn apply_payload(&mut self, raw: Value) {
        self.view = derive_board_view(raw);
    }

    pub fn add_task(&mut self, title: &str) -> bool {
        self.view
            .columns_mut()
            .map(|columns| add_task_today(columns, title))
            .unwrap_or(false)
    }

    pub fn rename_column(&mut self, index: usize, new_title: &str) -> bool {
        self.view
            .columns_mut()
            .map(|columns| rename_column(columns, index, new_title))
            .unwrap_or(false)
    }

    pub fn delete_column(&mut self, index: usize) -> Option<Column> {
        self.view
            .columns_mut()
            .and_then(|columns| delete_column(columns, index))
    }

    /// Route for a task card, chosen by the session's role. Drafts have none.
    pub fn task_route(&self, column: usize, task: usize) -> Option<String> {
        let task = self.view.columns().get(column)?.tasks().get(task)?;
        task.ticket_id
            .as_ref()
            .map(|ticket_id| self.session.ticket_route(ticket_id))
    }
}
