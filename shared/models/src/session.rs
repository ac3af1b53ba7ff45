//! Logged-in user context.
//!
//! Passed explicitly into board loading and routing instead of being read from
//! ambient storage.

use serde::{Deserialize, Serialize};

use crate::id::EntityId;
use crate::routing::ticket_route;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub employee_id: Option<EntityId>,
    pub role_id: Option<u32>,
}

impl SessionContext {
    pub fn new(employee_id: Option<EntityId>, role_id: Option<u32>) -> Self {
        Self {
            employee_id,
            role_id,
        }
    }

    /// An employee id handed over by the navigating page wins over the session.
    pub fn resolve_employee_id(&self, handed_over: Option<&EntityId>) -> Option<EntityId> {
        handed_over.cloned().or_else(|| self.employee_id.clone())
    }

    pub fn ticket_route(&self, ticket_id: &EntityId) -> String {
        ticket_route(self.role_id, ticket_id)
    }
}
