//! Role-based ticket routes.

use crate::id::EntityId;

/// Route template prefix for a role id. Unknown and missing roles get the
/// generic ticket page.
pub fn ticket_route_prefix(role_id: Option<u32>) -> &'static str {
    match role_id {
        Some(1) | Some(13) => "/ceo/ticket",
        Some(2) | Some(5) | Some(6) | Some(9) | Some(10) => "/admin/engineerticketdetails",
        Some(3) | Some(4) => "/aqs/aqsticketdetails",
        Some(7) | Some(8) => "/pm/pmticket",
        Some(12) => "/finance/financeticketdetails",
        Some(15) => "/hr/hrticketdetails",
        Some(16) | Some(17) => "/purchasemanager/hrticketdetails",
        _ => "/ticket",
    }
}

pub fn ticket_route(role_id: Option<u32>, ticket_id: &EntityId) -> String {
    format!("{}/{}", ticket_route_prefix(role_id), ticket_id)
}
