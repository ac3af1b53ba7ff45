//! Bill-of-Quantities view-models.
//!
//! These types deserialize straight from the approved-BOQ endpoints using the
//! [`lenient`](crate::payload::lenient) field readers, and serialize in the
//! camelCase layout the dashboard consumes. Line items are read from
//! `boqItems` or `items` and their ids from `boqItemsId` or `id`; they are
//! always written as `items` and `id`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::id::EntityId;
use crate::payload::lenient;

/// One approved BOQ as shown on the dashboard and the detail page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawBoqSummary")]
pub struct BoqSummary {
    pub boq_id: Option<EntityId>,
    pub boq_name: Option<String>,
    pub boq_code: Option<String>,
    pub description: Option<String>,
    pub vendor_name: Option<String>,
    pub project_name: Option<String>,
    pub approved_at: Option<DateTime<Utc>>,
    pub items: Vec<BoqLineItem>,
    pub approvers: Vec<Approver>,
}

/// A priced line of a BOQ. `total` is whatever the backend computed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawBoqLineItem")]
pub struct BoqLineItem {
    pub id: Option<EntityId>,
    pub item_name: Option<String>,
    pub unit: Option<String>,
    pub price: Option<f64>,
    pub quantity: Option<f64>,
    pub total: Option<f64>,
}

// Wire layouts. Both spellings of a key are separate fields so a record
// carrying both still decodes; the `boq*` spelling wins.

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBoqSummary {
    #[serde(default, deserialize_with = "lenient::entity_id")]
    boq_id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient::text")]
    boq_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    boq_code: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    description: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    vendor_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    project_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::timestamp")]
    approved_at: Option<DateTime<Utc>>,
    #[serde(default, deserialize_with = "lenient::records")]
    boq_items: Vec<BoqLineItem>,
    #[serde(default, deserialize_with = "lenient::records")]
    items: Vec<BoqLineItem>,
    #[serde(default, deserialize_with = "lenient::records")]
    approvers: Vec<Approver>,
}

impl From<RawBoqSummary> for BoqSummary {
    fn from(raw: RawBoqSummary) -> Self {
        let items = if raw.boq_items.is_empty() {
            raw.items
        } else {
            raw.boq_items
        };

        Self {
            boq_id: raw.boq_id,
            boq_name: raw.boq_name,
            boq_code: raw.boq_code,
            description: raw.description,
            vendor_name: raw.vendor_name,
            project_name: raw.project_name,
            approved_at: raw.approved_at,
            items,
            approvers: raw.approvers,
        }
    }
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawBoqLineItem {
    #[serde(default, deserialize_with = "lenient::entity_id")]
    boq_items_id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient::entity_id")]
    id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient::text")]
    item_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    unit: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    quantity: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    total: Option<f64>,
}

impl From<RawBoqLineItem> for BoqLineItem {
    fn from(raw: RawBoqLineItem) -> Self {
        Self {
            id: raw.boq_items_id.or(raw.id),
            item_name: raw.item_name,
            unit: raw.unit,
            price: raw.price,
            quantity: raw.quantity,
            total: raw.total,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Approver {
    #[serde(default, deserialize_with = "lenient::text")]
    pub employee_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub role_name: Option<String>,
}

/// A project (site) the logged-in employee may pick BOQs for.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Project {
    #[serde(default, deserialize_with = "lenient::entity_id")]
    pub project_id: Option<EntityId>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub project_name: Option<String>,
}

impl BoqSummary {
    /// Shape one raw record. Non-objects give an empty summary.
    pub fn from_value(value: Value) -> Self {
        lenient::record(value)
    }

    /// `boqCode`, or `BOQ#<boqId>` when the code is blank.
    pub fn display_code(&self) -> String {
        match self.boq_code.as_deref() {
            Some(code) if !code.is_empty() => code.to_string(),
            _ => match &self.boq_id {
                Some(id) => format!("BOQ#{}", id),
                None => "BOQ#".to_string(),
            },
        }
    }

    pub fn display_name(&self) -> &str {
        match self.boq_name.as_deref() {
            Some(name) if !name.is_empty() => name,
            _ => "Untitled BOQ",
        }
    }

    /// Approver names joined with ", ", or "N/A" when there are none.
    pub fn approvers_text(&self) -> String {
        let names: Vec<&str> = self
            .approvers
            .iter()
            .filter_map(|a| a.employee_name.as_deref())
            .collect();

        if self.approvers.is_empty() {
            "N/A".to_string()
        } else {
            names.join(", ")
        }
    }

    /// Sum of the line totals for display. Missing totals count as zero.
    pub fn items_total(&self) -> f64 {
        self.items.iter().map(|item| item.total.unwrap_or(0.0)).sum()
    }

    /// Take approvers and items from a details record, keeping everything else.
    pub fn with_details(mut self, details: BoqSummary) -> Self {
        self.approvers = details.approvers;
        self.items = details.items;
        self
    }
}

impl Project {
    pub fn from_value(value: Value) -> Self {
        lenient::record(value)
    }
}
