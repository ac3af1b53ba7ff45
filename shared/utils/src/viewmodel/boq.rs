//! BOQ Normalizer
//!
//! Turns the approved-BOQ payloads (one object or a list of them) into an
//! ordered list of [`BoqSummary`] values.

use aqs_models::{BoqSummary, OneOrMany, Project};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

/// Normalize an approved-BOQ payload.
///
/// `null` gives an empty list, a single record becomes a one-element list, and
/// lists keep their order. Entries that are not objects become empty summaries.
pub fn normalize_boq(raw: Value) -> Vec<BoqSummary> {
    let Some(records) = OneOrMany::from_payload(raw) else {
        return Vec::new();
    };

    let summaries: Vec<BoqSummary> = records
        .into_vec()
        .into_iter()
        .map(BoqSummary::from_value)
        .collect();

    tracing::debug!(count = summaries.len(), "Normalized BOQ payload");
    summaries
}

/// The record a detail page shows: the first one the payload carries.
pub fn first_boq(raw: Value) -> Option<BoqSummary> {
    OneOrMany::from_payload(raw)
        .and_then(OneOrMany::into_first)
        .map(BoqSummary::from_value)
}

/// Normalize the projects payload with the same shape rules as BOQs.
pub fn normalize_projects(raw: Value) -> Vec<Project> {
    OneOrMany::from_payload(raw)
        .map(|records| records.into_vec().into_iter().map(Project::from_value).collect())
        .unwrap_or_default()
}

/// Display strings for one dashboard card.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BoqCard {
    pub code: String,
    pub title: String,
    pub approved_at: String,
    pub approved_by: String,
    pub project_name: String,
    pub vendor_name: String,
    /// `(item count, sum of line totals)`, only when the BOQ has items.
    pub items: Option<(usize, f64)>,
}

impl BoqCard {
    pub fn from_summary(summary: &BoqSummary) -> Self {
        Self {
            code: summary.display_code(),
            title: summary.display_name().to_string(),
            approved_at: summary
                .approved_at
                .map(format_approved_at)
                .unwrap_or_else(|| "N/A".to_string()),
            approved_by: summary.approvers_text(),
            project_name: summary.project_name.clone().unwrap_or_default(),
            vendor_name: non_empty_or_na(summary.vendor_name.as_deref()),
            items: (!summary.items.is_empty())
                .then(|| (summary.items.len(), summary.items_total())),
        }
    }
}

/// `dd/mm/yyyy • hh:mm am`
pub fn format_approved_at(at: DateTime<Utc>) -> String {
    at.format("%d/%m/%Y • %I:%M %P").to_string()
}

fn non_empty_or_na(value: Option<&str>) -> String {
    match value {
        Some(v) if !v.is_empty() => v.to_string(),
        _ => "N/A".to_string(),
    }
}
