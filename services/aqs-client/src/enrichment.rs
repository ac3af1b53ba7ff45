//! BOQ list enrichment.
//!
//! The list endpoint omits approvers and line items, so each listed BOQ is
//! completed from its details endpoint. All detail fetches run concurrently
//! and are joined before the list is returned; a failed fetch leaves only its
//! own entry un-enriched.

use aqs_models::BoqSummary;
use aqs_utils::first_boq;
use futures::future::join_all;

use crate::api::BoqApi;

pub async fn enrich_boq_list<A: BoqApi>(api: &A, list: Vec<BoqSummary>) -> Vec<BoqSummary> {
    let total = list.len();
    let enriched = join_all(list.into_iter().map(|summary| enrich_one(api, summary))).await;
    tracing::debug!(count = total, "Enriched approved BOQ list");
    enriched
}

async fn enrich_one<A: BoqApi>(api: &A, summary: BoqSummary) -> BoqSummary {
    let Some(boq_id) = summary.boq_id.clone() else {
        tracing::debug!("Skipping enrichment for BOQ without id");
        return summary;
    };

    match api.approved_boq_details(&boq_id).await {
        Ok(raw) => summary.with_details(first_boq(raw).unwrap_or_default()),
        Err(e) => {
            tracing::warn!(boq_id = %boq_id, error = %e, "Keeping un-enriched BOQ");
            summary
        }
    }
}
