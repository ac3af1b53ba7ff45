use anyhow::Result;
use aqs_client::{BoardPage, BoqStore, HttpApi};
use aqs_utils::{init_logging, AppConfig};
use serde_json::json;
use tracing::info;

/// Fetch the configured session's pages once and print their view-models.
#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        eprintln!("Failed to load configuration, using defaults: {}", e);
        AppConfig::default()
    });

    init_logging(&config.logging)?;
    info!("Starting AQS snapshot against {}", config.api.base_url);

    let api = HttpApi::new(&config.api)?;

    let mut boq = BoqStore::new();
    boq.fetch_projects(&api).await;
    boq.fetch_approved_boq_list(&api, config.session.project_id().as_ref())
        .await;
    if let Some(boq_id) = config.session.boq_id() {
        boq.fetch_approved_boq_details(&api, Some(&boq_id)).await;
    }
    let state = boq.state();
    for notice in [&state.boq_list_notice, &state.boq_details_notice]
        .into_iter()
        .flatten()
    {
        info!("{}", notice);
    }

    let mut board = BoardPage::new(config.session.context());
    board.load(&api, None).await;
    if let Some(message) = board.view().message() {
        info!("Board: {}", message);
    }

    let snapshot = json!({
        "boq": boq.state(),
        "cards": boq.state().cards(),
        "board": board.view(),
    });
    println!("{}", serde_json::to_string_pretty(&snapshot)?);

    Ok(())
}
