//! Ledger Summary Route

use axum::{extract::State, Json};

use crate::dto::SummaryResponse;
use crate::AppState;

/// GET /summary - Event-log replay, checked against live state
pub async fn get_summary(State(state): State<AppState>) -> Json<SummaryResponse> {
    let chain = state.chain().await;
    let replayed = chain.replay();
    let consistent = replayed == chain.summary();
    if !consistent {
        tracing::error!(height = chain.height(), "Event log replay diverges from live state");
    }
    Json(SummaryResponse::new(chain.height(), replayed, consistent))
}
