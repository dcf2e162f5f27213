use axum::extract::{Path, State};
use axum::Json;

use calldesk_core::SummaryRecord;
use calldesk_store::sort_newest_first;

use crate::{ApiError, Envelope, SharedState};

// ── GET /api/summaries ──

pub(crate) async fn list(
    State(state): State<SharedState>,
) -> Result<Json<Envelope<Vec<SummaryRecord>>>, ApiError> {
    let mut summaries = state.store.list_summaries()?;
    sort_newest_first(&mut summaries);
    Ok(Envelope::list(summaries))
}

// ── GET /api/summaries/{call_id} ──

pub(crate) async fn get_one(
    State(state): State<SharedState>,
    Path(call_id): Path<String>,
) -> Result<Json<Envelope<SummaryRecord>>, ApiError> {
    let summary = state
        .store
        .get_summary(&call_id)?
        .ok_or(ApiError::NotFound("Summary not found"))?;
    Ok(Envelope::data(summary))
}

// ── POST /api/summaries/{call_id}/regenerate ──

/// Re-run the full analysis (summary and insights) synchronously and
/// overwrite the stored summary.
pub(crate) async fn regenerate(
    State(state): State<SharedState>,
    Path(call_id): Path<String>,
) -> Result<Json<Envelope<SummaryRecord>>, ApiError> {
    let transcript = state
        .store
        .get_transcript(&call_id)?
        .ok_or(ApiError::NotFound("Transcript not found"))?;

    let summary = calldesk_insight::analyze(&transcript);
    let record = SummaryRecord::new(&call_id, summary, calldesk_core::now_rfc3339());
    let saved = state.store.save_summary(&call_id, record)?;
    tracing::info!(call_id = %call_id, "summary regenerated");

    Ok(Envelope::with_message(
        "Summary regenerated successfully",
        saved,
    ))
}
