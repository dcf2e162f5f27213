use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use calldesk_core::{NewTranscript, SummaryRecord, Transcript};
use calldesk_store::{sort_newest_first, Store};

use crate::{ApiError, Envelope, SharedState};

const NOT_FOUND: &str = "Transcript not found";

// ── GET /api/transcripts ──

pub(crate) async fn list(
    State(state): State<SharedState>,
) -> Result<Json<Envelope<Vec<Transcript>>>, ApiError> {
    let mut transcripts = state.store.list_transcripts()?;
    sort_newest_first(&mut transcripts);
    Ok(Envelope::list(transcripts))
}

// ── GET /api/transcripts/{id} ──

pub(crate) async fn get_one(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Transcript>>, ApiError> {
    let transcript = state
        .store
        .get_transcript(&id)?
        .ok_or(ApiError::NotFound(NOT_FOUND))?;
    Ok(Envelope::data(transcript))
}

// ── POST /api/transcripts ──

pub(crate) async fn create(
    State(state): State<SharedState>,
    body: Result<Json<NewTranscript>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Transcript>>), ApiError> {
    let Json(payload) = body?;
    if !payload.has_messages() {
        return Err(ApiError::BadRequest("Messages array is required".into()));
    }

    let now = calldesk_core::now_rfc3339();
    let transcript = payload.into_transcript(calldesk_core::new_id(), &now);
    let saved = state.store.save_transcript(transcript)?;
    tracing::info!(
        id = %saved.id,
        messages = saved.message_count,
        "transcript accepted"
    );

    spawn_summary(state.store.clone(), saved.clone());

    Ok((
        StatusCode::CREATED,
        Envelope::with_message("Transcript saved successfully", saved),
    ))
}

/// Generate and store the initial summary off the request path. The caller
/// never waits on it; failures are logged and leave the transcript in place.
fn spawn_summary(store: Store, transcript: Transcript) {
    tokio::task::spawn_blocking(move || {
        let summary = calldesk_insight::generate_summary(&transcript);
        let record = SummaryRecord::new(&transcript.id, summary, calldesk_core::now_rfc3339());
        match store.save_summary(&transcript.id, record) {
            Ok(_) => tracing::debug!(id = %transcript.id, "summary generated"),
            Err(e) => {
                tracing::error!(id = %transcript.id, error = %e, "summary generation failed")
            }
        }
    });
}

// ── DELETE /api/transcripts/{id} ──

pub(crate) async fn delete(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<()>>, ApiError> {
    if !state.store.delete_transcript(&id)? {
        return Err(ApiError::NotFound(NOT_FOUND));
    }
    tracing::info!(id = %id, "transcript deleted");
    Ok(Envelope::message("Transcript deleted successfully"))
}
