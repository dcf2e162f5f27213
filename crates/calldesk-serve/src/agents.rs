use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;

use calldesk_core::{Agent, NewAgent};

use crate::{ApiError, Envelope, SharedState};

pub(crate) async fn list(
    State(state): State<SharedState>,
) -> Result<Json<Envelope<Vec<Agent>>>, ApiError> {
    let agents = state.store.list_agents()?;
    Ok(Envelope::list(agents))
}

pub(crate) async fn get_one(
    State(state): State<SharedState>,
    Path(id): Path<String>,
) -> Result<Json<Envelope<Agent>>, ApiError> {
    let agent = state
        .store
        .get_agent(&id)?
        .ok_or(ApiError::NotFound("Agent not found"))?;
    Ok(Envelope::data(agent))
}

pub(crate) async fn create(
    State(state): State<SharedState>,
    body: Result<Json<NewAgent>, JsonRejection>,
) -> Result<(StatusCode, Json<Envelope<Agent>>), ApiError> {
    let Json(payload) = body?;
    let agent = payload
        .into_agent(calldesk_core::new_id())
        .ok_or_else(|| ApiError::BadRequest("Name and email are required".into()))?;
    let saved = state.store.save_agent(agent)?;
    tracing::info!(id = %saved.id, "agent created");
    Ok((
        StatusCode::CREATED,
        Envelope::with_message("Agent created successfully", saved),
    ))
}
