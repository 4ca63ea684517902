//! Entry API endpoints

use api_types::entry::{self as api, EntryPayload, EntryQuery, EntryView, StatusUpdate};
use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use engine::{EngineError, Entry, EntryFilter, EntryKind, EntryStatus};

use crate::{ServerError, server::ServerState};

const USER_NOT_FOUND_FOR_ID: &str = "user not found for given id";

fn map_kind(kind: api::EntryKind) -> EntryKind {
    match kind {
        api::EntryKind::Income => EntryKind::Income,
        api::EntryKind::Expense => EntryKind::Expense,
    }
}

fn map_kind_back(kind: EntryKind) -> api::EntryKind {
    match kind {
        EntryKind::Income => api::EntryKind::Income,
        EntryKind::Expense => api::EntryKind::Expense,
    }
}

fn map_status(status: api::EntryStatus) -> EntryStatus {
    match status {
        api::EntryStatus::Pending => EntryStatus::Pending,
        api::EntryStatus::Confirmed => EntryStatus::Confirmed,
        api::EntryStatus::Cancelled => EntryStatus::Cancelled,
    }
}

fn map_status_back(status: EntryStatus) -> api::EntryStatus {
    match status {
        EntryStatus::Pending => api::EntryStatus::Pending,
        EntryStatus::Confirmed => api::EntryStatus::Confirmed,
        EntryStatus::Cancelled => api::EntryStatus::Cancelled,
    }
}

/// Render a stored entry. Stored entries are complete, so a missing field
/// means the storage layer handed back something it should not have.
fn entry_view(entry: Entry) -> Result<EntryView, ServerError> {
    let incomplete = || EngineError::InvalidData(format!("incomplete stored entry {:?}", entry.id));

    Ok(EntryView {
        id: entry.id.ok_or_else(incomplete)?,
        descricao: entry.description.clone().ok_or_else(incomplete)?,
        mes: entry.month.ok_or_else(incomplete)?,
        ano: entry.year.ok_or_else(incomplete)?,
        usuario: entry.user_id.ok_or_else(incomplete)?,
        valor: entry.value.ok_or_else(incomplete)?,
        tipo: entry.kind.map(map_kind_back).ok_or_else(incomplete)?,
        status: entry.status.map(map_status_back).ok_or_else(incomplete)?,
        data_cadastro: entry.registered_on.ok_or_else(incomplete)?,
    })
}

/// Fail with a bad request unless `user_id` names a registered user.
async fn require_user(state: &ServerState, user_id: i64) -> Result<(), ServerError> {
    if state.engine.users().find_by_id(user_id).await?.is_none() {
        return Err(ServerError::Generic(USER_NOT_FOUND_FOR_ID.to_string()));
    }
    Ok(())
}

/// Build a valid `Entry` from a request body owned by a registered user.
///
/// Validation runs first, so a broken body reports its first invalid field
/// whatever user it names.
async fn entry_from_payload(
    state: &ServerState,
    payload: EntryPayload,
) -> Result<Entry, ServerError> {
    let entry = Entry {
        description: payload.descricao,
        month: payload.mes,
        year: payload.ano,
        user_id: payload.usuario,
        value: payload.valor,
        kind: payload.tipo.map(map_kind),
        status: payload.status.map(map_status),
        ..Default::default()
    };
    state.engine.entries().validate(&entry)?;

    if let Some(user_id) = entry.user_id {
        require_user(state, user_id).await?;
    }
    Ok(entry)
}

async fn stored_entry(state: &ServerState, id: i64) -> Result<Entry, ServerError> {
    state
        .engine
        .entries()
        .find_by_id(id)
        .await?
        .ok_or_else(|| EngineError::KeyNotFound(format!("entry {id}")).into())
}

/// Handle requests for creating a new `Entry`
pub async fn entry_new(
    State(state): State<ServerState>,
    Json(payload): Json<EntryPayload>,
) -> Result<(StatusCode, Json<EntryView>), ServerError> {
    let entry = entry_from_payload(&state, payload).await?;
    let saved = state.engine.entries().save(entry).await?;

    Ok((StatusCode::CREATED, Json(entry_view(saved)?)))
}

/// Handle requests for overwriting a stored `Entry`
///
/// The registration date is kept, and so is the status when the body omits it.
pub async fn update(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<EntryPayload>,
) -> Result<Json<EntryView>, ServerError> {
    let stored = stored_entry(&state, id).await?;
    let mut entry = entry_from_payload(&state, payload).await?;
    entry.id = Some(id);
    entry.status = entry.status.or(stored.status);
    entry.registered_on = stored.registered_on;

    let updated = state.engine.entries().update(entry).await?;

    Ok(Json(entry_view(updated)?))
}

/// Handle requests for changing the status of a stored `Entry`
pub async fn update_status(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
    Json(payload): Json<StatusUpdate>,
) -> Result<Json<EntryView>, ServerError> {
    let stored = stored_entry(&state, id).await?;
    let updated = state
        .engine
        .entries()
        .update_status(stored, map_status(payload.status))
        .await?;

    Ok(Json(entry_view(updated)?))
}

/// Handle requests for removing a stored `Entry`
pub async fn delete(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ServerError> {
    let stored = stored_entry(&state, id).await?;
    state.engine.entries().delete(&stored).await?;

    Ok(StatusCode::NO_CONTENT)
}

/// Handle requests for searching the entries of a user
pub async fn search(
    State(state): State<ServerState>,
    Query(query): Query<EntryQuery>,
) -> Result<Json<Vec<EntryView>>, ServerError> {
    let Some(user_id) = query.usuario else {
        return Err(ServerError::Generic(USER_NOT_FOUND_FOR_ID.to_string()));
    };
    require_user(&state, user_id).await?;

    let filter = EntryFilter {
        user_id: Some(user_id),
        description: query.descricao,
        month: query.mes,
        year: query.ano,
        kind: query.tipo.map(map_kind),
        status: query.status.map(map_status),
        ..Default::default()
    };

    let entries = state
        .engine
        .entries()
        .search(filter)
        .await?
        .into_iter()
        .map(entry_view)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Json(entries))
}
