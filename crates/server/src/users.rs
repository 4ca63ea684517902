//! User API endpoints

use api_types::user::{Balance, Credentials, UserNew, UserView};
use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use engine::{EngineError, User};

use crate::{ServerError, server::ServerState};

pub(crate) fn user_view(user: User) -> Result<UserView, ServerError> {
    let id = user
        .id
        .ok_or_else(|| EngineError::MissingId(format!("user {} has no id", user.email)))?;

    Ok(UserView {
        id,
        nome: user.name,
        email: user.email,
    })
}

/// Handle requests for authenticating a user by email and password
pub async fn authenticate(
    State(state): State<ServerState>,
    Json(payload): Json<Credentials>,
) -> Result<Json<UserView>, ServerError> {
    let user = state
        .engine
        .users()
        .authenticate(&payload.email, &payload.senha)
        .await?;

    Ok(Json(user_view(user)?))
}

/// Handle requests for registering a new `User`
pub async fn user_new(
    State(state): State<ServerState>,
    Json(payload): Json<UserNew>,
) -> Result<(StatusCode, Json<UserView>), ServerError> {
    let user = state
        .engine
        .users()
        .save_user(User::new(&payload.nome, &payload.email, &payload.senha))
        .await?;

    Ok((StatusCode::CREATED, Json(user_view(user)?)))
}

/// Handle requests for the balance of confirmed entries of a user
pub async fn balance(
    State(state): State<ServerState>,
    Path(id): Path<i64>,
) -> Result<Json<Balance>, ServerError> {
    if state.engine.users().find_by_id(id).await?.is_none() {
        return Err(EngineError::KeyNotFound(format!("user {id}")).into());
    }

    let saldo = state.engine.entries().balance_for_user(id).await?;

    Ok(Json(Balance { usuario: id, saldo }))
}
