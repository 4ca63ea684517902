use axum::{Json, http::StatusCode, response::IntoResponse};
use engine::EngineError;

use serde::Serialize;
pub use server::{ServerState, router, run_with_listener, spawn_with_listener};

mod entries;
mod server;
mod users;

pub mod types {
    pub mod user {
        pub use api_types::user::{Balance, Credentials, UserNew, UserView};
    }

    pub mod entry {
        pub use api_types::entry::{
            EntryKind, EntryPayload, EntryQuery, EntryStatus, EntryView, StatusUpdate,
        };
    }
}

pub enum ServerError {
    Engine(EngineError),
    Generic(String),
}

#[derive(Serialize)]
struct Error {
    error: String,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::BusinessRule(_) | EngineError::Authentication(_) => StatusCode::BAD_REQUEST,
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::BalanceOverflow(_) => StatusCode::UNPROCESSABLE_ENTITY,
        EngineError::MissingId(_)
        | EngineError::InvalidData(_)
        | EngineError::PasswordHash(_)
        | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        EngineError::MissingId(msg)
        | EngineError::InvalidData(msg)
        | EngineError::PasswordHash(msg) => {
            tracing::error!("internal error: {msg}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, error) = match self {
            ServerError::Engine(err) => (status_for_engine_error(&err), message_for_engine_error(err)),
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
        };

        (status, Json(Error { error })).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn engine_business_rule_maps_to_400() {
        let res =
            ServerError::from(EngineError::BusinessRule("invalid month".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_authentication_maps_to_400() {
        let res = ServerError::from(EngineError::Authentication("invalid password".to_string()))
            .into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }

    #[test]
    fn engine_not_found_maps_to_404() {
        let res = ServerError::from(EngineError::KeyNotFound("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn engine_balance_overflow_maps_to_422() {
        let res = ServerError::from(EngineError::BalanceOverflow("user 1".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn engine_missing_id_maps_to_500() {
        let res = ServerError::from(EngineError::MissingId("x".to_string())).into_response();
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn internal_messages_are_hidden() {
        assert_eq!(
            message_for_engine_error(EngineError::PasswordHash("salt".to_string())),
            "internal server error"
        );
        assert_eq!(
            message_for_engine_error(EngineError::BusinessRule("invalid year".to_string())),
            "invalid year"
        );
    }

    #[test]
    fn generic_maps_to_400() {
        let res = ServerError::Generic("bad".to_string()).into_response();
        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    }
}
