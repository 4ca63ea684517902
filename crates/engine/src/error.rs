//! The module contains the error the engine can throw.
//!
//! The errors users are expected to see are:
//!
//! - [`BusinessRule`] thrown when an entry or user breaks a validation rule.
//! - [`Authentication`] thrown when credentials do not match a user.
//!
//! [`MissingId`] is a precondition violation (an unsaved entry passed where a
//! persisted one is required) and signals a bug in the caller.
//!
//!  [`BusinessRule`]: EngineError::BusinessRule
//!  [`Authentication`]: EngineError::Authentication
//!  [`MissingId`]: EngineError::MissingId
use sea_orm::DbErr;
use thiserror::Error;

/// Engine custom errors.
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("{0}")]
    BusinessRule(String),
    #[error("{0}")]
    Authentication(String),
    #[error("missing identifier: {0}")]
    MissingId(String),
    #[error("\"{0}\" key not found!")]
    KeyNotFound(String),
    #[error("Invalid stored data: {0}")]
    InvalidData(String),
    #[error("Password hashing failed: {0}")]
    PasswordHash(String),
    #[error("balance out of range: {0}")]
    BalanceOverflow(String),
    #[error(transparent)]
    Database(#[from] DbErr),
}

impl PartialEq for EngineError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::BusinessRule(a), Self::BusinessRule(b)) => a == b,
            (Self::Authentication(a), Self::Authentication(b)) => a == b,
            (Self::MissingId(a), Self::MissingId(b)) => a == b,
            (Self::KeyNotFound(a), Self::KeyNotFound(b)) => a == b,
            (Self::InvalidData(a), Self::InvalidData(b)) => a == b,
            (Self::PasswordHash(a), Self::PasswordHash(b)) => a == b,
            (Self::BalanceOverflow(a), Self::BalanceOverflow(b)) => a == b,
            (Self::Database(a), Self::Database(b)) => a.to_string() == b.to_string(),
            _ => false,
        }
    }
}

impl EngineError {
    pub(crate) fn business(message: &str) -> Self {
        Self::BusinessRule(message.to_string())
    }
}
