//! Business core of Minhas Finanças.
//!
//! [`Engine`] wires the sea-orm repositories into the [`EntryService`] and
//! [`UserService`]. The services can also be built by hand around any
//! [`EntryRepository`] / [`UserRepository`].

use std::sync::Arc;

use sea_orm::DatabaseConnection;

pub use entry::{Entry, EntryKind, EntryStatus};
pub use error::EngineError;
pub use filter::EntryFilter;
pub use repository::{
    EntryRepository, SeaOrmEntryRepository, SeaOrmUserRepository, UserRepository,
};
pub use services::{EntryService, UserService};
pub use user::User;
pub use validation::validate;

mod entry;
mod error;
mod filter;
mod password;
mod repository;
mod services;
mod user;
mod validation;

type ResultEngine<T> = Result<T, EngineError>;

#[derive(Clone)]
pub struct Engine {
    entries: EntryService,
    users: UserService,
}

impl Engine {
    /// Return a builder for `Engine`. Help to build the struct.
    pub fn builder() -> EngineBuilder {
        EngineBuilder::default()
    }

    pub fn entries(&self) -> &EntryService {
        &self.entries
    }

    pub fn users(&self) -> &UserService {
        &self.users
    }
}

/// The builder for `Engine`
#[derive(Default)]
pub struct EngineBuilder {
    database: DatabaseConnection,
}

impl EngineBuilder {
    /// Pass the required database
    pub fn database(mut self, db: DatabaseConnection) -> EngineBuilder {
        self.database = db;
        self
    }

    /// Construct `Engine`
    pub async fn build(self) -> ResultEngine<Engine> {
        self.database.ping().await?;

        Ok(Engine {
            entries: EntryService::new(Arc::new(SeaOrmEntryRepository::new(
                self.database.clone(),
            ))),
            users: UserService::new(Arc::new(SeaOrmUserRepository::new(self.database))),
        })
    }
}
