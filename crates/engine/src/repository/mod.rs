//! Persistence seams.
//!
//! Services only talk to storage through [`EntryRepository`] and
//! [`UserRepository`]. The sea-orm implementations live here too; tests can
//! plug in their own doubles.

use async_trait::async_trait;

use crate::{Entry, EntryFilter, ResultEngine, User};

mod entries;
mod users;

pub use entries::SeaOrmEntryRepository;
pub use users::SeaOrmUserRepository;

/// Run a block inside a DB transaction, committing on success and rolling back on error.
macro_rules! with_tx {
    ($self:expr, |$tx:ident| $body:expr) => {{
        let $tx = $self.database.begin().await?;
        let result = $body;
        match result {
            Ok(value) => {
                $tx.commit().await?;
                Ok(value)
            }
            Err(err) => Err(err),
        }
    }};
}

pub(crate) use with_tx;

#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Insert the entry when it has no `id`, otherwise overwrite the stored row.
    async fn save(&self, entry: &Entry) -> ResultEngine<Entry>;

    async fn delete(&self, id: i64) -> ResultEngine<()>;

    async fn find_by_id(&self, id: i64) -> ResultEngine<Option<Entry>>;

    /// All entries matching `filter`, ordered by id.
    async fn find_all(&self, filter: &EntryFilter) -> ResultEngine<Vec<Entry>>;
}

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn save(&self, user: &User) -> ResultEngine<User>;

    async fn exists_by_email(&self, email: &str) -> ResultEngine<bool>;

    async fn find_by_email(&self, email: &str) -> ResultEngine<Option<User>>;

    async fn find_by_id(&self, id: i64) -> ResultEngine<Option<User>>;
}
