use std::sync::Arc;

use rust_decimal::Decimal;

use crate::{
    EngineError, Entry, EntryFilter, EntryStatus, ResultEngine, repository::EntryRepository,
    validation,
};

/// Business operations on entries.
#[derive(Clone)]
pub struct EntryService {
    repository: Arc<dyn EntryRepository>,
}

fn require_id(entry: &Entry, operation: &str) -> ResultEngine<i64> {
    entry.id.ok_or_else(|| {
        tracing::error!("{operation} called with an unsaved entry");
        EngineError::MissingId(format!("cannot {operation} an entry that was never saved"))
    })
}

impl EntryService {
    pub fn new(repository: Arc<dyn EntryRepository>) -> Self {
        Self { repository }
    }

    /// See [`validation::validate`].
    pub fn validate(&self, entry: &Entry) -> ResultEngine<()> {
        validation::validate(entry)
    }

    /// Validate and store a new entry.
    ///
    /// The stored entry is always `Pending`, whatever status the caller set.
    pub async fn save(&self, mut entry: Entry) -> ResultEngine<Entry> {
        self.validate(&entry)?;
        entry.status = Some(EntryStatus::Pending);

        let saved = self.repository.save(&entry).await?;
        tracing::debug!(id = ?saved.id, user_id = ?saved.user_id, "entry saved");
        Ok(saved)
    }

    /// Validate and overwrite a stored entry.
    ///
    /// Fails with [`EngineError::MissingId`] before touching storage when the
    /// entry has no id.
    pub async fn update(&self, entry: Entry) -> ResultEngine<Entry> {
        let id = require_id(&entry, "update")?;
        self.validate(&entry)?;

        let updated = self.repository.save(&entry).await?;
        tracing::debug!(id, "entry updated");
        Ok(updated)
    }

    /// Remove a stored entry.
    pub async fn delete(&self, entry: &Entry) -> ResultEngine<()> {
        let id = require_id(entry, "delete")?;

        self.repository.delete(id).await?;
        tracing::debug!(id, "entry deleted");
        Ok(())
    }

    /// Set the status of a stored entry, then update it.
    pub async fn update_status(&self, mut entry: Entry, status: EntryStatus) -> ResultEngine<Entry> {
        entry.status = Some(status);
        self.update(entry).await
    }

    /// Entries matching a filter, or an example entry whose populated fields
    /// act as the filter.
    pub async fn search(&self, filter: impl Into<EntryFilter>) -> ResultEngine<Vec<Entry>> {
        self.repository.find_all(&filter.into()).await
    }

    pub async fn find_by_id(&self, id: i64) -> ResultEngine<Option<Entry>> {
        self.repository.find_by_id(id).await
    }

    /// Confirmed income minus confirmed expenses of a user.
    ///
    /// Fails with [`EngineError::BalanceOverflow`] when the total does not
    /// fit in a `Decimal`.
    pub async fn balance_for_user(&self, user_id: i64) -> ResultEngine<Decimal> {
        let confirmed = EntryFilter::default()
            .user(user_id)
            .status(EntryStatus::Confirmed);

        self.repository
            .find_all(&confirmed)
            .await?
            .iter()
            .map(Entry::signed_value)
            .try_fold(Decimal::ZERO, |total, value| total.checked_add(value))
            .ok_or_else(|| {
                tracing::warn!(user_id, "balance overflowed");
                EngineError::BalanceOverflow(format!("user {user_id}"))
            })
    }
}
