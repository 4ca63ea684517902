use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, QueryOrder,
    TransactionTrait,
};

use crate::{Entry, EntryFilter, EngineError, ResultEngine, entry};

use super::{EntryRepository, with_tx};

/// [`EntryRepository`] backed by the `entries` table.
#[derive(Clone, Debug)]
pub struct SeaOrmEntryRepository {
    database: DatabaseConnection,
}

impl SeaOrmEntryRepository {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

fn not_found(id: i64) -> EngineError {
    EngineError::KeyNotFound(format!("entry {id}"))
}

#[async_trait]
impl EntryRepository for SeaOrmEntryRepository {
    async fn save(&self, entry: &Entry) -> ResultEngine<Entry> {
        let model = entry::ActiveModel::try_from(entry)?;
        with_tx!(self, |db_tx| {
            let saved = match entry.id {
                None => model.insert(&db_tx).await?,
                Some(id) => match model.update(&db_tx).await {
                    Ok(saved) => saved,
                    Err(DbErr::RecordNotUpdated) => return Err(not_found(id)),
                    Err(err) => return Err(err.into()),
                },
            };
            Entry::try_from(saved)
        })
    }

    async fn delete(&self, id: i64) -> ResultEngine<()> {
        with_tx!(self, |db_tx| {
            let result = entry::Entity::delete_by_id(id).exec(&db_tx).await?;
            if result.rows_affected == 0 {
                return Err(not_found(id));
            }
            Ok(())
        })
    }

    async fn find_by_id(&self, id: i64) -> ResultEngine<Option<Entry>> {
        entry::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(Entry::try_from)
            .transpose()
    }

    async fn find_all(&self, filter: &EntryFilter) -> ResultEngine<Vec<Entry>> {
        entry::Entity::find()
            .filter(filter.condition())
            .order_by_asc(entry::Column::Id)
            .all(&self.database)
            .await?
            .into_iter()
            .map(Entry::try_from)
            .collect()
    }
}
