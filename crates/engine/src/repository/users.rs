use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, QueryFilter, SqlErr,
    TransactionTrait,
};

use crate::{EngineError, ResultEngine, User, services::EMAIL_ALREADY_REGISTERED, user};

use super::{UserRepository, with_tx};

/// [`UserRepository`] backed by the `users` table.
#[derive(Clone, Debug)]
pub struct SeaOrmUserRepository {
    database: DatabaseConnection,
}

impl SeaOrmUserRepository {
    pub fn new(database: DatabaseConnection) -> Self {
        Self { database }
    }
}

/// Map a unique-index violation on `email` to the business error the
/// service would have raised had it seen the duplicate first.
fn map_write_error(err: DbErr) -> EngineError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(_)) => {
            EngineError::BusinessRule(EMAIL_ALREADY_REGISTERED.to_string())
        }
        _ => EngineError::Database(err),
    }
}

#[async_trait]
impl UserRepository for SeaOrmUserRepository {
    async fn save(&self, user: &User) -> ResultEngine<User> {
        let model = user::ActiveModel::from(user);
        with_tx!(self, |db_tx| {
            let saved = match user.id {
                None => model.insert(&db_tx).await,
                Some(_) => model.update(&db_tx).await,
            };
            let saved = match saved {
                Ok(saved) => saved,
                Err(DbErr::RecordNotUpdated) => {
                    return Err(EngineError::KeyNotFound(format!(
                        "user {}",
                        user.id.unwrap_or_default()
                    )));
                }
                Err(err) => return Err(map_write_error(err)),
            };
            Ok(User::from(saved))
        })
    }

    async fn exists_by_email(&self, email: &str) -> ResultEngine<bool> {
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.database)
            .await?
            .is_some())
    }

    async fn find_by_email(&self, email: &str) -> ResultEngine<Option<User>> {
        Ok(user::Entity::find()
            .filter(user::Column::Email.eq(email))
            .one(&self.database)
            .await?
            .map(User::from))
    }

    async fn find_by_id(&self, id: i64) -> ResultEngine<Option<User>> {
        Ok(user::Entity::find_by_id(id)
            .one(&self.database)
            .await?
            .map(User::from))
    }
}
