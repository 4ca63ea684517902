use sea_orm::{Database, DatabaseConnection};

use engine::{Engine, User};
use migration::MigratorTrait;

pub async fn engine_with_db() -> (Engine, DatabaseConnection) {
    let db = Database::connect("sqlite::memory:").await.unwrap();
    migration::Migrator::up(&db, None).await.unwrap();
    let engine = Engine::builder()
        .database(db.clone())
        .build()
        .await
        .unwrap();
    (engine, db)
}

/// Register a user and return its id.
pub async fn register(engine: &Engine, email: &str) -> i64 {
    engine
        .users()
        .save_user(User::new("usuario", email, "senha"))
        .await
        .unwrap()
        .id
        .unwrap()
}
