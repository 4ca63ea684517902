//! Migration runner for the `minhas_financas` database.

use clap::{Parser, Subcommand};
use sea_orm::Database;
use sea_orm_migration::prelude::*;

use migration::Migrator;

#[derive(Parser, Debug)]
#[command(name = "minhas_financas_migrate")]
#[command(about = "Apply or roll back the Minhas Finanças schema")]
struct Cli {
    /// Database connection string (also read from `DATABASE_URL`).
    #[arg(
        long,
        env = "DATABASE_URL",
        default_value = "sqlite:./minhas_financas.db?mode=rwc"
    )]
    database_url: String,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
enum Command {
    /// Apply pending migrations, all of them unless `--steps` is given.
    Up {
        #[arg(long)]
        steps: Option<u32>,
    },
    /// Roll back applied migrations.
    Down {
        #[arg(long, default_value_t = 1)]
        steps: u32,
    },
    /// Roll back everything, then apply everything.
    Refresh,
    /// Drop every table, then apply everything.
    Fresh,
    /// Print which migrations are applied.
    Status,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let cli = Cli::parse();
    let db = Database::connect(&cli.database_url).await?;

    match cli.command.unwrap_or(Command::Up { steps: None }) {
        Command::Up { steps } => Migrator::up(&db, steps).await?,
        Command::Down { steps } => Migrator::down(&db, Some(steps)).await?,
        Command::Refresh => Migrator::refresh(&db).await?,
        Command::Fresh => Migrator::fresh(&db).await?,
        Command::Status => Migrator::status(&db).await?,
    }

    Ok(())
}
