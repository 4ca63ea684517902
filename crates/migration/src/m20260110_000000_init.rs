//! Initial schema.
//!
//! - `users`: registered users, unique by email
//! - `entries`: financial entries ("lançamentos") owned by a user

use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Users {
    Table,
    Id,
    Name,
    Email,
    Password,
}

#[derive(Iden)]
enum Entries {
    Table,
    Id,
    Description,
    Month,
    Year,
    UserId,
    Value,
    Kind,
    Status,
    RegisteredOn,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Users::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Users::Name).string().not_null())
                    .col(ColumnDef::new(Users::Email).string().not_null())
                    .col(ColumnDef::new(Users::Password).string().not_null())
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-users-email-unique")
                    .table(Users::Table)
                    .col(Users::Email)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_table(
                Table::create()
                    .table(Entries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Entries::Id)
                            .integer()
                            .not_null()
                            .auto_increment()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Entries::Description).string().not_null())
                    .col(ColumnDef::new(Entries::Month).integer().not_null())
                    .col(ColumnDef::new(Entries::Year).integer().not_null())
                    .col(ColumnDef::new(Entries::UserId).big_integer().not_null())
                    // Normalized decimal string, exact.
                    .col(ColumnDef::new(Entries::Value).string().not_null())
                    .col(ColumnDef::new(Entries::Kind).string().not_null())
                    .col(
                        ColumnDef::new(Entries::Status)
                            .string()
                            .not_null()
                            .default("pending"),
                    )
                    .col(ColumnDef::new(Entries::RegisteredOn).date().not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk-entries-user_id")
                            .from(Entries::Table, Entries::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx-entries-user_id-year-month")
                    .table(Entries::Table)
                    .col(Entries::UserId)
                    .col(Entries::Year)
                    .col(Entries::Month)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Entries::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Users::Table).to_owned())
            .await?;
        Ok(())
    }
}
