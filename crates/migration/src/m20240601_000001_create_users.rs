//! Create `users` table.
//!
//! Holds admins, enterprises and end users; `role` and `status` are stored as short strings.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Users::Table)
                    .if_not_exists()
                    .col(uuid(Users::Id).primary_key())
                    .col(string_len(Users::Name, 254).not_null())
                    .col(string_len(Users::Username, 254).unique_key().not_null())
                    .col(string_len(Users::Password, 254).not_null())
                    .col(string_len(Users::Email, 254).not_null())
                    .col(string_len(Users::Phone, 20).not_null())
                    .col(string_len(Users::Role, 20).not_null())
                    .col(string_len(Users::Status, 20).not_null())
                    .col(timestamp_with_time_zone(Users::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Users::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Users::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Users { Table, Id, Name, Username, Password, Email, Phone, Role, Status, CreatedAt, UpdatedAt }
