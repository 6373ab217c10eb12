//! Create `games` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Games::Table)
                    .if_not_exists()
                    .col(uuid(Games::Id).primary_key())
                    .col(string_len(Games::Name, 254).not_null())
                    .col(text(Games::Images).not_null())
                    .col(string_len(Games::Type, 20).not_null())
                    .col(boolean(Games::ExchangeAllow).not_null())
                    .col(text(Games::Tutorial).not_null())
                    .col(timestamp_with_time_zone(Games::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Games::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Games::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Games { Table, Id, Name, Images, Type, ExchangeAllow, Tutorial, CreatedAt, UpdatedAt }
