//! Create `enterprises` table.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Enterprises::Table)
                    .if_not_exists()
                    .col(uuid(Enterprises::Id).primary_key())
                    .col(string_len(Enterprises::Name, 254).not_null())
                    .col(string_len(Enterprises::Field, 254).not_null())
                    .col(string_len(Enterprises::Location, 254).not_null())
                    .col(string_len(Enterprises::Gps, 64).not_null())
                    .col(string_len(Enterprises::Status, 20).not_null())
                    .col(timestamp_with_time_zone(Enterprises::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Enterprises::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Enterprises::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Enterprises { Table, Id, Name, Field, Location, Gps, Status, CreatedAt, UpdatedAt }
