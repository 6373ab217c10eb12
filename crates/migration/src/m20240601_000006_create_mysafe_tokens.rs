//! Create `mysafe_tokens` table.
//!
//! One platform access token per gateway user, overwritten on every login.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MysafeTokens::Table)
                    .if_not_exists()
                    .col(string_len(MysafeTokens::UserId, 128).primary_key())
                    .col(text(MysafeTokens::AccessToken).not_null())
                    .col(timestamp_with_time_zone(MysafeTokens::UpdatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MysafeTokens::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum MysafeTokens { Table, UserId, AccessToken, UpdatedAt }
