//! Create `mysafe_feedback` table.
//!
//! Feedback documents; the image list is kept as a JSON array.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(MysafeFeedback::Table)
                    .if_not_exists()
                    .col(uuid(MysafeFeedback::Id).primary_key())
                    .col(string_len(MysafeFeedback::UserId, 128).not_null())
                    .col(integer(MysafeFeedback::Rating).not_null())
                    .col(string_len(MysafeFeedback::Subject, 254).not_null())
                    .col(text(MysafeFeedback::FeedbackContent).not_null())
                    .col(json_binary(MysafeFeedback::Images).not_null())
                    .col(timestamp_with_time_zone(MysafeFeedback::CreatedAt).not_null())
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(MysafeFeedback::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum MysafeFeedback { Table, Id, UserId, Rating, Subject, FeedbackContent, Images, CreatedAt }
