use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // Statistics filter on role/status and bucket by creation day
        manager
            .create_index(
                Index::create()
                    .name("idx_users_role_status")
                    .table(Users::Table)
                    .col(Users::Role)
                    .col(Users::Status)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_users_created_at")
                    .table(Users::Table)
                    .col(Users::CreatedAt)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_events_user")
                    .table(Events::Table)
                    .col(Events::UserId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_vouchers_event")
                    .table(Vouchers::Table)
                    .col(Vouchers::EventId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_mysafe_feedback_user")
                    .table(MysafeFeedback::Table)
                    .col(MysafeFeedback::UserId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(Index::drop().name("idx_users_role_status").table(Users::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_users_created_at").table(Users::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_events_user").table(Events::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_vouchers_event").table(Vouchers::Table).to_owned())
            .await?;
        manager
            .drop_index(Index::drop().name("idx_mysafe_feedback_user").table(MysafeFeedback::Table).to_owned())
            .await
    }
}

#[derive(DeriveIden)]
enum Users { Table, Role, Status, CreatedAt }

#[derive(DeriveIden)]
enum Events { Table, UserId }

#[derive(DeriveIden)]
enum Vouchers { Table, EventId }

#[derive(DeriveIden)]
enum MysafeFeedback { Table, UserId }
