//! Create `events` table with FKs to `games` and the owning enterprise user.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Events::Table)
                    .if_not_exists()
                    .col(uuid(Events::Id).primary_key())
                    .col(string_len(Events::Name, 254).not_null())
                    .col(text(Events::Images).not_null())
                    .col(integer(Events::VoucherNum).not_null())
                    .col(timestamp_with_time_zone(Events::StartTime).not_null())
                    .col(timestamp_with_time_zone(Events::EndTime).not_null())
                    .col(uuid(Events::GameId).not_null())
                    .col(uuid(Events::UserId).not_null())
                    .col(timestamp_with_time_zone(Events::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Events::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_game")
                            .from(Events::Table, Events::GameId)
                            .to(Games::Table, Games::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_event_user")
                            .from(Events::Table, Events::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Events::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Events { Table, Id, Name, Images, VoucherNum, StartTime, EndTime, GameId, UserId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Games { Table, Id }

#[derive(DeriveIden)]
enum Users { Table, Id }
