//! Create `vouchers` table with FK to `events`.
use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Vouchers::Table)
                    .if_not_exists()
                    .col(uuid(Vouchers::Id).primary_key())
                    .col(string_len(Vouchers::Code, 64).not_null())
                    .col(text(Vouchers::Qrcode).not_null())
                    .col(text(Vouchers::Images).not_null())
                    .col(integer(Vouchers::Value).not_null())
                    .col(text(Vouchers::Description).not_null())
                    .col(timestamp_with_time_zone(Vouchers::ExpiredTime).not_null())
                    .col(string_len(Vouchers::Status, 20).not_null())
                    .col(uuid(Vouchers::EventId).not_null())
                    .col(timestamp_with_time_zone(Vouchers::CreatedAt).not_null())
                    .col(timestamp_with_time_zone(Vouchers::UpdatedAt).not_null())
                    .foreign_key(
                        ForeignKey::create()
                            .name("fk_voucher_event")
                            .from(Vouchers::Table, Vouchers::EventId)
                            .to(Events::Table, Events::Id)
                            .on_delete(ForeignKeyAction::Cascade)
                            .on_update(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager.drop_table(Table::drop().table(Vouchers::Table).to_owned()).await
    }
}

#[derive(DeriveIden)]
enum Vouchers { Table, Id, Code, Qrcode, Images, Value, Description, ExpiredTime, Status, EventId, CreatedAt, UpdatedAt }

#[derive(DeriveIden)]
enum Events { Table, Id }
