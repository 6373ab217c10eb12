//! Migrator registering entity-specific migrations in dependency order.
//! Indexes are applied last.
pub use sea_orm_migration::prelude::*;

mod m20240601_000001_create_users;
mod m20240601_000002_create_enterprises;
mod m20240601_000003_create_games;
mod m20240601_000004_create_events;
mod m20240601_000005_create_vouchers;
mod m20240601_000006_create_mysafe_tokens;
mod m20240601_000007_create_mysafe_feedback;
mod m20240601_000010_add_indexes;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20240601_000001_create_users::Migration),
            Box::new(m20240601_000002_create_enterprises::Migration),
            Box::new(m20240601_000003_create_games::Migration),
            Box::new(m20240601_000004_create_events::Migration),
            Box::new(m20240601_000005_create_vouchers::Migration),
            Box::new(m20240601_000006_create_mysafe_tokens::Migration),
            Box::new(m20240601_000007_create_mysafe_feedback::Migration),
            // Indexes should always be applied last
            Box::new(m20240601_000010_add_indexes::Migration),
        ]
    }
}
