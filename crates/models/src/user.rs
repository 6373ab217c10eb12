use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};

use crate::enums::{Status, UserRole};

/// Admins, enterprises and end users share one table; `role` tells them apart.
#[derive(Clone, Debug, PartialEq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub name: String,
    #[sea_orm(unique)]
    pub username: String,
    /// argon2 PHC string
    #[serde(skip_serializing, default)]
    pub password: String,
    pub email: String,
    pub phone: String,
    pub role: UserRole,
    pub status: Status,
    pub created_at: DateTimeWithTimeZone,
    pub updated_at: DateTimeWithTimeZone,
}

#[derive(Copy, Clone, Debug, EnumIter)]
pub enum Relation {
    Event,
}

impl RelationTrait for Relation {
    fn def(&self) -> RelationDef {
        match self {
            Relation::Event => Entity::has_many(super::event::Entity).into(),
        }
    }
}

impl Related<super::event::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Event.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
