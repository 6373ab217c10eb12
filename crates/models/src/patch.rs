//! Partial updates.
//!
//! A [`Patch`] collects `column = value` pairs for the fields a caller actually
//! supplied and issues a single parameterized `UPDATE`. Every patched row also
//! gets `updated_at` stamped with the current time.

use std::str::FromStr;

use chrono::Utc;
use sea_orm::sea_query::{Condition, Expr, Value};
use sea_orm::{ConnectionTrait, EntityTrait, QueryFilter, UpdateMany};

use crate::errors::ModelError;

pub const EMPTY_PATCH: &str = "no fields to update";
const UPDATED_AT: &str = "updated_at";

pub struct Patch<E: EntityTrait> {
    update: UpdateMany<E>,
    fields: usize,
}

impl<E> Default for Patch<E>
where
    E: EntityTrait,
    E::Column: FromStr,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<E> Patch<E>
where
    E: EntityTrait,
    E::Column: FromStr,
{
    pub fn new() -> Self {
        Self { update: E::update_many(), fields: 0 }
    }

    /// Bind `col` only when a value was supplied.
    pub fn set<V>(mut self, col: E::Column, value: Option<V>) -> Self
    where
        V: Into<Value>,
    {
        if let Some(v) = value {
            self.update = self.update.col_expr(col, Expr::value(v.into()));
            self.fields += 1;
        }
        self
    }

    pub fn is_empty(&self) -> bool {
        self.fields == 0
    }

    pub fn len(&self) -> usize {
        self.fields
    }

    /// Run the update against rows matching `filter`; returns rows affected.
    pub async fn exec<C>(self, db: &C, filter: Condition) -> Result<u64, ModelError>
    where
        C: ConnectionTrait,
    {
        if self.is_empty() {
            return Err(ModelError::Validation(EMPTY_PATCH.into()));
        }
        let mut update = self.update;
        if let Ok(col) = E::Column::from_str(UPDATED_AT) {
            let now: sea_orm::prelude::DateTimeWithTimeZone = Utc::now().into();
            update = update.col_expr(col, Expr::value(now));
        }
        let res = update.filter(filter).exec(db).await?;
        Ok(res.rows_affected)
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{
        ActiveModelTrait, ColumnTrait, ConnectionTrait, Database, DatabaseConnection, DbBackend,
        EntityTrait, Schema, Set,
    };
    use uuid::Uuid;

    use super::*;
    use crate::game;

    async fn games_db() -> DatabaseConnection {
        let db = Database::connect("sqlite::memory:").await.unwrap();
        let schema = Schema::new(DbBackend::Sqlite);
        let stmt = schema.create_table_from_entity(game::Entity);
        db.execute(db.get_database_backend().build(&stmt)).await.unwrap();
        db
    }

    async fn seed(db: &DatabaseConnection) -> game::Model {
        let now = Utc::now().into();
        game::ActiveModel {
            id: Set(Uuid::new_v4()),
            name: Set("Shake".into()),
            images: Set("shake.png".into()),
            game_type: Set("shake".into()),
            exchange_allow: Set(true),
            tutorial: Set("shake the phone".into()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(db)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn unset_fields_are_left_alone() {
        let db = games_db().await;
        let g = seed(&db).await;

        let patch = Patch::<game::Entity>::new()
            .set(game::Column::Name, Some("Quiz".to_string()))
            .set(game::Column::Images, None::<String>)
            .set(game::Column::ExchangeAllow, Some(false));
        assert_eq!(patch.len(), 2);

        let rows = patch
            .exec(&db, Condition::all().add(game::Column::Id.eq(g.id)))
            .await
            .unwrap();
        assert_eq!(rows, 1);

        let after = game::Entity::find_by_id(g.id).one(&db).await.unwrap().unwrap();
        assert_eq!(after.name, "Quiz");
        assert!(!after.exchange_allow);
        assert_eq!(after.images, g.images);
        assert_eq!(after.tutorial, g.tutorial);
        assert!(after.updated_at >= g.updated_at);
    }

    #[tokio::test]
    async fn empty_patch_is_rejected_before_touching_db() {
        let db = games_db().await;
        let err = Patch::<game::Entity>::new()
            .set(game::Column::Name, None::<String>)
            .exec(&db, Condition::all())
            .await
            .unwrap_err();
        assert!(matches!(err, ModelError::Validation(ref m) if m == EMPTY_PATCH));
    }

    #[tokio::test]
    async fn no_match_reports_zero_rows() {
        let db = games_db().await;
        let rows = Patch::<game::Entity>::new()
            .set(game::Column::Name, Some("ghost".to_string()))
            .exec(&db, Condition::all().add(game::Column::Id.eq(Uuid::new_v4())))
            .await
            .unwrap();
        assert_eq!(rows, 0);
    }
}
