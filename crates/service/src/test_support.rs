#![cfg(test)]
use chrono::{TimeZone, Utc};
use sea_orm::prelude::DateTimeWithTimeZone;
use sea_orm::{ConnectionTrait, Database, DatabaseConnection, DbBackend, Schema};
use uuid::Uuid;

use models::{enterprise, event, feedback, game, token, user, voucher, Status, UserRole};

use crate::admin::domain::{NewEvent, NewGame, NewUser, NewVoucher};
use crate::admin::repo::{SeaOrmEventRepository, SeaOrmGameRepository, SeaOrmUserRepository};
use crate::admin::repository::{EventRepository, GameRepository, UserRepository};

/// Fresh in-memory SQLite with every table created from the entities.
pub async fn memory_db() -> DatabaseConnection {
    let db = Database::connect("sqlite::memory:").await.expect("open sqlite");
    let schema = Schema::new(DbBackend::Sqlite);
    let stmts = vec![
        schema.create_table_from_entity(user::Entity),
        schema.create_table_from_entity(game::Entity),
        schema.create_table_from_entity(enterprise::Entity),
        schema.create_table_from_entity(event::Entity),
        schema.create_table_from_entity(voucher::Entity),
        schema.create_table_from_entity(feedback::Entity),
        schema.create_table_from_entity(token::Entity),
    ];
    for stmt in stmts {
        db.execute(db.get_database_backend().build(&stmt)).await.expect("create table");
    }
    db
}

pub fn at(y: i32, m: u32, d: u32) -> DateTimeWithTimeZone {
    Utc.with_ymd_and_hms(y, m, d, 0, 0, 0).unwrap().into()
}

pub fn new_user(username: &str, role: UserRole) -> NewUser {
    NewUser {
        name: format!("{} name", username),
        username: username.to_string(),
        password: "Secret123".into(),
        email: format!("{}@example.com", username),
        phone: "0912345678".into(),
        role,
        status: Status::Active,
    }
}

pub fn new_game(name: &str) -> NewGame {
    NewGame {
        name: name.to_string(),
        images: "https://cdn.example.com/game.png".into(),
        game_type: "quiz".into(),
        exchange_allow: true,
        tutorial: "answer fast".into(),
    }
}

pub fn new_event(game_id: Uuid, start: DateTimeWithTimeZone, end: DateTimeWithTimeZone) -> NewEvent {
    NewEvent {
        name: "Summer sale".into(),
        images: "https://cdn.example.com/event.png".into(),
        voucher_num: 100,
        start_time: start,
        end_time: end,
        game_id,
    }
}

pub fn new_voucher(code: &str) -> NewVoucher {
    NewVoucher {
        code: code.to_string(),
        qrcode: format!("qr:{}", code),
        images: "https://cdn.example.com/voucher.png".into(),
        value: 10,
        description: "10% off".into(),
        expired_time: at(2024, 12, 31),
        status: Status::Active,
    }
}

/// Inserts without hashing; fixtures never log in.
pub async fn seed_user(db: &DatabaseConnection, username: &str, role: UserRole) -> user::Model {
    SeaOrmUserRepository { db: db.clone() }
        .insert(new_user(username, role))
        .await
        .expect("seed user")
}

pub async fn seed_game(db: &DatabaseConnection) -> game::Model {
    SeaOrmGameRepository { db: db.clone() }
        .insert(new_game("Quiz"))
        .await
        .expect("seed game")
}

pub async fn seed_event(db: &DatabaseConnection, owner: Uuid) -> event::Model {
    let game = seed_game(db).await;
    SeaOrmEventRepository { db: db.clone() }
        .insert(owner, new_event(game.id, at(2024, 6, 1), at(2024, 6, 30)))
        .await
        .expect("seed event")
}
