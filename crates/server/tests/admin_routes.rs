mod support;

use axum::http::{Request, StatusCode};
use axum::body::Body;
use serde_json::{json, Value};

use support::{admin_app, call, get, json};

async fn create_user(app: &axum::Router, username: &str, role: &str) -> String {
    let (status, body) = call(
        app,
        json(
            "POST",
            "/admin/user",
            &[],
            json!({
                "name": format!("{} name", username),
                "username": username,
                "password": "Secret123",
                "email": format!("{}@example.com", username),
                "phone": "0912345678",
                "role": role,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

async fn create_game(app: &axum::Router) -> String {
    let (status, body) = call(
        app,
        json("POST", "/admin/game", &[], json!({"name": "Lucky wheel", "type": "wheel", "exchange_allow": true})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    body["data"]["id"].as_str().unwrap().to_string()
}

fn assert_error(body: &Value, code: u64, needle: &str) {
    assert_eq!(body["code"], code, "{}", body);
    assert!(body["error"].as_str().unwrap().contains(needle), "{}", body);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn health_is_plain_ok() {
    let app = admin_app().await;
    let (status, body) = call(&app, get("/health", &[])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "ok"}));
}

#[tokio::test]
async fn user_create_get_list() {
    let app = admin_app().await;
    let id = create_user(&app, "alice", "end_user").await;

    let (status, body) = call(&app, get(&format!("/admin/user/{}", id), &[])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["code"], 200);
    assert_eq!(body["message"], "success");
    assert_eq!(body["data"]["username"], "alice");
    assert_eq!(body["data"]["role"], "end_user");
    assert!(body["data"].get("password").is_none());

    let (_, body) = call(&app, get("/admin/user", &[])).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn missing_field_is_malformed_entity() {
    let app = admin_app().await;
    let (status, body) = call(
        &app,
        json("POST", "/admin/user", &[], json!({"name": "Bob", "password": "pw", "email": "b@x.io"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, 1001, "missing field `username`");
}

#[tokio::test]
async fn non_json_body_is_unsupported_media_type() {
    let app = admin_app().await;
    let req = Request::builder()
        .method("POST")
        .uri("/admin/game")
        .header("content-type", "text/plain")
        .body(Body::from("name=quiz"))
        .unwrap();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::UNSUPPORTED_MEDIA_TYPE);
    assert_eq!(body["code"], 1006);
}

#[tokio::test]
async fn broken_json_is_malformed_entity() {
    let app = admin_app().await;
    let req = Request::builder()
        .method("POST")
        .uri("/admin/game")
        .header("content-type", "application/json")
        .body(Body::from("{\"name\": "))
        .unwrap();
    let (status, body) = call(&app, req).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
}

#[tokio::test]
async fn partial_update_leaves_other_fields() {
    let app = admin_app().await;
    let id = create_user(&app, "carol", "end_user").await;

    let (status, body) = call(&app, json("PUT", &format!("/admin/user/{}", id), &[], json!({"name": "Carol B"}))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["name"], "Carol B");
    assert_eq!(body["data"]["email"], "carol@example.com");
    assert_eq!(body["data"]["username"], "carol");
}

#[tokio::test]
async fn empty_update_is_rejected() {
    let app = admin_app().await;
    let id = create_user(&app, "dave", "end_user").await;
    let (status, body) = call(&app, json("PUT", &format!("/admin/user/{}", id), &[], json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
}

#[tokio::test]
async fn delete_missing_user_is_not_found() {
    let app = admin_app().await;
    let id = create_user(&app, "erin", "end_user").await;
    let req = || Request::builder().method("DELETE").uri(format!("/admin/user/{}", id)).body(Body::empty()).unwrap();

    let (status, body) = call(&app, req()).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("data").is_none());

    let (status, body) = call(&app, req()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 1003);
}

#[tokio::test]
async fn bad_path_id_is_invalid_uuid() {
    let app = admin_app().await;
    let (status, body) = call(&app, get("/admin/user/42", &[])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, 1001, "invalid uuid");
}

#[tokio::test]
async fn deactivate_then_activate() {
    let app = admin_app().await;
    let id = create_user(&app, "frank", "end_user").await;
    let put = |path: String| Request::builder().method("PUT").uri(path).body(Body::empty()).unwrap();

    let (_, body) = call(&app, put(format!("/admin/user/deactive/{}", id))).await;
    assert_eq!(body["data"]["status"], "inactive");
    let (_, body) = call(&app, put(format!("/admin/user/active/{}", id))).await;
    assert_eq!(body["data"]["status"], "active");
}

#[tokio::test]
async fn game_lifecycle() {
    let app = admin_app().await;
    let id = create_game(&app).await;

    let (status, body) = call(&app, json("PUT", &format!("/admin/game/{}", id), &[], json!({"exchange_allow": false}))).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["data"]["exchange_allow"], false);
    assert_eq!(body["data"]["type"], "wheel");

    let del = Request::builder().method("DELETE").uri(format!("/admin/game/{}", id)).body(Body::empty()).unwrap();
    let (status, _) = call(&app, del).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, get(&format!("/admin/game/{}", id), &[])).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn enterprise_record_create_get_update() {
    let app = admin_app().await;
    let (status, body) = call(
        &app,
        json("POST", "/admin/enterprise", &[], json!({"name": "Acme", "field": "retail", "location": "Hanoi"})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = call(&app, json("PUT", &format!("/admin/enterprise/{}", id), &[], json!({"status": "inactive"}))).await;
    assert_eq!(body["data"]["status"], "inactive");
    assert_eq!(body["data"]["name"], "Acme");

    let (status, body) = call(&app, get(&format!("/admin/enterprise/{}", id), &[])).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["location"], "Hanoi");
}

#[tokio::test]
async fn statistics_count_users() {
    let app = admin_app().await;
    create_user(&app, "ent1", "enterprise").await;
    create_user(&app, "end1", "end_user").await;
    create_user(&app, "end2", "end_user").await;

    let (_, body) = call(&app, get("/admin/statistic/users", &[])).await;
    assert_eq!(body["data"], 3);
    let (_, body) = call(&app, get("/admin/statistic/enterprises", &[])).await;
    assert_eq!(body["data"], 1);
    let (_, body) = call(&app, get("/admin/statistic/active-end-users", &[])).await;
    assert_eq!(body["data"], 2);
    let (_, body) = call(&app, get("/admin/statistic/games", &[])).await;
    assert_eq!(body["data"], 0);
}

#[tokio::test]
async fn daily_statistics_need_a_window() {
    let app = admin_app().await;
    let (status, body) = call(&app, get("/admin/statistic/new-end-users?end=2024-06-30T00:00:00Z", &[])).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_error(&body, 1001, "missing field `start`");
}

#[tokio::test]
async fn enterprise_routes_need_enterprise_caller() {
    let app = admin_app().await;
    let end_user = create_user(&app, "gina", "end_user").await;

    let (status, body) = call(&app, get("/enterprise/event", &[])).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1004);

    let (status, body) = call(&app, get("/enterprise/event", &[("X-User-Id", end_user.as_str())])).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 1005);

    let stranger = "5b0d9b4e-3f55-4a53-9d0e-0d4c2c6b6a10";
    let (status, _) = call(&app, get("/enterprise/event", &[("X-User-Id", stranger)])).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn events_and_vouchers_are_scoped_to_owner() {
    let app = admin_app().await;
    let owner = create_user(&app, "shop", "enterprise").await;
    let rival = create_user(&app, "rival", "enterprise").await;
    let game = create_game(&app).await;
    let as_owner = [("X-User-Id", owner.as_str())];
    let as_rival = [("X-User-Id", rival.as_str())];

    let (status, body) = call(
        &app,
        json(
            "POST",
            "/enterprise/event",
            &as_owner,
            json!({
                "name": "Summer",
                "voucher_num": 10,
                "start_time": "2024-06-01T00:00:00Z",
                "end_time": "2024-06-30T00:00:00Z",
                "game_id": game,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let event = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["user_id"], owner.as_str());

    let (_, body) = call(&app, get("/enterprise/event", &as_owner)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    let (_, body) = call(&app, get("/enterprise/event", &as_rival)).await;
    assert!(body["data"].as_array().unwrap().is_empty());
    let (status, _) = call(&app, get(&format!("/enterprise/event/{}", event), &as_rival)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, body) = call(
        &app,
        get("/enterprise/event?start=2024-07-01T00:00:00Z&end=2024-07-31T00:00:00Z", &as_owner),
    )
    .await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let vouchers = format!("/enterprise/event/{}/voucher", event);
    let (status, body) = call(
        &app,
        json(
            "POST",
            &vouchers,
            &as_owner,
            json!({"code": "SUMMER10", "value": 10, "expired_time": "2024-07-01T00:00:00Z"}),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED, "{}", body);
    let voucher = body["data"]["id"].as_str().unwrap().to_string();

    let (_, body) = call(&app, get(&vouchers, &as_owner)).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);

    let (status, _) = call(&app, get(&vouchers, &as_rival)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let one = format!("{}/{}", vouchers, voucher);
    let (_, body) = call(&app, json("PUT", &one, &as_owner, json!({"value": 0}))).await;
    assert_eq!(body["data"]["value"], 0);
    assert_eq!(body["data"]["code"], "SUMMER10");

    let del = || Request::builder().method("DELETE").uri(&one).header("X-User-Id", owner.as_str()).body(Body::empty()).unwrap();
    let (status, _) = call(&app, del()).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = call(&app, del()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn event_with_inverted_times_is_rejected() {
    let app = admin_app().await;
    let owner = create_user(&app, "late", "enterprise").await;
    let game = create_game(&app).await;
    let (status, body) = call(
        &app,
        json(
            "POST",
            "/enterprise/event",
            &[("X-User-Id", owner.as_str())],
            json!({
                "name": "Backwards",
                "start_time": "2024-06-30T00:00:00Z",
                "end_time": "2024-06-01T00:00:00Z",
                "game_id": game,
            }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
}

#[tokio::test]
async fn daily_new_end_users_in_envelope() {
    let app = admin_app().await;
    create_user(&app, "day1", "end_user").await;
    create_user(&app, "day2", "end_user").await;
    create_user(&app, "dayshop", "enterprise").await;
    let (_, user) = call(&app, get("/admin/user", &[])).await;
    let today = user["data"][0]["created_at"].as_str().unwrap()[..10].to_string();

    let now = chrono::Utc::now();
    let stamp = |t: chrono::DateTime<chrono::Utc>| t.to_rfc3339_opts(chrono::SecondsFormat::Secs, true);
    let uri = format!(
        "/admin/statistic/new-end-users?start={}&end={}",
        stamp(now - chrono::Duration::days(1)),
        stamp(now + chrono::Duration::days(1)),
    );
    let (status, body) = call(&app, get(&uri, &[])).await;
    assert_eq!(status, StatusCode::OK, "{}", body);
    assert_eq!(body["code"], 200);
    assert_eq!(body["data"], json!([{"day": today, "count": 2}]));
}

#[tokio::test]
async fn undecodable_query_uses_error_envelope() {
    let app = admin_app().await;
    let (status, body) = call(
        &app,
        get("/admin/statistic/new-enterprises?start=2024-06-01T00:00:00Z&start=2024-06-02T00:00:00Z", &[]),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn event_update_keeps_end_after_start() {
    let app = admin_app().await;
    let owner = create_user(&app, "mover", "enterprise").await;
    let game = create_game(&app).await;
    let as_owner = [("X-User-Id", owner.as_str())];
    let (_, body) = call(
        &app,
        json(
            "POST",
            "/enterprise/event",
            &as_owner,
            json!({
                "name": "June",
                "start_time": "2024-06-01T00:00:00Z",
                "end_time": "2024-06-10T00:00:00Z",
                "game_id": game,
            }),
        ),
    )
    .await;
    let event = body["data"]["id"].as_str().unwrap().to_string();

    let (status, body) = call(
        &app,
        json("PUT", &format!("/enterprise/event/{}", event), &as_owner, json!({"end_time": "2024-05-01T00:00:00Z"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 1001);
}
