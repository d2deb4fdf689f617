mod common;

use axum::http::StatusCode;
use chrono::{Duration, Utc};
use common::{body_text, create_test_user, get, location, setup_test_app, with_cookies};
use sitekit::modules::messages::MessageRepository;
use sitekit_db::Fields;
use sitekit_models::Message;
use sqlx::PgPool;

async fn seed_message(pool: &PgPool, title: &str, minutes_ago: i64) -> Message {
    MessageRepository::create(
        pool,
        &Fields::new()
            .set("fullname", "Ada Lovelace")
            .set("email", "ada@example.com")
            .set("title", title)
            .set("body", "Please call me back")
            .set("created_at", Utc::now() - Duration::minutes(minutes_ago)),
    )
    .await
    .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_list_messages_newest_first(pool: PgPool) {
    let admin = create_test_user(&pool, "admin@example.com").await;
    seed_message(&pool, "Older enquiry", 30).await;
    seed_message(&pool, "Newer enquiry", 5).await;
    let app = setup_test_app(pool);
    let cookie = app.session_cookie(&admin);

    let response = app.send(get("/admin/message/", Some(&cookie))).await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    let newer = body.find("Newer enquiry").unwrap();
    let older = body.find("Older enquiry").unwrap();
    assert!(newer < older);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_message_list_has_no_create_link(pool: PgPool) {
    let admin = create_test_user(&pool, "admin@example.com").await;
    let app = setup_test_app(pool);
    let cookie = app.session_cookie(&admin);

    let response = app.send(get("/admin/message/", Some(&cookie))).await;

    assert!(!body_text(response).await.contains("message/create"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_message_detail(pool: PgPool) {
    let admin = create_test_user(&pool, "admin@example.com").await;
    let message = seed_message(&pool, "Quote request", 1).await;
    let app = setup_test_app(pool);
    let cookie = app.session_cookie(&admin);

    let response = app
        .send(get(&format!("/admin/message/{}/detail/", message.id), Some(&cookie)))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Quote request"));
    assert!(body.contains("Please call me back"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_message_redirects(pool: PgPool) {
    let admin = create_test_user(&pool, "admin@example.com").await;
    let app = setup_test_app(pool);
    let cookie = app.session_cookie(&admin);

    for uri in ["/admin/message/999/detail/", "/admin/message/abc/detail/"] {
        let response = app.send(get(uri, Some(&cookie))).await;
        assert_eq!(response.status(), StatusCode::FOUND);
        assert_eq!(location(&response), "/admin/message/");

        let follow_up = with_cookies(&cookie, &response);
        let list = app.send(get("/admin/message/", Some(&follow_up))).await;
        assert!(body_text(list).await.contains("Message does not exist"));
    }
}

#[sqlx::test(migrations = "./migrations")]
async fn test_messages_have_no_write_routes(pool: PgPool) {
    let admin = create_test_user(&pool, "admin@example.com").await;
    let message = seed_message(&pool, "Keep me", 1).await;
    let app = setup_test_app(pool.clone());
    let cookie = app.session_cookie(&admin);

    let response = app
        .send(get(&format!("/admin/message/{}/delete/", message.id), Some(&cookie)))
        .await;

    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert!(MessageRepository::get_by_id(&pool, message.id).await.unwrap().is_some());
}
