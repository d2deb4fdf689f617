mod common;

use axum::http::StatusCode;
use common::{body_text, create_test_user, get, location, post_form, setup_test_app, with_cookies};
use sitekit::modules::site_config::SiteConfigRepository;
use sitekit_db::{Fields, Repository};
use sitekit_models::SiteConfig;
use sqlx::PgPool;

#[sqlx::test(migrations = "./migrations")]
async fn test_config_page_creates_singleton(pool: PgPool) {
    let admin = create_test_user(&pool, "admin@example.com").await;
    let app = setup_test_app(pool.clone());
    let cookie = app.session_cookie(&admin);

    let response = app.send(get("/admin/config/", Some(&cookie))).await;
    assert_eq!(response.status(), StatusCode::OK);

    app.send(get("/admin/config/", Some(&cookie))).await;
    let total = Repository::<SiteConfig>::count(&pool, &Fields::new())
        .await
        .unwrap();
    assert_eq!(total, 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_second_config_row_is_rejected(pool: PgPool) {
    SiteConfigRepository::ensure(&pool).await.unwrap();

    let result = sqlx::query("INSERT INTO site_config DEFAULT VALUES")
        .execute(&pool)
        .await;

    assert!(result.is_err());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_config_rejects_bad_phone(pool: PgPool) {
    let admin = create_test_user(&pool, "admin@example.com").await;
    let app = setup_test_app(pool);
    let cookie = app.session_cookie(&admin);

    let response = app
        .send(post_form(
            "/admin/config/update/",
            "company_name=Acme&phone_number=12345&email=not-an-email",
            Some(&cookie),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = body_text(response).await;
    assert!(body.contains("Please provide a valid mobile phone number"));
    assert!(body.contains("Invalid email address."));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_config_shows_on_home(pool: PgPool) {
    let admin = create_test_user(&pool, "admin@example.com").await;
    let app = setup_test_app(pool.clone());
    let cookie = app.session_cookie(&admin);

    let response = app
        .send(post_form(
            "/admin/config/update/",
            "company_name=Acme+Widgets&site_name=Widgets&seo_description=Fine+widgets\
             &phone_number=%2B16502530000&address=1+Main+Street\
             &counter_line_name_1=Clients&counter_line_value_1=120",
            Some(&cookie),
        ))
        .await;

    assert_eq!(response.status(), StatusCode::FOUND);
    assert_eq!(location(&response), "/admin/config/");

    let follow_up = with_cookies(&cookie, &response);
    let detail = app.send(get("/admin/config/", Some(&follow_up))).await;
    assert!(body_text(detail).await.contains("Site configuration successfully updated"));

    let config = SiteConfigRepository::load(&pool).await.unwrap();
    assert_eq!(config.company_name, "Acme Widgets");
    assert!(config.phone_number.starts_with("+1"));

    let home = app.send(get("/", None)).await;
    assert_eq!(home.status(), StatusCode::OK);
    let body = body_text(home).await;
    assert!(body.contains("<title>Acme Widgets</title>"));
    assert!(body.contains("Fine widgets"));
    assert!(body.contains("1 Main Street"));
    assert!(body.contains("Clients"));
    assert!(body.contains("120"));
}

#[sqlx::test(migrations = "./migrations")]
async fn test_config_requires_login(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app.send(get("/admin/config/update/", None)).await;

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}
