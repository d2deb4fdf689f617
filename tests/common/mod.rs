#![allow(dead_code)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use http_body_util::BodyExt;
use sitekit::modules::users::repository::UserRepository;
use sitekit::router::init_router;
use sitekit::state::AppState;
use sitekit::utils::email::{EmailJob, EmailQueue};
use sitekit_auth::create_access_token;
use sitekit_config::Settings;
use sitekit_db::Fields;
use sitekit_models::User;
use sqlx::PgPool;
use tokio::sync::mpsc::UnboundedReceiver;
use tower::ServiceExt;

pub const PASSWORD: &str = "correct-horse";

pub struct TestApp {
    pub router: Router,
    pub settings: Settings,
    pub email_jobs: UnboundedReceiver<EmailJob>,
}

impl TestApp {
    pub async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    /// Cookie header value authenticating `user`.
    pub fn session_cookie(&self, user: &User) -> String {
        let token = create_access_token(user.id, &self.settings.jwt).unwrap();
        format!("{}=Bearer%20{token}", self.settings.cookies.token_name)
    }

    pub fn bearer_header(&self, user: &User) -> String {
        let token = create_access_token(user.id, &self.settings.jwt).unwrap();
        format!("Bearer {token}")
    }
}

pub fn test_settings() -> Settings {
    let mut settings = Settings::default();
    settings.jwt.secret = "integration-test-secret".to_string();
    settings
}

pub fn setup_test_app(pool: PgPool) -> TestApp {
    setup_test_app_with(pool, test_settings())
}

pub fn setup_test_app_with(pool: PgPool, settings: Settings) -> TestApp {
    let (queue, email_jobs) = EmailQueue::new();
    let state = AppState::new(pool, settings.clone(), queue);
    TestApp {
        router: init_router(state),
        settings,
        email_jobs,
    }
}

pub async fn create_test_user(pool: &PgPool, email: &str) -> User {
    UserRepository::create(
        pool,
        Fields::new().set("email", email).set("password", PASSWORD),
    )
    .await
    .unwrap()
}

pub fn get(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

pub fn post_form(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn body_text(response: Response<Body>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

pub fn location(response: &Response<Body>) -> &str {
    response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
}

/// Full `Set-Cookie` values of a response.
pub fn set_cookies(response: &Response<Body>) -> Vec<String> {
    response
        .headers()
        .get_all(header::SET_COOKIE)
        .iter()
        .filter_map(|v| v.to_str().ok())
        .map(str::to_string)
        .collect()
}

pub fn set_cookie_named(response: &Response<Body>, name: &str) -> Option<String> {
    let prefix = format!("{name}=");
    set_cookies(response)
        .into_iter()
        .find(|cookie| cookie.starts_with(&prefix))
}

/// `name=value` pairs of the response cookies, ready to send back.
pub fn cookie_header(response: &Response<Body>) -> String {
    set_cookies(response)
        .iter()
        .filter_map(|cookie| cookie.split(';').next())
        .collect::<Vec<_>>()
        .join("; ")
}

/// Appends the cookies set by `response` to `cookie`.
pub fn with_cookies(cookie: &str, response: &Response<Body>) -> String {
    let extra = cookie_header(response);
    if extra.is_empty() {
        cookie.to_string()
    } else {
        format!("{cookie}; {extra}")
    }
}
