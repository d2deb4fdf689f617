//! Request logging and tracing setup.
//!
//! Every request runs inside a `request` span carrying its id, method and
//! route, so events logged by handlers and repositories are tied to it. The
//! id is echoed back in `x-request-id`.

use std::time::Instant;

use axum::{
    extract::{MatchedPath, Request},
    http::{HeaderName, HeaderValue, StatusCode, header},
    middleware::Next,
    response::Response,
};
use sitekit_config::LogConfig;
use tracing::{Instrument, error, info, info_span, warn};
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Id of the signed-in user, left on the response by the authentication
/// middleware so the completion event can name who made the request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestUser(pub i64);

/// What the completion event reports about a response.
#[derive(Debug, Default, PartialEq, Eq)]
struct Outcome {
    user_id: Option<i64>,
    redirect_to: Option<String>,
}

impl Outcome {
    fn of(response: &Response) -> Self {
        let redirect_to = response
            .status()
            .is_redirection()
            .then(|| response.headers().get(header::LOCATION))
            .flatten()
            .and_then(|location| location.to_str().ok())
            .map(str::to_owned);

        Self {
            user_id: response.extensions().get::<RequestUser>().map(|user| user.0),
            redirect_to,
        }
    }
}

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let request_id = uuid::Uuid::new_v4();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| req.uri().path().to_owned());

    let span = info_span!(
        "request",
        request_id = %request_id,
        method = %req.method(),
        route = %route,
    );

    let mut response = next.run(req).instrument(span.clone()).await;

    let latency_ms = start.elapsed().as_millis();
    let status = response.status();
    let outcome = Outcome::of(&response);
    span.in_scope(|| log_completion(status, latency_ms, &outcome));

    if let Ok(value) = HeaderValue::from_str(&request_id.to_string()) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
    response
}

fn log_completion(status: StatusCode, latency_ms: u128, outcome: &Outcome) {
    let user_id = outcome.user_id;
    if status.is_server_error() {
        error!(status = status.as_u16(), latency_ms, ?user_id, "Request failed");
    } else if status.is_client_error() {
        warn!(status = status.as_u16(), latency_ms, ?user_id, "Request rejected");
    } else if let Some(location) = &outcome.redirect_to {
        info!(status = status.as_u16(), latency_ms, ?user_id, location = %location, "Redirected");
    } else {
        info!(status = status.as_u16(), latency_ms, ?user_id, "Request completed");
    }
}

/// Console output filtered by `config.filter`, an errors-only `sitekit.log`
/// and, unless disabled, a structured `sitekit.json`, both rolling daily in
/// `config.dir`.
pub fn init_tracing(config: &LogConfig) -> std::io::Result<()> {
    std::fs::create_dir_all(&config.dir)?;

    let console_filter =
        EnvFilter::try_new(&config.filter).unwrap_or_else(|_| EnvFilter::new("info"));
    let console_layer = fmt::layer()
        .with_target(false)
        .compact()
        .with_filter(console_filter);

    let error_layer = fmt::layer()
        .with_writer(RollingFileAppender::new(Rotation::DAILY, &config.dir, "sitekit.log"))
        .with_ansi(false)
        .with_file(true)
        .with_line_number(true)
        .with_filter(EnvFilter::new("error"));

    let json_layer = config.json.then(|| {
        fmt::layer()
            .json()
            .with_writer(RollingFileAppender::new(Rotation::DAILY, &config.dir, "sitekit.json"))
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(EnvFilter::new("info"))
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(error_layer)
        .with(json_layer)
        .init();

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::Body,
        middleware,
        response::{IntoResponse, Redirect},
        routing::get,
    };
    use tower::ServiceExt;

    #[test]
    fn test_outcome_reports_redirect_target() {
        let response = Redirect::to("/admin/user/").into_response();
        assert_eq!(
            Outcome::of(&response),
            Outcome {
                user_id: None,
                redirect_to: Some("/admin/user/".to_string()),
            }
        );
    }

    #[test]
    fn test_outcome_reads_request_user() {
        let mut response = "ok".into_response();
        response.extensions_mut().insert(RequestUser(7));

        let outcome = Outcome::of(&response);
        assert_eq!(outcome.user_id, Some(7));
        assert_eq!(outcome.redirect_to, None);
    }

    #[tokio::test]
    async fn test_middleware_sets_request_id() {
        let app = Router::new()
            .route("/", get(|| async { "hello" }))
            .layer(middleware::from_fn(logging_middleware));

        let response = app
            .oneshot(axum::http::Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let id = response.headers()[REQUEST_ID_HEADER].to_str().unwrap();
        assert!(uuid::Uuid::parse_str(id).is_ok());
    }
}
