use crate::app_env;
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use std::time::Duration;
use tower_http::trace::TraceLayer;
use tracing::level_filters::LevelFilter;
use tracing::{Span, debug, debug_span, field};
use tracing_subscriber::{EnvFilter, prelude::*, registry};

/// Wraps the given router in a tracing middleware so every request runs inside
/// a span carrying the method, the path, and eventually the response status.
pub fn attach_tracing_http<T>(router: Router<T>) -> Router<T>
where
    T: Clone + Send + Sync + 'static,
{
    let request_tracing = TraceLayer::new_for_http()
        .make_span_with(|request: &Request<Body>| {
            debug_span!(
                "request",
                method = &request.method().as_str(),
                path = request.uri().path(),
                response_status = field::Empty,
            )
        })
        .on_response(|response: &Response<Body>, _latency: Duration, span: &Span| {
            span.record("response_status", field::display(response.status()));
            debug!("request processing complete");
        });

    router.layer(request_tracing)
}

/// Installs the global logging sink: JSON logs on stdout. Per-module filtering
/// comes from [app_env::LOG_LEVEL] and falls back to the "info" level when the
/// variable is unset.
pub fn setup_logging() {
    let env_filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::INFO.into())
        .with_env_var(app_env::LOG_LEVEL)
        .from_env()
        .expect("building the logging filter failed");

    registry()
        .with(
            tracing_subscriber::fmt::layer()
                .json()
                .with_filter(env_filter),
        )
        .init();
}
