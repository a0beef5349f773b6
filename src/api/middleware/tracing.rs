//! HTTP request/response tracing middleware.

use std::time::Duration;

use axum::http::{Request, Response};
use tower_http::classify::{ServerErrorsAsFailures, ServerErrorsFailureClass, SharedClassifier};
use tower_http::trace::{
    DefaultOnBodyChunk, DefaultOnEos, DefaultOnRequest, MakeSpan, OnFailure, OnResponse,
    TraceLayer,
};
use tracing::Span;

/// Opens one `request` span per HTTP request.
///
/// Only the path is recorded; query strings never reach the logs.
#[derive(Debug, Clone, Copy, Default)]
pub struct RequestSpan;

impl<B> MakeSpan<B> for RequestSpan {
    fn make_span(&mut self, request: &Request<B>) -> Span {
        tracing::info_span!(
            "request",
            method = %request.method(),
            path = %request.uri().path(),
        )
    }
}

/// Logs status and latency once the response head is ready.
///
/// 4xx responses are expected outcomes (unknown codes, taken slugs) and log
/// at `debug`; everything else at `info`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ResponseLog;

impl<B> OnResponse<B> for ResponseLog {
    fn on_response(self, response: &Response<B>, latency: Duration, _span: &Span) {
        let status = response.status().as_u16();
        let latency_ms = latency.as_millis() as u64;

        if response.status().is_client_error() {
            tracing::debug!(status, latency_ms, "Response sent");
        } else {
            tracing::info!(status, latency_ms, "Response sent");
        }
    }
}

/// Logs 5xx responses and transport failures at `error`.
#[derive(Debug, Clone, Copy, Default)]
pub struct FailureLog;

impl OnFailure<ServerErrorsFailureClass> for FailureLog {
    fn on_failure(
        &mut self,
        failure: ServerErrorsFailureClass,
        latency: Duration,
        _span: &Span,
    ) {
        tracing::error!(
            failure = %failure,
            latency_ms = latency.as_millis() as u64,
            "Request failed"
        );
    }
}

pub type HttpTraceLayer = TraceLayer<
    SharedClassifier<ServerErrorsAsFailures>,
    RequestSpan,
    DefaultOnRequest,
    ResponseLog,
    DefaultOnBodyChunk,
    DefaultOnEos,
    FailureLog,
>;

/// Creates the tracing middleware wrapping the whole router.
///
/// # Example Logs
///
/// ```text
/// INFO request{method=GET path=/promo/aZ3kQ9}: Response sent status=307 latency_ms=2
/// ERROR request{method=POST path=/api/shorten}: Request failed failure=Status code: 500 latency_ms=31
/// ```
pub fn layer() -> HttpTraceLayer {
    TraceLayer::new_for_http()
        .make_span_with(RequestSpan)
        .on_response(ResponseLog)
        .on_failure(FailureLog)
}
