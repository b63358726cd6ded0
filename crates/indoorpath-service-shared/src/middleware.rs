//! Request correlation and HTTP metrics.
//!
//! [`RequestLayer`] wraps the router. Each request gets a [`RequestId`]
//! (the caller's `X-Request-ID`, or a fresh UUID v7) that is stored as a
//! request extension, attached to a `request` span and echoed on the response.
//! On completion the layer records:
//!
//! - `http_requests_total{method,path,status}`
//! - `http_request_duration_seconds{method,path}`
//! - `http_request_size_bytes{method,path}` / `http_response_size_bytes{method,path}`
//!
//! Handlers take the id with the [`RequestId`] extractor. Path labels are
//! limited to the service routes plus the configured metrics route.

use std::convert::Infallible;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::task::{Context, Poll};
use std::time::{Duration, Instant};

use axum::extract::FromRequestParts;
use axum::http::{request::Parts, HeaderMap, HeaderName, HeaderValue, Method, Request, Response};
use pin_project_lite::pin_project;
use tower::{Layer, Service};
use tracing::Span;
use uuid::Uuid;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

/// Routes reported verbatim in metric labels, besides the metrics route.
const KNOWN_PATHS: &[&str] = &["/path", "/api/path", "/health/live", "/health/ready"];

/// Correlation id for one request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestId(String);

impl RequestId {
    /// Time-sortable UUID v7.
    pub fn generate() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// The caller's non-blank `X-Request-ID`, or a generated id.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        headers
            .get(REQUEST_ID_HEADER)
            .and_then(|value| value.to_str().ok())
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| Self(value.to_string()))
            .unwrap_or_else(Self::generate)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for RequestId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Uses the id stored by [`RequestLayer`], falling back to the headers when
/// the layer is not installed.
impl<S: Send + Sync> FromRequestParts<S> for RequestId {
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(parts
            .extensions
            .get::<RequestId>()
            .cloned()
            .unwrap_or_else(|| RequestId::from_headers(&parts.headers)))
    }
}

/// Metric label for a request path; unknown paths share `unmatched`.
pub fn path_label<'a>(path: &'a str, metrics_path: &str) -> &'a str {
    if path == metrics_path || KNOWN_PATHS.contains(&path) {
        path
    } else {
        "unmatched"
    }
}

fn status_class(status: u16) -> &'static str {
    match status / 100 {
        2 => "2xx",
        3 => "3xx",
        4 => "4xx",
        5 => "5xx",
        _ => "other",
    }
}

fn content_length(headers: &HeaderMap) -> Option<f64> {
    headers
        .get(axum::http::header::CONTENT_LENGTH)?
        .to_str()
        .ok()?
        .parse()
        .ok()
}

/// Labels shared by every metric recorded for one request.
#[derive(Debug, Clone)]
struct RequestLabels {
    method: Method,
    path: String,
}

impl RequestLabels {
    fn record_size(&self, name: &'static str, headers: &HeaderMap) {
        if let Some(bytes) = content_length(headers) {
            metrics::histogram!(
                name,
                "method" => self.method.to_string(),
                "path" => self.path.clone()
            )
            .record(bytes);
        }
    }

    fn record_completion(&self, status: &'static str, elapsed: Duration) {
        metrics::counter!(
            "http_requests_total",
            "method" => self.method.to_string(),
            "path" => self.path.clone(),
            "status" => status
        )
        .increment(1);
        metrics::histogram!(
            "http_request_duration_seconds",
            "method" => self.method.to_string(),
            "path" => self.path.clone()
        )
        .record(elapsed.as_secs_f64());
    }
}

#[derive(Debug, Clone)]
pub struct RequestLayer {
    metrics_path: Arc<str>,
}

impl RequestLayer {
    /// `metrics_path` is the route the exposition text is served on.
    pub fn new(metrics_path: &str) -> Self {
        Self {
            metrics_path: Arc::from(metrics_path),
        }
    }
}

impl Default for RequestLayer {
    fn default() -> Self {
        Self::new("/metrics")
    }
}

impl<S> Layer<S> for RequestLayer {
    type Service = RequestService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        RequestService {
            inner,
            metrics_path: Arc::clone(&self.metrics_path),
        }
    }
}

#[derive(Debug, Clone)]
pub struct RequestService<S> {
    inner: S,
    metrics_path: Arc<str>,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for RequestService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>>,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = RequestFuture<S::Future>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: Request<ReqBody>) -> Self::Future {
        let labels = RequestLabels {
            method: req.method().clone(),
            path: path_label(req.uri().path(), &self.metrics_path).to_string(),
        };
        labels.record_size("http_request_size_bytes", req.headers());

        let request_id = RequestId::from_headers(req.headers());
        let span = tracing::info_span!(
            "request",
            request_id = %request_id,
            method = %labels.method,
            path = %req.uri().path(),
        );
        req.extensions_mut().insert(request_id.clone());

        RequestFuture {
            inner: span.in_scope(|| self.inner.call(req)),
            started: Instant::now(),
            labels,
            request_id,
            span,
        }
    }
}

pin_project! {
    pub struct RequestFuture<F> {
        #[pin]
        inner: F,
        started: Instant,
        labels: RequestLabels,
        request_id: RequestId,
        span: Span,
    }
}

impl<F, ResBody, E> Future for RequestFuture<F>
where
    F: Future<Output = Result<Response<ResBody>, E>>,
{
    type Output = F::Output;

    fn poll(self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Self::Output> {
        let this = self.project();
        let _entered = this.span.enter();

        let Poll::Ready(mut result) = this.inner.poll(cx) else {
            return Poll::Pending;
        };
        let elapsed = this.started.elapsed();

        match &mut result {
            Ok(response) => {
                let status = response.status();
                this.labels
                    .record_completion(status_class(status.as_u16()), elapsed);
                this.labels
                    .record_size("http_response_size_bytes", response.headers());
                if let Ok(value) = HeaderValue::from_str(this.request_id.as_str()) {
                    response.headers_mut().insert(REQUEST_ID_HEADER, value);
                }
                tracing::info!(
                    status = status.as_u16(),
                    latency_ms = elapsed.as_secs_f64() * 1000.0,
                    "request completed"
                );
            }
            Err(_) => {
                this.labels.record_completion("5xx", elapsed);
                tracing::error!(latency_ms = elapsed.as_secs_f64() * 1000.0, "request failed");
            }
        }

        Poll::Ready(result)
    }
}
