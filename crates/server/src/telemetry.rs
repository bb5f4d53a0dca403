use axum::{body::Body, http::Request, response::Response};
use opentelemetry::{
    global,
    trace::{SpanKind, TraceContextExt, Tracer},
    Context, KeyValue,
};
use opentelemetry_otlp::{WithExportConfig, WithTonicConfig};
use std::{
    future::Future,
    pin::Pin,
    sync::OnceLock,
    task::{Context as TaskContext, Poll},
};
use tower::{Layer, Service};
use uuid::Uuid;

use crate::auth::jwt::Claims;

const APP_VERSION: &str = env!("CARGO_PKG_VERSION");
const DEFAULT_SERVICE_NAME: &str = "star-tailors";

/// Keep the LoggerProvider alive for the process lifetime.
static LOGGER_PROVIDER: OnceLock<opentelemetry_sdk::logs::SdkLoggerProvider> = OnceLock::new();

/// Runtime for the OTLP gRPC exporters. Tonic's lazy connect spawns onto the
/// current Tokio runtime, which `dioxus::serve` may not have entered yet.
static OTEL_RUNTIME: OnceLock<tokio::runtime::Runtime> = OnceLock::new();

#[derive(Debug)]
pub enum TelemetryError {
    Runtime(std::io::Error),
    Exporter(String),
    InvalidIngestionKey,
}

impl std::fmt::Display for TelemetryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TelemetryError::Runtime(e) => write!(f, "failed to start OTEL runtime: {e}"),
            TelemetryError::Exporter(e) => write!(f, "failed to build OTLP exporter: {e}"),
            TelemetryError::InvalidIngestionKey => write!(f, "OTLP_INGESTION_KEY is not valid gRPC metadata"),
        }
    }
}

impl std::error::Error for TelemetryError {}

fn ingestion_metadata() -> Result<Option<opentelemetry_otlp::tonic_types::metadata::MetadataMap>, TelemetryError> {
    let Some(key) = std::env::var("OTLP_INGESTION_KEY").ok().filter(|k| !k.is_empty()) else {
        return Ok(None);
    };
    let mut metadata = opentelemetry_otlp::tonic_types::metadata::MetadataMap::new();
    metadata.insert(
        "signoz-ingestion-key",
        key.parse().map_err(|_| TelemetryError::InvalidIngestionKey)?,
    );
    Ok(Some(metadata))
}

fn tls_config(endpoint: &str) -> Option<opentelemetry_otlp::tonic_types::transport::ClientTlsConfig> {
    endpoint
        .starts_with("https://")
        .then(|| opentelemetry_otlp::tonic_types::transport::ClientTlsConfig::new().with_native_roots())
}

/// Set up OTLP trace and log export.
///
/// Dioxus owns the `tracing` subscriber, so this only installs the global
/// tracer provider (fed by `OtelTraceLayer`) and bridges the `log` crate.
///
/// Reads from the environment:
///   - `OTEL_EXPORTER_OTLP_ENDPOINT`: collector gRPC address; unset disables export
///   - `OTEL_SERVICE_NAME`: service name tag (default `star-tailors`)
///   - `OTLP_INGESTION_KEY`: hosted collector access token (optional)
///   - `DEPLOY_ENV`: deployment environment tag (default `development`)
pub fn init_telemetry() -> Result<(), TelemetryError> {
    let _ = dotenvy::dotenv();

    let Ok(endpoint) = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT") else {
        eprintln!("OTEL_EXPORTER_OTLP_ENDPOINT not set, skipping OTLP telemetry");
        return Ok(());
    };

    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| DEFAULT_SERVICE_NAME.to_string());
    let environment = std::env::var("DEPLOY_ENV").unwrap_or_else(|_| "development".to_string());

    if OTEL_RUNTIME.get().is_none() {
        let rt = tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .worker_threads(1)
            .build()
            .map_err(TelemetryError::Runtime)?;
        let _ = OTEL_RUNTIME.set(rt);
    }
    let _guard = OTEL_RUNTIME.get().map(|rt| rt.enter());

    let metadata = ingestion_metadata()?;

    let mut span_builder = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint);
    if let Some(tls) = tls_config(&endpoint) {
        span_builder = span_builder.with_tls_config(tls);
    }
    if let Some(md) = metadata.clone() {
        span_builder = span_builder.with_metadata(md);
    }
    let span_exporter = span_builder
        .build()
        .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

    let resource = opentelemetry_sdk::Resource::builder()
        .with_service_name(service_name)
        .with_attribute(KeyValue::new("service.version", APP_VERSION))
        .with_attribute(KeyValue::new("deployment.environment", environment))
        .build();

    let provider = opentelemetry_sdk::trace::SdkTracerProvider::builder()
        .with_batch_exporter(span_exporter)
        .with_resource(resource.clone())
        .build();
    global::set_tracer_provider(provider);

    let mut log_builder = opentelemetry_otlp::LogExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint);
    if let Some(tls) = tls_config(&endpoint) {
        log_builder = log_builder.with_tls_config(tls);
    }
    if let Some(md) = metadata {
        log_builder = log_builder.with_metadata(md);
    }
    let log_exporter = log_builder
        .build()
        .map_err(|e| TelemetryError::Exporter(e.to_string()))?;

    let logger_provider = LOGGER_PROVIDER.get_or_init(|| {
        opentelemetry_sdk::logs::SdkLoggerProvider::builder()
            .with_batch_exporter(log_exporter)
            .with_resource(resource)
            .build()
    });

    let bridge = opentelemetry_appender_log::OpenTelemetryLogBridge::new(logger_provider);
    match log::set_boxed_logger(Box::new(bridge)) {
        Ok(()) => log::set_max_level(log::LevelFilter::Info),
        Err(_) => eprintln!("Log bridge skipped, a `log` logger is already set"),
    }

    eprintln!("Telemetry initialized v{APP_VERSION}, exporting traces and logs to {endpoint}");
    Ok(())
}

/// Client platform from an explicit `X-Client-Platform` header, else a
/// User-Agent heuristic. Native Dioxus clients send no User-Agent.
fn detect_platform(ua: &str, explicit: Option<&str>) -> &'static str {
    if let Some(p) = explicit {
        return match p {
            "ios" => "ios",
            "android" => "android",
            "desktop" => "desktop",
            "web" => "web",
            _ => "unknown",
        };
    }

    if ua.is_empty() || ua == "unknown" {
        "native"
    } else if ua.contains("iPhone") || ua.contains("iPad") {
        "ios"
    } else if ua.contains("Android") {
        "android"
    } else if ua.contains("Mozilla") {
        "web"
    } else {
        "native"
    }
}

/// Span name route: UUID path segments collapse to `{id}` so spans group per endpoint.
fn route_template(path: &str) -> String {
    path.split('/')
        .map(|segment| {
            if Uuid::parse_str(segment).is_ok() {
                "{id}"
            } else {
                segment
            }
        })
        .collect::<Vec<_>>()
        .join("/")
}

/// Tower layer that creates an OpenTelemetry span for each HTTP request,
/// tagged with method, route, client platform, request id, status and the
/// signed-in user when known.
#[derive(Clone)]
pub struct OtelTraceLayer;

impl<S> Layer<S> for OtelTraceLayer {
    type Service = OtelTraceService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        OtelTraceService { inner }
    }
}

#[derive(Clone)]
pub struct OtelTraceService<S> {
    inner: S,
}

impl<S> Service<Request<Body>> for OtelTraceService<S>
where
    S: Service<Request<Body>, Response = Response> + Send + Clone + 'static,
    S::Future: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;

    fn poll_ready(&mut self, cx: &mut TaskContext<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<Body>) -> Self::Future {
        let tracer = global::tracer(DEFAULT_SERVICE_NAME);
        let method = req.method().to_string();
        let path = req.uri().path().to_string();

        let header = |name: &str| {
            req.headers()
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::to_string)
        };
        let user_agent = header("user-agent").unwrap_or_else(|| "unknown".to_string());
        let explicit_platform = header("x-client-platform");
        let client_platform = detect_platform(&user_agent, explicit_platform.as_deref());
        let request_id = header("x-request-id").unwrap_or_default();

        let mut attributes = vec![
            KeyValue::new("http.method", method.clone()),
            KeyValue::new("http.target", path.clone()),
            KeyValue::new("http.user_agent", user_agent),
            KeyValue::new("client.platform", client_platform),
            KeyValue::new("http.request_id", request_id),
        ];
        match req.extensions().get::<Claims>() {
            Some(claims) => attributes.extend([
                KeyValue::new("user.id", claims.sub.to_string()),
                KeyValue::new("user.username", claims.username.clone()),
                KeyValue::new("user.role", claims.role.clone()),
                KeyValue::new("auth.status", "authenticated"),
            ]),
            None => attributes.push(KeyValue::new("auth.status", "anonymous")),
        }

        let span = tracer
            .span_builder(format!("{method} {}", route_template(&path)))
            .with_kind(SpanKind::Server)
            .with_attributes(attributes)
            .start(&tracer);

        let cx = Context::current_with_span(span);
        let mut inner = self.inner.clone();

        let guard = cx.clone().attach();
        let future = inner.call(req);
        drop(guard);

        Box::pin(async move {
            let response = future.await?;

            let span = cx.span();
            let status = response.status();
            span.set_attribute(KeyValue::new("http.status_code", status.as_u16() as i64));

            if status.is_server_error() {
                span.set_status(opentelemetry::trace::Status::error(status.to_string()));
            } else if status.is_client_error() {
                span.set_attribute(KeyValue::new("error.type", "client_error"));
            }

            Ok(response)
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn explicit_header_takes_priority() {
        assert_eq!(detect_platform("Mozilla/5.0 Chrome", Some("ios")), "ios");
        assert_eq!(detect_platform("", Some("smartwatch")), "unknown");
    }

    #[test]
    fn user_agent_heuristics() {
        assert_eq!(detect_platform("", None), "native");
        assert_eq!(detect_platform("Mozilla/5.0 (iPhone; CPU iPhone OS 17_0)", None), "ios");
        assert_eq!(detect_platform("Mozilla/5.0 (Linux; Android 14; Pixel 8)", None), "android");
        assert_eq!(detect_platform("Mozilla/5.0 (Macintosh; Intel Mac OS X)", None), "web");
        assert_eq!(detect_platform("curl/8.4.0", None), "native");
    }

    #[test]
    fn uuid_segments_become_placeholders() {
        assert_eq!(
            route_template("/api/jobs/7c9e6679-7425-40de-944b-e07fc1f90ae7/status"),
            "/api/jobs/{id}/status"
        );
        assert_eq!(route_template("/admin/billing"), "/admin/billing");
    }
}
