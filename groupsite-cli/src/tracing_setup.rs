//! Logging for the groupsite binary
//!
//! One subscriber: an `EnvFilter`, compact console output and, when built
//! with `telemetry` and run with `--otel`, an OTLP span exporter. Each HTTP
//! request runs inside a `request` span carrying `method`, `path` and
//! `resource`, so every event a handler emits names the resource it served.
//!
//! Usage:
//!   groupsite --debug serve              # Debug logging to console
//!   groupsite --otel serve               # Also export spans over OTLP
//!   RUST_LOG=groupsite_server=trace groupsite serve
//!
//! Environment variables:
//!   RUST_LOG                          # Overrides the default directives
//!   OTEL_EXPORTER_OTLP_ENDPOINT       # OTLP endpoint (default: http://localhost:4317)
//!   OTEL_SERVICE_NAME                 # Service name (default: groupsite)

use anyhow::{anyhow, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Tracing configuration options
#[derive(Debug, Clone, Default)]
pub struct TracingConfig {
    /// Debug level unless RUST_LOG says otherwise
    pub debug: bool,
    /// Enable OpenTelemetry OTLP export
    pub otel: bool,
}

/// Filter used when RUST_LOG is unset. sqlx logs every statement at info.
fn default_directives(debug: bool) -> &'static str {
    if debug {
        "info,groupsite=debug,groupsite_server=debug,tower_http=debug,sqlx=info"
    } else {
        "info,tower_http=info,sqlx=warn"
    }
}

fn env_filter(config: &TracingConfig) -> EnvFilter {
    EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directives(config.debug)))
}

#[cfg(feature = "telemetry")]
fn otel_layer<S>() -> Result<
    tracing_opentelemetry::OpenTelemetryLayer<S, opentelemetry_sdk::trace::Tracer>,
>
where
    S: tracing::Subscriber + for<'span> tracing_subscriber::registry::LookupSpan<'span>,
{
    use opentelemetry::trace::TracerProvider as _;
    use opentelemetry::KeyValue;
    use opentelemetry_otlp::WithExportConfig;
    use opentelemetry_sdk::trace::TracerProvider;

    let endpoint = std::env::var("OTEL_EXPORTER_OTLP_ENDPOINT")
        .unwrap_or_else(|_| "http://localhost:4317".to_string());
    let service_name =
        std::env::var("OTEL_SERVICE_NAME").unwrap_or_else(|_| "groupsite".to_string());

    let exporter = opentelemetry_otlp::SpanExporter::builder()
        .with_tonic()
        .with_endpoint(&endpoint)
        .build()
        .map_err(|e| anyhow!("Failed to create OTLP exporter: {}", e))?;

    let provider = TracerProvider::builder()
        .with_batch_exporter(exporter, opentelemetry_sdk::runtime::Tokio)
        .with_resource(opentelemetry_sdk::Resource::new(vec![
            KeyValue::new("service.name", service_name),
            KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        ]))
        .build();

    let tracer = provider.tracer("groupsite");
    // Dropping the provider would stop export
    let _ = opentelemetry::global::set_tracer_provider(provider);

    Ok(tracing_opentelemetry::layer().with_tracer(tracer))
}

/// Install the global subscriber.
pub fn init(config: &TracingConfig) -> Result<()> {
    #[cfg(feature = "telemetry")]
    let otel = if config.otel { Some(otel_layer()?) } else { None };
    #[cfg(not(feature = "telemetry"))]
    let otel: Option<tracing_subscriber::layer::Identity> = None;

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_target(config.debug)
        .compact();

    let exporting = otel.is_some();
    tracing_subscriber::registry()
        .with(env_filter(config))
        .with(fmt_layer)
        .with(otel)
        .try_init()
        .map_err(|err| anyhow!(err))?;

    if exporting {
        tracing::info!("OpenTelemetry export enabled");
    } else if config.otel {
        tracing::warn!("--otel ignored: built without the telemetry feature");
    }

    Ok(())
}

/// Flush pending spans
#[cfg(feature = "telemetry")]
pub fn shutdown_otel() {
    opentelemetry::global::shutdown_tracer_provider();
}

#[cfg(not(feature = "telemetry"))]
pub fn shutdown_otel() {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_directives_parse() {
        for debug in [false, true] {
            assert!(EnvFilter::try_new(default_directives(debug)).is_ok(), "debug={}", debug);
        }
    }

    #[test]
    fn debug_raises_service_crates_only() {
        assert!(default_directives(true).contains("groupsite_server=debug"));
        assert!(!default_directives(false).contains("debug"));
    }
}
