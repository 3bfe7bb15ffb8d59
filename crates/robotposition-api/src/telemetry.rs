//! Tracing subscriber and OpenTelemetry export.

use opentelemetry::trace::TracerProvider;
use opentelemetry::{KeyValue, global};
use opentelemetry_otlp::{SpanExporter, WithExportConfig};
use opentelemetry_sdk::Resource;
use opentelemetry_sdk::trace::SdkTracerProvider;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

use crate::config::Config;
use crate::error::AppError;

const TRACER_NAME: &str = "robotposition-api";

/// Installs the global subscriber: JSON log lines filtered by `RUST_LOG`
/// (default `info`), plus span export over OTLP gRPC when an endpoint is
/// configured.
///
/// The returned provider must be passed to [`shutdown`] before exit so that
/// buffered spans are flushed.
///
/// # Errors
///
/// Returns `AppError::Telemetry` if the exporter cannot be built or a global
/// subscriber is already installed.
pub fn init(config: &Config) -> Result<Option<SdkTracerProvider>, AppError> {
    let provider = config
        .otlp_endpoint
        .as_deref()
        .map(|endpoint| build_tracer_provider(endpoint, &config.service_name))
        .transpose()?;

    let otel_layer = provider
        .as_ref()
        .map(|p| tracing_opentelemetry::layer().with_tracer(p.tracer(TRACER_NAME)));

    tracing_subscriber::registry()
        .with(env_filter())
        .with(tracing_subscriber::fmt::layer().json())
        .with(otel_layer)
        .try_init()
        .map_err(|e| AppError::Telemetry(e.to_string()))?;

    if let Some(p) = &provider {
        global::set_tracer_provider(p.clone());
    }

    Ok(provider)
}

/// Flushes and stops span export.
pub fn shutdown(provider: Option<SdkTracerProvider>) {
    let Some(provider) = provider else {
        return;
    };
    if let Err(error) = provider.shutdown() {
        tracing::warn!(%error, "tracer provider did not shut down cleanly");
    }
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

fn build_tracer_provider(
    endpoint: &str,
    service_name: &str,
) -> Result<SdkTracerProvider, AppError> {
    let exporter = SpanExporter::builder()
        .with_tonic()
        .with_endpoint(endpoint)
        .build()
        .map_err(|e| AppError::Telemetry(format!("failed to build OTLP exporter: {e}")))?;

    let resource = Resource::builder_empty()
        .with_attributes([KeyValue::new("service.name", service_name.to_owned())])
        .build();

    Ok(SdkTracerProvider::builder()
        .with_resource(resource)
        .with_batch_exporter(exporter)
        .build())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(flavor = "current_thread")]
    async fn test_build_tracer_provider_accepts_grpc_endpoint() {
        let provider = build_tracer_provider("http://127.0.0.1:4317", "robots-test");

        assert!(provider.is_ok());
    }

    #[test]
    fn test_shutdown_without_provider_is_a_no_op() {
        shutdown(None);
    }
}
