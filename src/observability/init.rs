//! Subscriber setup: `tracing` spans flow through the OpenTelemetry layer
//! into the file exporter.

use super::tracer;
use crate::infrastructure::paths::get_data_dir;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry::KeyValue;
use opentelemetry_sdk::resource::Resource;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Service and instrumentation scope name reported with every span.
pub const SERVICE_NAME: &str = "medsimplifier";

/// Trace file name inside the data directory.
pub const TRACE_FILE_NAME: &str = "medsimplifier-otlp.json";

/// Installs the global subscriber.
///
/// The filter comes from `config.trace_level` and defaults to `"info"`.
/// Spans are written to `~/.local/share/zellij/medsimplifier/medsimplifier-otlp.json`
/// as seen from the host.
///
/// Tracing is optional: if the data directory cannot be created nothing is
/// installed. Calling this more than once keeps the first subscriber.
///
/// ```rust,no_run
/// use medsimplifier::observability::init_tracing;
/// use medsimplifier::Config;
///
/// let config = Config {
///     trace_level: Some("medsimplifier=debug".to_string()),
///     ..Default::default()
/// };
/// init_tracing(&config);
/// ```
pub fn init_tracing(config: &Config) {
    let level = config.trace_level.as_deref().unwrap_or("info");

    let data_dir = get_data_dir();
    if std::fs::create_dir_all(&data_dir).is_err() {
        return;
    }

    let resource = Resource::new(vec![
        KeyValue::new("service.name", SERVICE_NAME),
        KeyValue::new("service.version", env!("CARGO_PKG_VERSION")),
        KeyValue::new("simplifier.service_url", config.service_url.clone()),
    ]);

    let provider = tracer::create_tracer_provider(data_dir.join(TRACE_FILE_NAME), resource, SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let _ = tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(otel_layer)
        .try_init();
}
