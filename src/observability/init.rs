//! Tracing initialization and subscriber setup.
//!
//! Assembles the subscriber pipeline from `tracing` macros to span export:
//! an [`EnvFilter`], the OpenTelemetry layer feeding the file exporter, and an
//! optional human-readable layer on stderr.

use super::exporter::create_tracer_provider;
use super::rotation::RotatingFile;
use crate::infrastructure::paths;
use crate::Config;
use opentelemetry::trace::TracerProvider as _;
use opentelemetry_sdk::trace::TracerProvider;
use std::path::PathBuf;
use tracing_opentelemetry::OpenTelemetryLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

const SERVICE_NAME: &str = "eventscout";

/// Keeps the tracer provider alive; shuts it down when dropped.
#[derive(Debug)]
pub struct TracingGuard {
    provider: TracerProvider,
    span_file: PathBuf,
}

impl TracingGuard {
    /// Where finished spans are written.
    #[must_use]
    pub fn span_file(&self) -> &std::path::Path {
        &self.span_file
    }
}

impl Drop for TracingGuard {
    fn drop(&mut self) {
        if let Err(e) = self.provider.shutdown() {
            eprintln!("eventscout: failed to shut down tracing: {e}");
        }
    }
}

/// Resolves the filter directive: `RUST_LOG` if set, otherwise the
/// configured `trace_level`, otherwise `info`.
fn filter_for(config: &Config) -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = config.trace_level.as_deref().unwrap_or("info");
        EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"))
    })
}

/// Installs the global tracing subscriber.
///
/// Spans go to `<data dir>/eventscout/eventscout-spans.jsonl` (rotated by
/// size). With `log_stderr` enabled, events are also printed to stderr.
///
/// # Returns
///
/// A guard that flushes and shuts down the exporter when dropped, or `None`
/// when a global subscriber was already installed.
///
/// # Example
///
/// ```rust
/// use eventscout::observability::init_tracing;
/// use eventscout::Config;
///
/// let dir = tempfile::tempdir()?;
/// let config = Config {
///     trace_level: Some("debug".to_string()),
///     ..Default::default()
/// };
/// let _guard = init_tracing(&config, Some(dir.path().join("spans.jsonl")));
/// tracing::debug!("tracing is now active");
/// # Ok::<(), std::io::Error>(())
/// ```
#[must_use]
pub fn init_tracing(config: &Config, span_file: Option<PathBuf>) -> Option<TracingGuard> {
    let span_file = span_file.unwrap_or_else(paths::default_trace_file);
    let provider = create_tracer_provider(RotatingFile::new(span_file.clone()), SERVICE_NAME);
    let otel_layer = OpenTelemetryLayer::new(provider.tracer(SERVICE_NAME));

    let stderr_layer = config.log_stderr.then(|| {
        tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .compact()
    });

    tracing_subscriber::registry()
        .with(filter_for(config))
        .with(otel_layer)
        .with(stderr_layer)
        .try_init()
        .ok()?;

    Some(TracingGuard {
        provider,
        span_file,
    })
}
