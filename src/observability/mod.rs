//! OpenTelemetry-based observability with file-based span export.
//!
//! # Architecture
//!
//! ```text
//! tracing macros → tracing-opentelemetry → OpenTelemetry SDK → FileSpanExporter → JSON lines
//!               └→ fmt layer on stderr (optional)
//! ```
//!
//! # Features
//!
//! - **File-Based Export**: One JSON object per finished span in
//!   `~/.local/share/eventscout/eventscout-spans.jsonl`
//! - **Rotation**: Files rotate at 8 MiB with 3 numbered backups
//! - **Stderr Logging**: Compact human-readable events when `log_stderr` is set
//!
//! # Configuration
//!
//! Trace level is controlled via:
//! 1. `RUST_LOG` environment variable (highest priority)
//! 2. `trace_level` in the configuration file or overrides
//! 3. Default: `"info"`
//!
//! # Modules
//!
//! - [`init`]: Subscriber setup
//! - [`exporter`]: Span exporter and tracer provider
//! - [`rotation`]: Size-rotated line writer

pub mod exporter;
pub mod init;
pub mod rotation;

pub use init::{init_tracing, TracingGuard};
