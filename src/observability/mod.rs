//! Tracing with OTLP JSON file export.
//!
//! ```text
//! tracing macros → tracing-opentelemetry → SDK provider → FileSpanExporter → rotating JSON file
//! ```
//!
//! Every catalog fetch and simplification request runs inside a span. Its trace
//! and span IDs ride along in the host request context, so the reply is
//! recorded under the span that sent it.
//!
//! - Output: `~/.local/share/zellij/medsimplifier/medsimplifier-otlp.json`,
//!   one OTLP document per line
//! - Rotation: 10 MB per file, 3 timestamped backups
//! - Filter: the `trace_level` plugin option in `EnvFilter` syntax, default `"info"`
//!
//! ```rust,no_run
//! use medsimplifier::observability::init_tracing;
//! use medsimplifier::Config;
//!
//! init_tracing(&Config::default());
//! tracing::debug!("plugin initialized");
//! ```

mod file_writer;
mod init;
mod span_formatter;
mod tracer;

pub use init::{init_tracing, SERVICE_NAME, TRACE_FILE_NAME};
