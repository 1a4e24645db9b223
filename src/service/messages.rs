//! Request and reply types exchanged with the host's HTTP facility.
//!
//! The plugin never performs I/O itself. The event handler emits a
//! [`ServiceRequest`] inside an action, the plugin shim hands it to Zellij's
//! `web_request`, and the reply comes back as a [`ServiceReply`]. Routing and
//! trace correlation travel in the request's context map, which Zellij echoes
//! back verbatim with the result.

use crate::domain::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

const CONTEXT_KIND: &str = "kind";
const CONTEXT_TRACE_ID: &str = "trace_id";
const CONTEXT_PARENT_SPAN_ID: &str = "parent_span_id";

/// Distributed tracing context carried across the asynchronous request.
///
/// Captures the current trace and span IDs from OpenTelemetry so that reply
/// handling can be linked to the span that issued the request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceContext {
    /// OpenTelemetry trace ID as a hex string.
    pub trace_id: String,

    /// Span ID of the issuing span, as a hex string.
    pub parent_span_id: String,
}

impl TraceContext {
    /// Creates a trace context from the current tracing span.
    ///
    /// Returns `None` when no valid OpenTelemetry span is active (for example,
    /// when tracing has not been initialized).
    pub fn from_current() -> Option<Self> {
        use opentelemetry::trace::TraceContextExt;
        use tracing_opentelemetry::OpenTelemetrySpanExt;

        let span = tracing::Span::current();
        let otel_context = span.context();
        let span_ref = otel_context.span();
        let span_context = span_ref.span_context();

        if span_context.is_valid() {
            Some(Self {
                trace_id: format!("{:032x}", span_context.trace_id()),
                parent_span_id: format!("{:016x}", span_context.span_id()),
            })
        } else {
            None
        }
    }

    /// Makes the issuing span the remote parent of spans created while the
    /// returned guard is held.
    ///
    /// Returns `None` if the stored IDs are not valid hex.
    #[must_use]
    pub fn attach(&self) -> Option<opentelemetry::ContextGuard> {
        use opentelemetry::trace::{SpanContext, SpanId, TraceContextExt, TraceFlags, TraceId, TraceState};

        let trace_id = TraceId::from_hex(&self.trace_id).ok()?;
        let span_id = SpanId::from_hex(&self.parent_span_id).ok()?;

        let span_context = SpanContext::new(trace_id, span_id, TraceFlags::SAMPLED, true, TraceState::default());
        let otel_context = opentelemetry::Context::current().with_remote_span_context(span_context);

        Some(otel_context.attach())
    }

    fn from_context_map(context: &BTreeMap<String, String>) -> Option<Self> {
        Some(Self {
            trace_id: context.get(CONTEXT_TRACE_ID)?.clone(),
            parent_span_id: context.get(CONTEXT_PARENT_SPAN_ID)?.clone(),
        })
    }
}

/// Which endpoint a request targets. Used to route the reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestKind {
    /// One-time fetch of the example catalog feed.
    Catalog,
    /// Submission of editor text to the simplification service.
    Simplify,
}

impl RequestKind {
    const fn as_str(self) -> &'static str {
        match self {
            Self::Catalog => "catalog",
            Self::Simplify => "simplify",
        }
    }

    fn parse(value: &str) -> Option<Self> {
        match value {
            "catalog" => Some(Self::Catalog),
            "simplify" => Some(Self::Simplify),
            _ => None,
        }
    }
}

/// HTTP method of a [`ServiceRequest`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

/// Body of a simplify call.
#[derive(Debug, Serialize)]
struct SimplifyPayload<'a> {
    text: &'a str,
}

/// An outbound HTTP request for the plugin shim to execute.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceRequest {
    pub kind: RequestKind,
    pub method: HttpMethod,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Vec<u8>,
    pub trace_context: Option<TraceContext>,
}

impl ServiceRequest {
    /// Creates the catalog feed request with the current trace context.
    #[must_use]
    pub fn fetch_catalog(url: &str) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert("Accept".to_string(), "application/json".to_string());

        Self {
            kind: RequestKind::Catalog,
            method: HttpMethod::Get,
            url: url.to_string(),
            headers,
            body: Vec::new(),
            trace_context: TraceContext::from_current(),
        }
    }

    /// Creates a simplify request carrying `{"text": text}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be serialized.
    pub fn simplify(url: &str, text: &str) -> Result<Self> {
        let body = serde_json::to_vec(&SimplifyPayload { text })?;

        let mut headers = BTreeMap::new();
        headers.insert("Content-Type".to_string(), "application/json".to_string());
        headers.insert("Accept".to_string(), "application/json".to_string());

        Ok(Self {
            kind: RequestKind::Simplify,
            method: HttpMethod::Post,
            url: url.to_string(),
            headers,
            body,
            trace_context: TraceContext::from_current(),
        })
    }

    /// Context map handed to the host and echoed back with the reply.
    #[must_use]
    pub fn context(&self) -> BTreeMap<String, String> {
        let mut context = BTreeMap::new();
        context.insert(CONTEXT_KIND.to_string(), self.kind.as_str().to_string());
        if let Some(trace) = &self.trace_context {
            context.insert(CONTEXT_TRACE_ID.to_string(), trace.trace_id.clone());
            context.insert(CONTEXT_PARENT_SPAN_ID.to_string(), trace.parent_span_id.clone());
        }
        context
    }
}

/// A completed HTTP exchange as reported by the host.
///
/// Network failures are also delivered this way, typically with a non-2xx
/// status and a plain-text body describing the failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceReply {
    pub kind: RequestKind,
    pub status: u16,
    pub body: Vec<u8>,
    pub trace_context: Option<TraceContext>,
}

impl ServiceReply {
    /// Rebuilds a reply from the host result and the echoed context map.
    ///
    /// Returns `None` if the context does not identify one of our requests.
    #[must_use]
    pub fn from_host(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Self> {
        let kind = context.get(CONTEXT_KIND).and_then(|k| RequestKind::parse(k))?;
        Some(Self {
            kind,
            status,
            body,
            trace_context: TraceContext::from_context_map(context),
        })
    }

    /// Whether the host reported a 2xx status.
    #[must_use]
    pub const fn is_success_status(&self) -> bool {
        self.status >= 200 && self.status < 300
    }
}
