//! OTLP JSON span formatter.
//!
//! Converts finished spans into the OTLP/JSON trace encoding so the trace
//! file can be replayed into any collector that accepts `resourceSpans`.

use opentelemetry::trace::{Event, Link, SpanId, SpanKind, Status};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::SpanData;
use opentelemetry_sdk::resource::Resource;
use serde_json::{json, Value as JsonValue};
use std::time::{Duration, SystemTime};

/// Formats span batches as single-line OTLP JSON documents.
pub struct SpanFormatter {
    resource: Resource,
    scope_name: &'static str,
}

impl SpanFormatter {
    pub const fn new(resource: Resource, scope_name: &'static str) -> Self {
        Self { resource, scope_name }
    }

    /// Formats a batch as one OTLP document.
    ///
    /// ```json
    /// {
    ///   "resourceSpans": [{
    ///     "resource": {"attributes": [{"key": "service.name", "value": {"stringValue": "medsimplifier"}}]},
    ///     "scopeSpans": [{"scope": {"name": "medsimplifier", "version": "0.1.0"}, "spans": [...]}]
    ///   }]
    /// }
    /// ```
    pub fn format_batch(&self, batch: &[SpanData]) -> JsonValue {
        let resource_attrs: Vec<JsonValue> = self
            .resource
            .iter()
            .map(|(key, value)| key_value(key.as_str(), value))
            .collect();

        let spans: Vec<JsonValue> = batch.iter().map(format_span).collect();

        json!({
            "resourceSpans": [{
                "resource": { "attributes": resource_attrs },
                "scopeSpans": [{
                    "scope": {
                        "name": self.scope_name,
                        "version": env!("CARGO_PKG_VERSION"),
                    },
                    "spans": spans,
                }],
            }],
        })
    }
}

impl std::fmt::Debug for SpanFormatter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpanFormatter")
            .field("scope_name", &self.scope_name)
            .finish_non_exhaustive()
    }
}

fn format_span(span: &SpanData) -> JsonValue {
    let parent_span_id = if span.parent_span_id == SpanId::INVALID {
        String::new()
    } else {
        format!("{:016x}", span.parent_span_id)
    };
    let (status_code, status_message) = status(&span.status);

    json!({
        "traceId": format!("{:032x}", span.span_context.trace_id()),
        "spanId": format!("{:016x}", span.span_context.span_id()),
        "parentSpanId": parent_span_id,
        "name": span.name,
        "kind": span_kind(&span.span_kind),
        "startTimeUnixNano": unix_nanos(span.start_time),
        "endTimeUnixNano": unix_nanos(span.end_time),
        "attributes": attributes(&span.attributes),
        "events": span.events.iter().map(format_event).collect::<Vec<_>>(),
        "links": span.links.iter().map(format_link).collect::<Vec<_>>(),
        "status": {
            "code": status_code,
            "message": status_message,
        },
    })
}

fn format_event(event: &Event) -> JsonValue {
    json!({
        "timeUnixNano": unix_nanos(event.timestamp),
        "name": event.name,
        "attributes": attributes(&event.attributes),
    })
}

fn format_link(link: &Link) -> JsonValue {
    json!({
        "traceId": format!("{:032x}", link.span_context.trace_id()),
        "spanId": format!("{:016x}", link.span_context.span_id()),
        "attributes": attributes(&link.attributes),
    })
}

/// OTLP encodes 64-bit integers as decimal strings.
fn unix_nanos(time: SystemTime) -> String {
    time.duration_since(SystemTime::UNIX_EPOCH)
        .unwrap_or(Duration::ZERO)
        .as_nanos()
        .to_string()
}

const fn span_kind(kind: &SpanKind) -> u8 {
    match kind {
        SpanKind::Internal => 1,
        SpanKind::Server => 2,
        SpanKind::Client => 3,
        SpanKind::Producer => 4,
        SpanKind::Consumer => 5,
    }
}

fn status(status: &Status) -> (u8, String) {
    match status {
        Status::Unset => (0, String::new()),
        Status::Ok => (1, String::new()),
        Status::Error { description } => (2, description.to_string()),
    }
}

fn attributes(attrs: &[KeyValue]) -> Vec<JsonValue> {
    attrs
        .iter()
        .map(|kv| key_value(kv.key.as_str(), &kv.value))
        .collect()
}

fn key_value(key: &str, value: &Value) -> JsonValue {
    json!({ "key": key, "value": any_value(value) })
}

/// Arrays fall back to their debug rendering as a string value.
fn any_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!({ "boolValue": b }),
        Value::I64(i) => json!({ "intValue": i.to_string() }),
        Value::F64(f) => json!({ "doubleValue": f }),
        Value::String(s) => json!({ "stringValue": s.as_str() }),
        Value::Array(_) => json!({ "stringValue": format!("{value:?}") }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_batch_carries_resource_and_scope() {
        let resource = Resource::new(vec![KeyValue::new("service.name", "medsimplifier")]);
        let formatter = SpanFormatter::new(resource, "medsimplifier");

        let doc = formatter.format_batch(&[]);
        let resource_spans = &doc["resourceSpans"][0];

        let attrs = resource_spans["resource"]["attributes"]
            .as_array()
            .expect("attribute array");
        assert!(attrs.iter().any(|attr| attr["key"] == "service.name"
            && attr["value"]["stringValue"] == "medsimplifier"));
        assert_eq!(resource_spans["scopeSpans"][0]["scope"]["name"], "medsimplifier");
        assert_eq!(resource_spans["scopeSpans"][0]["spans"], json!([]));
    }

    #[test]
    fn attribute_values_use_otlp_encoding() {
        let encoded = attributes(&[
            KeyValue::new("request.kind", "simplify"),
            KeyValue::new("http.status", 422_i64),
            KeyValue::new("reply.ok", false),
        ]);

        assert_eq!(encoded[0], json!({"key": "request.kind", "value": {"stringValue": "simplify"}}));
        assert_eq!(encoded[1]["value"], json!({"intValue": "422"}));
        assert_eq!(encoded[2]["value"], json!({"boolValue": false}));
    }

    #[test]
    fn statuses_and_timestamps() {
        assert_eq!(status(&Status::Unset), (0, String::new()));
        assert_eq!(status(&Status::error("timed out")), (2, "timed out".to_string()));
        assert_eq!(unix_nanos(SystemTime::UNIX_EPOCH + Duration::from_millis(5)), "5000000");
        assert_eq!(span_kind(&SpanKind::Client), 3);
    }
}
