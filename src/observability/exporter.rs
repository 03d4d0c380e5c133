//! OpenTelemetry span exporter writing JSON lines to a rotated file.
//!
//! Every finished span becomes one self-contained JSON object on its own
//! line, which keeps the file greppable and easy to load with `jq`:
//!
//! ```json
//! {"service":"eventscout","name":"api_request","traceId":"…","spanId":"…",
//!  "parentSpanId":"…","start":"2024-06-15T09:30:00.000120Z","durationUs":8123,
//!  "attributes":{"method":"GET","path":"/api/events/"},"events":[],"status":"unset"}
//! ```

use super::rotation::RotatingFile;
use chrono::{DateTime, SecondsFormat, Utc};
use futures_util::future::BoxFuture;
use opentelemetry::trace::{SpanId, Status, TraceError};
use opentelemetry::{KeyValue, Value};
use opentelemetry_sdk::export::trace::{ExportResult, SpanData, SpanExporter};
use opentelemetry_sdk::resource::Resource;
use opentelemetry_sdk::trace::TracerProvider;
use serde_json::{json, Map, Value as JsonValue};
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

/// Span exporter appending one JSON line per span.
pub struct FileSpanExporter {
    file: RotatingFile,
    service: String,
    is_shutdown: AtomicBool,
}

impl FileSpanExporter {
    #[must_use]
    pub fn new(file: RotatingFile, service: impl Into<String>) -> Self {
        Self {
            file,
            service: service.into(),
            is_shutdown: AtomicBool::new(false),
        }
    }

    /// Serializes one span.
    #[must_use]
    pub fn span_to_json(&self, span: &SpanData) -> JsonValue {
        let parent = if span.parent_span_id == SpanId::INVALID {
            JsonValue::Null
        } else {
            json!(format!("{:016x}", span.parent_span_id))
        };
        let duration_us = span
            .end_time
            .duration_since(span.start_time)
            .map_or(0, |d| u64::try_from(d.as_micros()).unwrap_or(u64::MAX));

        let events: Vec<JsonValue> = span
            .events
            .iter()
            .map(|event| {
                json!({
                    "name": event.name,
                    "time": timestamp(event.timestamp),
                    "attributes": attributes(&event.attributes),
                })
            })
            .collect();

        let status = match &span.status {
            Status::Unset => "unset".to_string(),
            Status::Ok => "ok".to_string(),
            Status::Error { description } => format!("error: {description}"),
        };

        json!({
            "service": self.service,
            "name": span.name,
            "traceId": format!("{:032x}", span.span_context.trace_id()),
            "spanId": format!("{:016x}", span.span_context.span_id()),
            "parentSpanId": parent,
            "start": timestamp(span.start_time),
            "durationUs": duration_us,
            "attributes": attributes(&span.attributes),
            "events": events,
            "status": status,
        })
    }
}

fn timestamp(time: SystemTime) -> String {
    DateTime::<Utc>::from(time).to_rfc3339_opts(SecondsFormat::Micros, true)
}

fn attributes(pairs: &[KeyValue]) -> JsonValue {
    let map: Map<String, JsonValue> = pairs
        .iter()
        .map(|kv| (kv.key.to_string(), attribute_value(&kv.value)))
        .collect();
    JsonValue::Object(map)
}

fn attribute_value(value: &Value) -> JsonValue {
    match value {
        Value::Bool(b) => json!(b),
        Value::I64(i) => json!(i),
        Value::F64(f) => json!(f),
        Value::String(s) => json!(s.as_str()),
        Value::Array(_) => json!(value.to_string()),
    }
}

impl SpanExporter for FileSpanExporter {
    fn export(&mut self, batch: Vec<SpanData>) -> BoxFuture<'static, ExportResult> {
        if self.is_shutdown.load(Ordering::SeqCst) {
            return Box::pin(std::future::ready(Err(TraceError::from("span exporter is shut down"))));
        }

        let result = batch
            .iter()
            .try_for_each(|span| self.file.write_line(&self.span_to_json(span).to_string()))
            .map_err(|e| TraceError::from(e.to_string()));
        Box::pin(std::future::ready(result))
    }

    fn shutdown(&mut self) {
        self.is_shutdown.store(true, Ordering::SeqCst);
    }
}

impl std::fmt::Debug for FileSpanExporter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FileSpanExporter")
            .field("file", &self.file)
            .field("service", &self.service)
            .field("is_shutdown", &self.is_shutdown)
            .finish()
    }
}

/// Builds a tracer provider exporting every span, as it ends, to `file`.
#[must_use]
pub fn create_tracer_provider(file: RotatingFile, service: &str) -> TracerProvider {
    let resource = Resource::new(vec![KeyValue::new("service.name", service.to_string())]);
    let exporter = FileSpanExporter::new(file, service);

    TracerProvider::builder()
        .with_config(opentelemetry_sdk::trace::Config::default().with_resource(resource))
        .with_simple_exporter(exporter)
        .build()
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::trace::{Tracer, TracerProvider as _};

    #[test]
    fn every_span_becomes_one_json_line() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("spans.jsonl");
        let provider = create_tracer_provider(RotatingFile::new(path.clone()), "eventscout-test");
        let tracer = provider.tracer("test");

        tracer.in_span("outer", |_cx| {
            tracer.in_span("inner", |_cx| {});
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        let spans: Vec<JsonValue> = contents
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect();

        assert_eq!(spans.len(), 2);
        assert_eq!(spans[0]["name"], "inner");
        assert_eq!(spans[1]["name"], "outer");
        assert_eq!(spans[0]["parentSpanId"], spans[1]["spanId"]);
        assert_eq!(spans[1]["parentSpanId"], JsonValue::Null);
        assert_eq!(spans[0]["service"], "eventscout-test");
    }

    #[test]
    fn attribute_values_keep_their_json_types() {
        assert_eq!(attribute_value(&Value::Bool(true)), json!(true));
        assert_eq!(attribute_value(&Value::I64(42)), json!(42));
        assert_eq!(attribute_value(&Value::from("İzmir")), json!("İzmir"));
    }
}
