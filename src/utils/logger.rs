use tracing::level_filters::LevelFilter;
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::fmt::format::Writer;
use tracing_subscriber::fmt::{FmtContext, FormatEvent, FormatFields};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use crate::config::LoggingConfig;
use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};
use tracing::field::{Field, Visit};

#[derive(Default)]
struct JsonFieldVisitor {
    fields: Map<String, Value>,
}

impl JsonFieldVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        self.fields.insert(field.name().to_string(), value);
    }
}

impl Visit for JsonFieldVisitor {
    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::from(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::from(value));
    }

    fn record_f64(&mut self, field: &Field, value: f64) {
        self.insert(field, Value::from(value));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        self.insert(field, Value::from(format!("{:?}", value)));
    }
}

/// One JSON object per event, shaped like an OpenTelemetry log record.
#[derive(Clone)]
struct OtelJsonEventFormatter {
    service_name: String,
    service_version: String,
}

impl OtelJsonEventFormatter {
    fn severity_number(level: &Level) -> u64 {
        match *level {
            Level::TRACE => 1,
            Level::DEBUG => 5,
            Level::INFO => 9,
            Level::WARN => 13,
            Level::ERROR => 17,
        }
    }

    fn record(&self, level: &Level, target: &str, name: &str, mut attributes: Map<String, Value>) -> Value {
        if let Some(v) = attributes.remove("event_name") {
            attributes.insert("event.name".to_string(), v);
        }
        if let Some(v) = attributes.remove("event_domain") {
            attributes.insert("event.domain".to_string(), v);
        }
        attributes.insert("code.target".to_string(), Value::from(target));

        let body = attributes
            .remove("message")
            .and_then(|v| v.as_str().map(str::to_string))
            .unwrap_or_else(|| name.to_string());

        let mut resource = Map::new();
        resource.insert(
            "service.name".to_string(),
            Value::from(self.service_name.clone()),
        );
        resource.insert(
            "service.version".to_string(),
            Value::from(self.service_version.clone()),
        );

        let mut root = Map::new();
        root.insert(
            "timestamp".to_string(),
            Value::from(Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)),
        );
        root.insert("severity_text".to_string(), Value::from(level.as_str()));
        root.insert(
            "severity_number".to_string(),
            Value::from(Self::severity_number(level)),
        );
        root.insert("body".to_string(), Value::from(body));
        root.insert("resource".to_string(), Value::Object(resource));
        root.insert("attributes".to_string(), Value::Object(attributes));
        Value::Object(root)
    }
}

impl<S, N> FormatEvent<S, N> for OtelJsonEventFormatter
where
    S: Subscriber + for<'lookup> LookupSpan<'lookup>,
    N: for<'writer> FormatFields<'writer> + 'static,
{
    fn format_event(
        &self,
        _ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let metadata = event.metadata();
        let mut visitor = JsonFieldVisitor::default();
        event.record(&mut visitor);

        let mut attributes = visitor.fields;
        if let Some(file) = metadata.file() {
            attributes.insert("code.filepath".to_string(), Value::from(file));
        }
        if let Some(line) = metadata.line() {
            attributes.insert("code.lineno".to_string(), Value::from(line));
        }

        let json = self.record(
            metadata.level(),
            metadata.target(),
            metadata.name(),
            attributes,
        );
        let serialized = serde_json::to_string(&json).map_err(|_| std::fmt::Error)?;
        writer.write_str(&serialized)?;
        writer.write_char('\n')?;
        Ok(())
    }
}

/// Parse a logging level name ("trace" .. "error").
pub fn parse_level(level: &str) -> Result<LevelFilter, String> {
    match level.trim().to_lowercase().as_str() {
        "trace" => Ok(LevelFilter::TRACE),
        "debug" => Ok(LevelFilter::DEBUG),
        "info" => Ok(LevelFilter::INFO),
        "warn" => Ok(LevelFilter::WARN),
        "error" => Ok(LevelFilter::ERROR),
        _ => Err(format!(
            "Invalid logging.level '{}'. Valid values: trace, debug, info, warn, error",
            level
        )),
    }
}

/// Install the global subscriber. Logs go to stderr so rendered pages on
/// stdout stay clean.
pub fn init_logging(logging_config: &LoggingConfig) -> Result<(), String> {
    let level_filter = parse_level(&logging_config.level)?;

    // RUST_LOG directives still apply on top of the configured default.
    let filter_layer = EnvFilter::builder()
        .with_default_directive(level_filter.into())
        .from_env_lossy();

    let result = match logging_config.format.to_lowercase().as_str() {
        "json" => tracing_subscriber::registry()
            .with(filter_layer)
            .with(
                fmt::layer()
                    .with_writer(std::io::stderr)
                    .event_format(OtelJsonEventFormatter {
                        service_name: logging_config.service_name.clone(),
                        service_version: logging_config.service_version.clone(),
                    }),
            )
            .try_init(),
        // "console" and anything unknown
        _ => tracing_subscriber::registry()
            .with(filter_layer)
            .with(fmt::layer().with_writer(std::io::stderr).pretty())
            .try_init(),
    };

    result.map_err(|e| format!("Failed to install logger: {}", e))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_level() {
        assert_eq!(parse_level("INFO").unwrap(), LevelFilter::INFO);
        assert_eq!(parse_level(" debug ").unwrap(), LevelFilter::DEBUG);
        assert!(parse_level("loud").is_err());
    }

    #[test]
    fn test_otel_record_renames_event_fields() {
        let formatter = OtelJsonEventFormatter {
            service_name: "authdemo".to_string(),
            service_version: "0.1.0".to_string(),
        };
        let mut attributes = Map::new();
        attributes.insert("event_name".to_string(), Value::from("session.resolve.done"));
        attributes.insert("event_domain".to_string(), Value::from("session"));
        attributes.insert("message".to_string(), Value::from("session resolved"));

        let record = formatter.record(&Level::WARN, "authdemo::session", "event", attributes);
        assert_eq!(record["severity_text"], "WARN");
        assert_eq!(record["severity_number"], 13);
        assert_eq!(record["body"], "session resolved");
        assert_eq!(record["attributes"]["event.name"], "session.resolve.done");
        assert_eq!(record["attributes"]["event.domain"], "session");
        assert!(record["attributes"].get("event_name").is_none());
        assert_eq!(record["resource"]["service.name"], "authdemo");
    }
}
