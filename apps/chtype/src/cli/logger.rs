//! # Logger Module
//!
//! Logging is built on `tracing-subscriber` layers:
//! - **EnvFilter Layer**: `RUST_LOG` module-level filtering, falling back to the configured level
//! - **Format Layer**: either the line format below or tracing's native formatter
//!
//! Logs always go to stderr so that stdout only carries command output.
//!
//! ## Line format (default)
//! - Text: `[timestamp LEVEL - target] message key=value`
//! - JSON: `{"timestamp": "...", "severity": "INFO", "target": "...", "message": "..."}`
//!
//! ## Environment Variables
//!
//! - `RUST_LOG`: Standard Rust log filtering (e.g. `RUST_LOG=clickhouse_types=trace`)
//! - `CHTYPE_LOGGER__LEVEL`: Log level (DEBUG, INFO, WARN, ERROR)
//! - `CHTYPE_LOGGER__FORMAT`: Text or Json (default: Text)
//! - `CHTYPE_LOGGER__USE_TRACING_FORMAT`: use tracing-subscriber's native format (default: `false`)

use serde::Deserialize;
use std::fmt;
use std::io::Write;
use std::time::SystemTime;
use tracing::field::{Field, Visit};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::filter::LevelFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, SubscriberExt};
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub enum LoggerLevel {
    #[serde(alias = "DEBUG", alias = "debug")]
    Debug,
    #[serde(alias = "INFO", alias = "info")]
    Info,
    #[serde(alias = "WARN", alias = "warn")]
    Warn,
    #[serde(alias = "ERROR", alias = "error")]
    Error,
}

impl LoggerLevel {
    pub fn to_tracing_level(&self) -> LevelFilter {
        match self {
            LoggerLevel::Debug => LevelFilter::DEBUG,
            LoggerLevel::Info => LevelFilter::INFO,
            LoggerLevel::Warn => LevelFilter::WARN,
            LoggerLevel::Error => LevelFilter::ERROR,
        }
    }
}

#[derive(Deserialize, Debug, Clone, PartialEq)]
pub enum LogFormat {
    #[serde(alias = "json", alias = "JSON")]
    Json,
    #[serde(alias = "text", alias = "TEXT")]
    Text,
}

#[derive(Deserialize, Debug, Clone)]
pub struct LoggerSettings {
    #[serde(default = "default_log_level")]
    pub level: LoggerLevel,

    #[serde(default = "default_log_format")]
    pub format: LogFormat,

    #[serde(default)]
    pub use_tracing_format: bool,
}

fn default_log_level() -> LoggerLevel {
    LoggerLevel::Warn
}

fn default_log_format() -> LogFormat {
    LogFormat::Text
}

impl Default for LoggerSettings {
    fn default() -> Self {
        LoggerSettings {
            level: default_log_level(),
            format: default_log_format(),
            use_tracing_format: false,
        }
    }
}

#[derive(thiserror::Error, Debug)]
pub enum LoggerError {
    #[error("Failed to install the global log subscriber: {0}")]
    Init(#[from] tracing_subscriber::util::TryInitError),
}

/// Layer writing one line per event in the text or JSON line format
struct LineFormatLayer<W> {
    writer: W,
    format: LogFormat,
}

impl<W> LineFormatLayer<W> {
    fn new(writer: W, format: LogFormat) -> Self {
        Self { writer, format }
    }

    fn format_text(&self, level: &Level, target: &str, visitor: &MessageVisitor) -> String {
        let mut line = format!(
            "[{} {} - {}] {}",
            humantime::format_rfc3339_seconds(SystemTime::now()),
            level,
            target,
            visitor.message
        );
        for (name, value) in &visitor.fields {
            line.push_str(&format!(" {name}={value}"));
        }
        line
    }

    fn format_json(&self, level: &Level, target: &str, visitor: &MessageVisitor) -> String {
        let mut log_json = serde_json::json!({
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "severity": level.to_string(),
            "target": target,
            "message": visitor.message,
        });

        for (name, value) in &visitor.fields {
            log_json[name.as_str()] = serde_json::Value::String(value.clone());
        }

        serde_json::to_string(&log_json)
            .expect("formatting `serde_json::Value` with string keys never fails")
    }
}

impl<S, W> Layer<S> for LineFormatLayer<W>
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    W: for<'writer> MakeWriter<'writer> + 'static,
{
    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = metadata.level();
        let target = metadata.target();

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);

        let output = if self.format == LogFormat::Text {
            self.format_text(level, target, &visitor)
        } else {
            self.format_json(level, target, &visitor)
        };

        let mut writer = self.writer.make_writer();
        let _ = writer.write_all(output.as_bytes());
        let _ = writer.write_all(b"\n");
    }
}

#[derive(Default)]
struct MessageVisitor {
    message: String,
    fields: Vec<(String, String)>,
}

impl Visit for MessageVisitor {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        } else {
            self.fields
                .push((field.name().to_string(), value.to_string()));
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        let formatted = format!("{:?}", value);
        if field.name() == "message" {
            self.message = formatted;
        } else {
            self.fields.push((field.name().to_string(), formatted));
        }
    }
}

pub fn setup_logging(settings: &LoggerSettings) -> Result<(), LoggerError> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(settings.level.to_tracing_level().to_string()));

    if settings.use_tracing_format {
        let format_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(true)
            .with_level(true);

        if settings.format == LogFormat::Json {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(format_layer.json())
                .try_init()?;
        } else {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(format_layer.compact())
                .try_init()?;
        }
    } else {
        let line_layer = LineFormatLayer::new(std::io::stderr, settings.format.clone());

        tracing_subscriber::registry()
            .with(env_filter)
            .with(line_layer)
            .try_init()?;
    }

    Ok(())
}
