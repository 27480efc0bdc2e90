//! # Routines
//!
//! Each routine runs one command against the parser and returns the rendered
//! output, or a [`RoutineFailure`] carrying the message to show the user.

pub mod render;

use clickhouse_types::{parse_schema, parse_type, split_padded, split_top_level};
use tracing::debug;

use super::display::{self, Message, MessageType};
use render::{render_schema, render_type, OutputFormat};

#[derive(Debug, Clone)]
pub struct RoutineSuccess {
    pub message: Message,
    pub message_type: MessageType,
}

impl RoutineSuccess {
    pub fn success(message: Message) -> Self {
        Self {
            message,
            message_type: MessageType::Success,
        }
    }

    /// Success without a status line, for commands whose output is the result itself
    pub fn silent() -> Self {
        Self::success(Message::new(String::new(), String::new()))
    }

    pub fn show(&self) {
        if !self.message.is_empty() {
            display::show_message_wrapper(self.message_type, self.message.clone());
        }
    }
}

#[derive(Debug)]
pub struct RoutineFailure {
    pub message: Message,
    pub message_type: MessageType,
    pub error: Option<anyhow::Error>,
}

impl RoutineFailure {
    pub fn new<F: Into<anyhow::Error>>(message: Message, error: F) -> Self {
        Self {
            message,
            message_type: MessageType::Error,
            error: Some(error.into()),
        }
    }

    /// create a RoutineFailure error without an error
    pub fn error(message: Message) -> Self {
        Self {
            message,
            message_type: MessageType::Error,
            error: None,
        }
    }
}

fn render_failure(error: anyhow::Error) -> RoutineFailure {
    RoutineFailure::new(
        Message::new("Render".to_string(), "Failed to render output".to_string()),
        error,
    )
}

pub fn parse_type_routine(input: &str, format: OutputFormat) -> Result<String, RoutineFailure> {
    let node = parse_type(input).map_err(|e| {
        RoutineFailure::error(Message::new("Parse".to_string(), e.to_string()))
    })?;
    debug!(depth = node.depth(), "Parsed type {node}");

    render_type(&node, format).map_err(render_failure)
}

fn count(n: usize, noun: &str) -> String {
    if n == 1 {
        format!("1 {noun}")
    } else {
        format!("{n} {noun}s")
    }
}

/// Renders the parsed schema, with a status line reporting the field count
pub fn parse_schema_routine(
    input: &str,
    format: Option<OutputFormat>,
) -> Result<(String, RoutineSuccess), RoutineFailure> {
    let schema = parse_schema(input).map_err(|e| {
        RoutineFailure::error(Message::new("Parse".to_string(), e.to_string()))
    })?;

    let output = render_schema(&schema, format).map_err(render_failure)?;
    let status = RoutineSuccess::success(Message::new(
        "Parsed".to_string(),
        count(schema.len(), "field"),
    ));
    Ok((output, status))
}

/// Lists the segments the splitter produces, one per line.
///
/// Segments are quoted so empty and whitespace-only segments stay visible;
/// padding added by the fixed-arity split is shown as `<absent>`.
pub fn split_routine(
    text: &str,
    arity: Option<usize>,
) -> Result<(String, RoutineSuccess), RoutineFailure> {
    let lines: Vec<String> = match arity {
        None => split_top_level(text)
            .into_iter()
            .map(|segment| format!("{segment:?}"))
            .collect(),
        Some(arity) => split_padded(text, arity)
            .map_err(|e| RoutineFailure::error(Message::new("Split".to_string(), e.to_string())))?
            .into_iter()
            .map(|segment| match segment {
                Some(segment) => format!("{segment:?}"),
                None => "<absent>".to_string(),
            })
            .collect(),
    };

    let status = RoutineSuccess::success(Message::new(
        "Split".to_string(),
        count(lines.len(), "segment"),
    ));
    Ok((lines.join("\n"), status))
}
