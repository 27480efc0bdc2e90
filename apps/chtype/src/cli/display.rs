//! User-facing status messages.
//!
//! Command output (parsed types, tables, JSON) goes to stdout untouched; status
//! messages are rendered through [`show_message!`] and always written to stderr,
//! so piping a command's output never picks up a status line.

pub mod terminal;

use std::io::stderr;
use std::sync::atomic::{AtomicBool, Ordering};

use terminal::{write_styled_line_to, StyledText};

static NO_ANSI: AtomicBool = AtomicBool::new(false);

/// Disables color codes for every following message
pub fn set_no_ansi(no_ansi: bool) {
    NO_ANSI.store(no_ansi, Ordering::Relaxed);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageType {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub action: String,
    pub details: String,
}

impl Message {
    pub fn new(action: String, details: String) -> Self {
        Self { action, details }
    }

    pub fn is_empty(&self) -> bool {
        self.action.is_empty() && self.details.is_empty()
    }
}

fn styled_action(message_type: MessageType, action: &str) -> StyledText {
    let styled = StyledText::from_str(action);
    match message_type {
        MessageType::Success => styled.green().bold(),
        MessageType::Error => styled.red().bold(),
    }
}

pub fn show_message_wrapper(message_type: MessageType, message: Message) {
    let styled = styled_action(message_type, &message.action);
    let no_ansi = NO_ANSI.load(Ordering::Relaxed);

    if let Err(e) = write_styled_line_to(&mut stderr(), &styled, &message.details, no_ansi) {
        tracing::warn!("Failed to write message to terminal: {e}");
    }
}

macro_rules! show_message {
    ($message_type:expr, $message:expr) => {
        $crate::cli::display::show_message_wrapper($message_type, $message)
    };
}
