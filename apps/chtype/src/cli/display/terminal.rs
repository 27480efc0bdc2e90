//! Styled terminal output.
//!
//! Messages are printed as a right-aligned, colored action column followed by the
//! message details, e.g. `          Parse Malformed ClickHouse type ...`.

use crossterm::{
    execute,
    style::{Attribute, Color, Print, ResetColor, SetAttribute, SetForegroundColor},
};
use std::io::{Result as IoResult, Write};

/// Width of the action column in terminal output
pub const ACTION_WIDTH: usize = 15;

/// Builder for colored, optionally bold action text
#[derive(Debug, Clone, PartialEq)]
pub struct StyledText {
    text: String,
    foreground: Option<Color>,
    bold: bool,
}

impl StyledText {
    pub fn new(text: String) -> Self {
        Self {
            text,
            foreground: None,
            bold: false,
        }
    }

    pub fn from_str(text: &str) -> Self {
        Self::new(text.to_string())
    }

    pub fn green(mut self) -> Self {
        self.foreground = Some(Color::Green);
        self
    }

    pub fn red(mut self) -> Self {
        self.foreground = Some(Color::Red);
        self
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }
}

/// Writes one action line to `writer`.
///
/// The action is truncated or left-padded to exactly [`ACTION_WIDTH`] characters.
/// With `no_ansi` set, no escape codes are emitted.
pub fn write_styled_line_to<W: Write>(
    writer: &mut W,
    styled_text: &StyledText,
    message: &str,
    no_ansi: bool,
) -> IoResult<()> {
    // Character-aware truncation so multi-byte actions never split a code point
    let truncated_action: String = styled_text.text.chars().take(ACTION_WIDTH).collect();
    let padded_action = format!("{truncated_action:>ACTION_WIDTH$}");

    if !no_ansi {
        if let Some(color) = styled_text.foreground {
            execute!(writer, SetForegroundColor(color))?;
        }
        if styled_text.bold {
            execute!(writer, SetAttribute(Attribute::Bold))?;
        }
    }

    execute!(writer, Print(&padded_action))?;

    if !no_ansi {
        execute!(writer, ResetColor)?;
        if styled_text.bold {
            execute!(writer, SetAttribute(Attribute::Reset))?;
        }
    }

    execute!(writer, Print(" "), Print(message), Print("\n"))?;

    Ok(())
}
