#[macro_use]
mod cli;

use std::process::ExitCode;

use clap::Parser;
use cli::display::{Message, MessageType};
use cli::logger::LoggerLevel;

// Entry point for the CLI application
fn main() -> ExitCode {
    // Parse CLI arguments, clap prints help, version and usage errors itself
    let cli_result = cli::Cli::parse();

    let mut settings = match cli::settings::read_settings() {
        Ok(settings) => settings,
        Err(e) => {
            show_message!(
                MessageType::Error,
                Message {
                    action: "Config".to_string(),
                    details: match cli::settings::config_path() {
                        Some(path) => format!("Failed to read {}: {e}", path.display()),
                        None => format!("Failed to read settings: {e}"),
                    },
                }
            );
            return ExitCode::from(1);
        }
    };

    if cli_result.debug {
        settings.logger.level = LoggerLevel::Debug;
    }
    cli::display::set_no_ansi(cli_result.no_ansi || settings.output.no_ansi);

    if let Err(e) = cli::logger::setup_logging(&settings.logger) {
        eprintln!("{e}");
    }

    match cli::top_command_handler(&settings, &cli_result) {
        Ok(success) => {
            success.show();
            ExitCode::from(0)
        }
        Err(failure) => {
            show_message!(failure.message_type, failure.message);
            if let Some(err) = failure.error {
                tracing::debug!("{err:?}");
            }
            ExitCode::from(1)
        }
    }
}
