#[macro_use]
pub(crate) mod display;

mod commands;
pub mod logger;
pub mod routines;
pub mod settings;

use clap::Parser;
use commands::Commands;
use routines::render::OutputFormat;
use routines::{
    parse_schema_routine, parse_type_routine, split_routine, RoutineFailure, RoutineSuccess,
};
use settings::Settings;
use tracing::info;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None, arg_required_else_help(true))]
pub struct Cli {
    /// Turn debugging information on
    #[arg(short, long, global = true)]
    pub debug: bool,

    /// Output format, overriding the configured one
    #[arg(long, global = true, value_enum)]
    pub format: Option<OutputFormat>,

    /// Disable colors in status messages
    #[arg(long, global = true)]
    pub no_ansi: bool,

    #[command(subcommand)]
    pub command: Commands,
}

pub fn top_command_handler(
    settings: &Settings,
    cli: &Cli,
) -> Result<RoutineSuccess, RoutineFailure> {
    match &cli.command {
        Commands::Type { type_string } => {
            info!("Running type command");
            let format = cli.format.unwrap_or(settings.output.format);
            let output = parse_type_routine(type_string, format)?;
            println!("{output}");
            Ok(RoutineSuccess::silent())
        }
        Commands::Schema { fields } => {
            info!("Running schema command");
            // Configured format only applies when set explicitly, the table is the default view
            let format = cli.format.or_else(|| {
                (settings.output.format != OutputFormat::default())
                    .then_some(settings.output.format)
            });
            let (output, status) = parse_schema_routine(fields, format)?;
            println!("{output}");
            Ok(status)
        }
        Commands::Split { text, arity } => {
            info!("Running split command");
            let (output, status) = split_routine(text, *arity)?;
            println!("{output}");
            Ok(status)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from(["chtype", "type", "UInt8", "--format", "json"]).unwrap();
        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert!(matches!(cli.command, Commands::Type { ref type_string } if type_string == "UInt8"));
    }

    #[test]
    fn test_split_arity_flag() {
        let cli = Cli::try_parse_from(["chtype", "split", "3,'UTC'", "--arity", "2"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Split { arity: Some(2), .. }
        ));
    }
}
