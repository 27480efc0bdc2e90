//! # CLI Commands
//! A module for all the commands that can be run from the CLI

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Parse a single ClickHouse type string, e.g. 'Nullable(Array(Decimal(18, 4)))'
    Type {
        /// The type string to parse
        type_string: String,
    },
    /// Parse a column list, e.g. 'id UInt64, name String, tags Array(String)'
    Schema {
        /// Comma separated `name Type` pairs, optionally wrapped in parentheses
        fields: String,
    },
    /// Show how a parameter list is split into segments
    Split {
        /// The parameter text, without the enclosing parentheses
        text: String,

        /// Split on every comma and pad to this many segments instead of
        /// splitting only at the top nesting level
        #[arg(long)]
        arity: Option<usize>,
    },
}
