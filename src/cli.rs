//! CLI definitions for reaction-export
//!
//! The default invocation runs an export; `config` and `completions` are
//! auxiliary subcommands.

use clap::builder::styling::{AnsiColor, Effects, Styles};
use clap::{Args, Parser, Subcommand};
use clap_complete::Shell as CompletionShell;
use std::path::PathBuf;

/// Version string shown by `--version`.
#[cfg(not(feature = "release"))]
pub const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("VERGEN_GIT_SHA"), ")");
#[cfg(feature = "release")]
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build clap styles.
///
/// - Green: headers, usage, command names
/// - White: placeholders and valid values
pub fn build_cli_styles() -> Styles {
    Styles::styled()
        .header(AnsiColor::Green.on_default() | Effects::BOLD)
        .usage(AnsiColor::Green.on_default() | Effects::BOLD)
        .literal(AnsiColor::Green.on_default())
        .placeholder(AnsiColor::White.on_default())
        .valid(AnsiColor::White.on_default())
        .invalid(AnsiColor::Red.on_default())
        .error(AnsiColor::Red.on_default() | Effects::BOLD)
}

#[derive(Parser)]
#[command(name = "reaction-export")]
#[command(about = "Export emoji reactions from a Zulip realm as CSV")]
#[command(
    long_about = "Export emoji reactions from a Zulip realm as CSV.

Walks the message history selected by a narrow (search filter) from the
oldest message to the newest and writes one line per reaction:

    channel,sender,reactor,reaction,timestamp

The timestamp is the message's unix time. Progress is reported on stderr,
so stdout can be redirected straight into a file.

EXAMPLES:
    reaction-export ~/zuliprc > reactions.csv
    reaction-export ~/zuliprc --narrow 'stream:general has:reaction'
    reaction-export ~/zuliprc --chunk-size 200 --no-header -o out.csv

Defaults for the options can be stored in
~/.config/reaction-export/config.toml (see 'reaction-export config show')."
)]
#[command(version = VERSION)]
#[command(styles = build_cli_styles())]
#[command(args_conflicts_with_subcommands = true, subcommand_negates_reqs = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[command(flatten)]
    pub export: ExportArgs,
}

/// Options of an export run.
#[derive(Args, Debug, Clone, Default)]
pub struct ExportArgs {
    /// zuliprc file to use to connect
    #[arg(required = true, value_name = "ZULIPRC")]
    pub zuliprc: Option<PathBuf>,

    /// Select messages based on this narrow (search filter)
    #[arg(
        long,
        value_name = "NARROW",
        long_help = "Select messages based on this narrow (search filter).

The value is split on whitespace, then each term on its first ':' to build
the operator/operand pairs sent to the server. Include 'streams:' or
'stream:' to search all history, not only the API user's. Use 'search:TERM'
for full-text search; servers newer than 9.0 also accept 'has:reaction'.

[default: streams:public]"
    )]
    pub narrow: Option<String>,

    /// Messages per request [default: 1000]
    #[arg(long, value_name = "N")]
    pub chunk_size: Option<u32>,

    /// Don't print the CSV header line
    #[arg(long)]
    pub no_header: bool,

    /// Write each page as soon as it is fetched (newest page first)
    #[arg(
        long,
        long_help = "Write each page as soon as it is fetched instead of holding records back
until the walk is complete. Records are ascending within a page, but pages
come out newest first, so the file as a whole is not in time order."
    )]
    pub stream: bool,

    /// Also resolve names of subscribed (e.g. private) channels
    #[arg(long)]
    pub include_subscribed: bool,

    /// Write CSV to this file instead of stdout
    #[arg(long, short, value_name = "FILE")]
    pub output: Option<PathBuf>,

    /// Be more verbose (on stderr)
    #[arg(long, short)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Configuration management
    #[command(
        subcommand,
        long_about = "View and edit the reaction-export configuration file.

Configuration is stored in ~/.config/reaction-export/config.toml and holds
defaults for the narrow, chunk size, header and HTTP settings.

EXAMPLES:
    reaction-export config show      Display current configuration
    reaction-export config path      Print the config file location
    reaction-export config edit      Open config in $EDITOR"
    )]
    Config(ConfigCommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: CompletionShell,
    },
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current configuration as TOML
    Show,
    /// Print the configuration file path
    Path,
    /// Open configuration file in your default editor
    #[command(long_about = "Open the configuration file in your default editor.

Uses the $EDITOR environment variable (defaults to 'vi').
Config file location: ~/.config/reaction-export/config.toml

EXAMPLE:
    EDITOR=nano reaction-export config edit")]
    Edit,
}
