//! CLI argument definitions using clap derive macros.

use std::path::PathBuf;

use clap::{ArgAction, Args, Parser, Subcommand, ValueHint};

/// Inspect charm metadata and the events generated from it.
#[derive(Debug, Parser)]
#[command(
    name = "charm",
    author,
    version,
    about,
    long_about = None,
    propagate_version = true,
    arg_required_else_help = true
)]
pub struct Cli {
    /// Increase verbosity level (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Output format
    #[arg(long, global = true, value_enum, default_value = "text")]
    pub format: OutputFormat,

    #[command(subcommand)]
    pub command: Command,
}

/// Output format selection
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List every event declaration and the relation and storage groupings
    Inspect(CharmDirArgs),

    /// Check that metadata.yaml parses into a valid charm
    Validate(CharmDirArgs),

    /// Fire events through an in-process observer engine
    Emit(EmitArgs),
}

#[derive(Debug, Args)]
pub struct CharmDirArgs {
    /// Charm directory (defaults to $JUJU_CHARM_DIR, then the current directory)
    #[arg(value_hint = ValueHint::DirPath)]
    pub dir: Option<PathBuf>,
}

#[derive(Debug, Args)]
pub struct EmitArgs {
    /// Event keys to fire, in order
    #[arg(required = true)]
    pub keys: Vec<String>,

    /// Charm directory (defaults to $JUJU_CHARM_DIR, then the current directory)
    #[arg(short = 'd', long = "dir", value_hint = ValueHint::DirPath)]
    pub dir: Option<PathBuf>,

    /// Handle path of the charm instance
    #[arg(long, default_value = charm_events::DEFAULT_CHARM_KEY)]
    pub handle: String,
}
