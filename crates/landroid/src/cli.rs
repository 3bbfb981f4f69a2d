//! Clap derive structures for the `landroid` CLI.
//!
//! Defines the command tree, global flags, and shared types. Kept free of
//! workspace crates so `build.rs` can include it for man page generation.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// landroid -- render Landroid mower snapshots like the dashboard card
#[derive(Debug, Parser)]
#[command(
    name = "landroid",
    version,
    about = "Render Landroid mower entity snapshots like the dashboard card",
    long_about = "Reads a host entity snapshot (JSON state object with attributes) and\n\
        renders it the way the Landroid dashboard card does: canonical fields,\n\
        localized values, status line, icons, menus, toolbar and service calls.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Entity snapshot JSON file ("-" for stdin)
    #[arg(long, short = 's', env = "LANDROID_SNAPSHOT", global = true)]
    pub snapshot: Option<PathBuf>,

    /// Config file (defaults to the platform config directory)
    #[arg(long, env = "LANDROID_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Mower entity id (overrides config and snapshot)
    #[arg(long, short = 'e', global = true)]
    pub entity: Option<String>,

    /// Display language tag, e.g. "de" or "en-GB"
    #[arg(long, short = 'l', env = "LANDROID_LANGUAGE", global = true)]
    pub language: Option<String>,

    /// Unit system for distances and temperatures
    #[arg(long, short = 'u', global = true)]
    pub units: Option<UnitsArg>,

    /// Offset from UTC for timestamps, in minutes
    #[arg(long, global = true, allow_negative_numbers = true)]
    pub utc_offset: Option<i32>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "LANDROID_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,
}

// ── Output & Color Enums ─────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum UnitsArg {
    /// Kilometers and degrees Celsius
    Metric,
    /// Miles and degrees Fahrenheit
    Imperial,
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the normalized mower view and status line
    #[command(alias = "view")]
    Show(ShowArgs),

    /// Format one value as the card would display it
    #[command(alias = "fmt")]
    Format(FormatArgs),

    /// List known field names and their formatting category
    Fields,

    /// Show the icon table for the snapshot's state
    Icons,

    /// Show toolbar buttons for the snapshot's state
    #[command(alias = "tb")]
    Toolbar(ToolbarArgs),

    /// Show a list menu, or the event for picking one of its options
    Menu(MenuArgs),

    /// Show the service call the card makes for an action
    #[command(alias = "svc")]
    Service(ServiceArgs),

    /// Manage card configuration
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  VIEW
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ShowArgs {
    /// Show raw canonical values instead of formatted ones
    #[arg(long)]
    pub raw: bool,

    /// Only show these fields
    #[arg(long, short = 'f', value_delimiter = ',')]
    pub fields: Vec<String>,
}

#[derive(Debug, Args)]
pub struct FormatArgs {
    /// Canonical field name, e.g. "battery_level" or "distance"
    pub field: String,

    /// Value as JSON; anything that is not valid JSON is taken as a string
    #[arg(allow_hyphen_values = true)]
    pub value: Option<String>,
}

#[derive(Debug, Args)]
pub struct ToolbarArgs {
    /// Show the config bar toggles instead
    #[arg(long)]
    pub configbar: bool,
}

#[derive(Debug, Args)]
pub struct MenuArgs {
    /// Menu name: battery, blades, delay, rssi, stats, zone
    pub kind: String,

    /// Option to pick; prints the resulting event
    #[arg(long)]
    pub select: Option<String>,
}

#[derive(Debug, Args)]
pub struct ServiceArgs {
    /// Card action, e.g. "start", "return_to_base", "partymode"
    pub action: String,

    /// Extra service data as key=value (value parsed as JSON when possible)
    #[arg(long, short = 'd', value_name = "KEY=VALUE")]
    pub data: Vec<String>,

    /// Mark the call as a plain toggle without progress indicator
    #[arg(long)]
    pub no_request: bool,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Write a starting config for the first vacuum entity given
    Init {
        /// Candidate entity ids; defaults to the snapshot's entity
        #[arg(value_name = "ENTITY")]
        entities: Vec<String>,

        /// Overwrite an existing config file
        #[arg(long)]
        force: bool,
    },

    /// Display current resolved configuration
    Show,

    /// Print the config file path
    Path,

    /// Set a configuration value
    Set {
        /// Config key, e.g. "entity", "compact_view", "language", "units"
        key: String,

        /// Value to set
        value: String,
    },

    /// Check the card configuration and print derived settings
    Validate,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
