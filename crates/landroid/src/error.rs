//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` variants into user-facing errors with
//! actionable help text.

use miette::Diagnostic;
use thiserror::Error;

use landroid_config::ConfigError;
use landroid_core::CoreError;

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const CONFIG: i32 = 3;
    pub const NOT_FOUND: i32 = 4;
    pub const INVALID_INPUT: i32 = 5;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Snapshot input ───────────────────────────────────────────────

    #[error("No entity snapshot given")]
    #[diagnostic(
        code(landroid::no_snapshot),
        help(
            "Pass a host state object with --snapshot <FILE> (or '-' for stdin),\n\
             or set LANDROID_SNAPSHOT."
        )
    )]
    NoSnapshot,

    #[error("Could not read snapshot {path}")]
    #[diagnostic(code(landroid::snapshot_read))]
    SnapshotRead {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed entity snapshot: {reason}")]
    #[diagnostic(
        code(landroid::snapshot_invalid),
        help("Expected a JSON object with 'entity_id', 'state' and 'attributes'.")
    )]
    InvalidSnapshot { reason: String },

    // ── Card input ───────────────────────────────────────────────────

    #[error("Unknown action '{name}'")]
    #[diagnostic(code(landroid::unknown_action), help("Known actions: {available}"))]
    UnknownAction { name: String, available: String },

    #[error("Unknown menu '{name}'")]
    #[diagnostic(code(landroid::unknown_menu), help("Known menus: {available}"))]
    UnknownMenu { name: String, available: String },

    #[error("Menu '{menu}' has no option '{option}'")]
    #[diagnostic(
        code(landroid::invalid_option),
        help("Run: landroid menu {menu} to see its options")
    )]
    InvalidOption { menu: String, option: String },

    #[error("Invalid service '{service}'")]
    #[diagnostic(
        code(landroid::invalid_service),
        help("Services are written as '<domain>.<service>', e.g. 'script.mow_front'.")
    )]
    InvalidService { service: String },

    // ── Validation ───────────────────────────────────────────────────

    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(landroid::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────

    #[error("{message}")]
    #[diagnostic(
        code(landroid::missing_entity),
        help(
            "Set one with: landroid config set entity vacuum.<name>\n\
             Or pass --entity, or a snapshot with an entity_id."
        )
    )]
    MissingEntity { message: String },

    #[error("Configuration file already exists at {path}")]
    #[diagnostic(
        code(landroid::config_exists),
        help("Use --force to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(code(landroid::config))]
    Config(Box<figment::Error>),

    #[error("Failed to write configuration: {reason}")]
    #[diagnostic(code(landroid::config_write))]
    ConfigWrite { reason: String },

    // ── IO / Serialization ────────────────────────────────────────────

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    #[diagnostic(code(landroid::json))]
    Json(#[from] serde_json::Error),
}

impl From<figment::Error> for CliError {
    fn from(err: figment::Error) -> Self {
        Self::Config(Box::new(err))
    }
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::NoSnapshot | Self::SnapshotRead { .. } => exit_code::NOT_FOUND,
            Self::InvalidSnapshot { .. } | Self::Json(_) => exit_code::INVALID_INPUT,
            Self::UnknownAction { .. }
            | Self::UnknownMenu { .. }
            | Self::InvalidOption { .. }
            | Self::Validation { .. } => exit_code::USAGE,
            Self::MissingEntity { .. }
            | Self::ConfigExists { .. }
            | Self::Config(_)
            | Self::ConfigWrite { .. }
            | Self::InvalidService { .. } => exit_code::CONFIG,
            Self::Io(_) => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::UnknownAction { name } => CliError::UnknownAction {
                name,
                available: known_actions(),
            },

            CoreError::UnknownMenu { name } => CliError::UnknownMenu {
                name,
                available: known_menus(),
            },

            CoreError::InvalidOption { menu, option } => CliError::InvalidOption { menu, option },

            CoreError::InvalidService { service } => CliError::InvalidService { service },

            CoreError::Snapshot(source) => CliError::InvalidSnapshot {
                reason: source.to_string(),
            },
        }
    }
}

// ── ConfigError → CliError mapping ───────────────────────────────────

impl From<ConfigError> for CliError {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::MissingEntity { message } => CliError::MissingEntity { message },
            ConfigError::Validation { field, reason } => CliError::Validation { field, reason },
            ConfigError::Figment(inner) => CliError::Config(inner),
            ConfigError::Serialization(e) => CliError::ConfigWrite {
                reason: e.to_string(),
            },
            ConfigError::Io(e) => CliError::Io(e),
        }
    }
}

fn known_actions() -> String {
    use strum::IntoEnumIterator;
    landroid_core::Action::iter()
        .map(|a| a.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

fn known_menus() -> String {
    use strum::IntoEnumIterator;
    landroid_core::MenuKind::iter()
        .map(|m| m.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}
