//! Card configuration for the Landroid card tools.
//!
//! A TOML file with a `[card]` table (the options the dashboard card
//! accepts) and a `[display]` table (language, units and clock offset used
//! when rendering). Loaded by layering defaults, the file and `LANDROID_*`
//! environment variables with figment. The CLI adds flag overrides on top.

use std::path::{Path, PathBuf};
use std::time::Duration;

use chrono::FixedOffset;
use directories::ProjectDirs;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use landroid_core::command::requests::{CustomAction, Shortcut};
use landroid_core::format::{Formatter, UnitSystem, resolve_language};
use landroid_core::i18n::{Localize, Translations};
use landroid_core::model::DEFAULT_IMAGE;

/// Seconds between camera thumbnail refreshes when none is configured.
pub const DEFAULT_CAMERA_REFRESH_SECS: u64 = 5;

const COMPACT_CARD_SIZE: u8 = 3;
const FULL_CARD_SIZE: u8 = 8;
const MAX_UTC_OFFSET_MINUTES: i32 = 18 * 60;

// ── Error ───────────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("{message}")]
    MissingEntity { message: String },

    #[error("invalid {field}: {reason}")]
    Validation { field: String, reason: String },

    #[error("failed to serialize config: {0}")]
    Serialization(#[from] toml::ser::Error),

    #[error("config loading failed: {0}")]
    Figment(Box<figment::Error>),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        Self::Figment(Box::new(err))
    }
}

// ── TOML config structs ─────────────────────────────────────────────

/// Top-level TOML configuration.
#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub card: CardConfig,

    #[serde(default)]
    pub display: DisplayConfig,
}

/// Action overrides as configured. The list form is from an older card
/// release; it is accepted and ignored.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ActionsSetting {
    Mapping(IndexMap<String, CustomAction>),
    List(Vec<serde_json::Value>),
}

/// Options of the dashboard card.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct CardConfig {
    /// The mower entity, e.g. `vacuum.landroid`.
    pub entity: Option<String>,

    /// Camera entity shown instead of the illustration.
    pub camera: Option<String>,

    /// Image path, or `default` for the bundled illustration.
    pub image: Option<String>,

    #[serde(default = "yes")]
    pub show_animation: bool,

    #[serde(default)]
    pub compact_view: bool,

    #[serde(default = "yes")]
    pub show_name: bool,

    #[serde(default = "yes")]
    pub show_status: bool,

    #[serde(default = "yes")]
    pub show_configbar: bool,

    #[serde(default = "yes")]
    pub show_toolbar: bool,

    /// Camera thumbnail refresh interval in seconds.
    pub camera_refresh: Option<u64>,

    /// Per-action service overrides.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actions: Option<ActionsSetting>,

    /// Extra toolbar buttons.
    #[serde(default)]
    pub shortcuts: Vec<Shortcut>,
}

fn yes() -> bool {
    true
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            entity: None,
            camera: None,
            image: None,
            show_animation: true,
            compact_view: false,
            show_name: true,
            show_status: true,
            show_configbar: true,
            show_toolbar: true,
            camera_refresh: None,
            actions: None,
            shortcuts: Vec::new(),
        }
    }
}

impl CardConfig {
    /// Reject configurations the card cannot render.
    ///
    /// A missing entity is an error. A list-shaped `actions` value only
    /// logs a warning.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.entity()?;
        if matches!(self.actions, Some(ActionsSetting::List(_))) {
            warn!(
                "{}",
                Translations::default().localize_or(
                    "warning.actions_array",
                    "'actions' given as a list is ignored"
                )
            );
        }
        Ok(())
    }

    /// The configured entity id.
    pub fn entity(&self) -> Result<&str, ConfigError> {
        self.entity
            .as_deref()
            .map(str::trim)
            .filter(|e| !e.is_empty())
            .ok_or_else(|| ConfigError::MissingEntity {
                message: Translations::default()
                    .localize_or("error.missing_entity", "Specifying an entity is required!"),
            })
    }

    /// Dashboard grid rows taken by the card.
    pub fn card_size(&self) -> u8 {
        if self.compact_view {
            COMPACT_CARD_SIZE
        } else {
            FULL_CARD_SIZE
        }
    }

    /// The image to show. `default` and unset both mean the bundled asset.
    pub fn image(&self) -> &str {
        match self.image.as_deref() {
            None | Some("" | "default") => DEFAULT_IMAGE,
            Some(image) => image,
        }
    }

    /// Thumbnail refresh interval. Zero is treated as unset.
    pub fn camera_refresh(&self) -> Duration {
        let secs = self
            .camera_refresh
            .filter(|s| *s > 0)
            .unwrap_or(DEFAULT_CAMERA_REFRESH_SECS);
        Duration::from_secs(secs)
    }

    /// Whether the camera thumbnail refresh timer runs at all.
    pub fn refreshes_camera(&self) -> bool {
        !self.compact_view && self.camera.as_deref().is_some_and(|c| !c.is_empty())
    }

    /// Action overrides keyed by action name.
    pub fn action_overrides(&self) -> IndexMap<String, CustomAction> {
        match &self.actions {
            Some(ActionsSetting::Mapping(map)) => map.clone(),
            Some(ActionsSetting::List(_)) | None => IndexMap::new(),
        }
    }
}

/// A starting configuration: the first `vacuum.` entity and the bundled
/// image.
pub fn stub_config<'a>(entities: impl IntoIterator<Item = &'a str>) -> CardConfig {
    let entity = entities
        .into_iter()
        .find(|id| id.split_once('.').is_some_and(|(domain, _)| domain == "vacuum"))
        .unwrap_or_default();
    CardConfig {
        entity: Some(entity.to_owned()),
        image: Some("default".into()),
        ..CardConfig::default()
    }
}

// ── Display preferences ─────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct DisplayConfig {
    /// Preferred language tag. Falls back to the environment's locale.
    pub language: Option<String>,

    /// Length and temperature units.
    #[serde(flatten, default)]
    pub units: UnitSystem,

    /// Offset from UTC used for timestamps, in minutes.
    #[serde(default)]
    pub utc_offset_minutes: i32,
}

impl DisplayConfig {
    /// The language to render in: the configured one, else the ambient
    /// locale's language, else the default tag.
    pub fn language(&self) -> String {
        resolve_language(self.language.as_deref(), ambient_language().as_deref())
    }

    pub fn utc_offset(&self) -> Result<FixedOffset, ConfigError> {
        let invalid = || ConfigError::Validation {
            field: "display.utc_offset_minutes".into(),
            reason: format!(
                "{} is outside ±{MAX_UTC_OFFSET_MINUTES} minutes",
                self.utc_offset_minutes
            ),
        };
        if self.utc_offset_minutes.abs() > MAX_UTC_OFFSET_MINUTES {
            return Err(invalid());
        }
        FixedOffset::east_opt(self.utc_offset_minutes * 60).ok_or_else(invalid)
    }

    /// A formatter for these preferences.
    pub fn formatter(&self) -> Result<Formatter, ConfigError> {
        let language = self.language();
        debug!(%language, units = ?self.units, "building formatter");
        Ok(Formatter::new(&language, self.units).with_utc_offset(self.utc_offset()?))
    }
}

/// The process locale from `LC_ALL`, `LC_MESSAGES` or `LANG`, as a
/// hyphenated tag (`de_DE.UTF-8` → `de-DE`). `C` and `POSIX` count as unset.
pub fn ambient_language() -> Option<String> {
    ["LC_ALL", "LC_MESSAGES", "LANG"]
        .into_iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|raw| locale_to_tag(&raw))
}

fn locale_to_tag(raw: &str) -> Option<String> {
    let base = raw.split(['.', '@']).next().unwrap_or_default().trim();
    if base.is_empty() || base == "C" || base == "POSIX" {
        return None;
    }
    Some(base.replace('_', "-"))
}

// ── Config file path ────────────────────────────────────────────────

/// Resolve the config file path via XDG / platform conventions.
pub fn config_path() -> PathBuf {
    ProjectDirs::from("com", "landroid", "landroid-card").map_or_else(
        || {
            let mut p = dirs_fallback();
            p.push("config.toml");
            p
        },
        |dirs| dirs.config_dir().join("config.toml"),
    )
}

fn dirs_fallback() -> PathBuf {
    let mut p = PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".into()));
    p.push(".config");
    p.push("landroid-card");
    p
}

// ── Config loading ──────────────────────────────────────────────────

/// Load the full Config from the canonical file + environment.
pub fn load_config() -> Result<Config, ConfigError> {
    load_config_from(&config_path())
}

/// Load from `path` + environment. A missing file is not an error.
pub fn load_config_from(path: &Path) -> Result<Config, ConfigError> {
    let figment = Figment::new()
        .merge(Serialized::defaults(Config::default()))
        .merge(Toml::file(path))
        .merge(Env::prefixed("LANDROID_").split("__"));

    let config: Config = figment.extract()?;
    Ok(config)
}

/// Load config, returning a default if it cannot be read.
pub fn load_config_or_default() -> Config {
    load_config().unwrap_or_default()
}

// ── Config saving ───────────────────────────────────────────────────

/// Serialize config to TOML and write to the canonical config path.
pub fn save_config(cfg: &Config) -> Result<PathBuf, ConfigError> {
    let path = config_path();
    save_config_to(cfg, &path)?;
    Ok(path)
}

pub fn save_config_to(cfg: &Config, path: &Path) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let toml_str = toml::to_string_pretty(cfg)?;
    std::fs::write(path, toml_str)?;
    Ok(())
}
