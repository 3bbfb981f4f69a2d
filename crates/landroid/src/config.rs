//! Resolution of the effective configuration: the config file and
//! environment via `landroid_config`, then global flag overrides on top.

use std::path::PathBuf;

use landroid_config::{Config, DisplayConfig};
use landroid_core::{Formatter, UnitSystem};
use tracing::debug;

use crate::cli::{GlobalOpts, UnitsArg};
use crate::error::CliError;

/// The config file this invocation reads and writes.
pub fn config_path(global: &GlobalOpts) -> PathBuf {
    global
        .config
        .clone()
        .unwrap_or_else(landroid_config::config_path)
}

/// Load the config file and environment, without flag overrides.
pub fn load_stored(global: &GlobalOpts) -> Result<Config, CliError> {
    let path = config_path(global);
    debug!(path = %path.display(), "loading config");
    Ok(landroid_config::load_config_from(&path)?)
}

/// Load config with global flag overrides applied.
pub fn load_effective(global: &GlobalOpts) -> Result<Config, CliError> {
    let mut cfg = load_stored(global)?;
    apply_overrides(&mut cfg, global);
    Ok(cfg)
}

fn apply_overrides(cfg: &mut Config, global: &GlobalOpts) {
    if let Some(entity) = &global.entity {
        cfg.card.entity = Some(entity.clone());
    }
    apply_display_overrides(&mut cfg.display, global);
}

fn apply_display_overrides(display: &mut DisplayConfig, global: &GlobalOpts) {
    if let Some(language) = &global.language {
        display.language = Some(language.clone());
    }
    if let Some(units) = global.units {
        display.units = units.into();
    }
    if let Some(minutes) = global.utc_offset {
        display.utc_offset_minutes = minutes;
    }
}

/// Formatter for the effective display preferences.
pub fn formatter(cfg: &Config) -> Result<Formatter, CliError> {
    Ok(cfg.display.formatter()?)
}

impl From<UnitsArg> for UnitSystem {
    fn from(arg: UnitsArg) -> Self {
        match arg {
            UnitsArg::Metric => UnitSystem::metric(),
            UnitsArg::Imperial => UnitSystem::imperial(),
        }
    }
}
