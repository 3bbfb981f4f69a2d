//! Config subcommand handlers.

use serde::Serialize;

use landroid_config::{Config, stub_config};
use landroid_core::{LengthUnit, TemperatureUnit, UnitSystem};

use crate::cli::{ConfigArgs, ConfigCommand, GlobalOpts};
use crate::config;
use crate::error::CliError;
use crate::output;

use super::util;

const KNOWN_KEYS: &str = "entity, camera, image, show_animation, compact_view, show_name, \
     show_status, show_configbar, show_toolbar, camera_refresh, language, units, length, \
     temperature, utc_offset_minutes";

// ── Helpers ─────────────────────────────────────────────────────────

fn save(cfg: &Config, global: &GlobalOpts) -> Result<std::path::PathBuf, CliError> {
    let path = config::config_path(global);
    landroid_config::save_config_to(cfg, &path)?;
    Ok(path)
}

fn parse_flag(key: &str, value: &str) -> Result<bool, CliError> {
    value.parse().map_err(|_| CliError::Validation {
        field: key.into(),
        reason: "must be 'true' or 'false'".into(),
    })
}

fn optional(value: &str) -> Option<String> {
    (!value.is_empty()).then(|| value.to_owned())
}

/// Apply `key = value` to the stored config.
fn set_key(cfg: &mut Config, key: &str, value: &str) -> Result<(), CliError> {
    let card = &mut cfg.card;
    let display = &mut cfg.display;
    match key {
        "entity" => card.entity = optional(value),
        "camera" => card.camera = optional(value),
        "image" => card.image = optional(value),
        "show_animation" => card.show_animation = parse_flag(key, value)?,
        "compact_view" => card.compact_view = parse_flag(key, value)?,
        "show_name" => card.show_name = parse_flag(key, value)?,
        "show_status" => card.show_status = parse_flag(key, value)?,
        "show_configbar" => card.show_configbar = parse_flag(key, value)?,
        "show_toolbar" => card.show_toolbar = parse_flag(key, value)?,
        "camera_refresh" => {
            card.camera_refresh = Some(value.parse().map_err(|_| CliError::Validation {
                field: key.into(),
                reason: "must be a number (seconds)".into(),
            })?);
        }
        "language" => display.language = optional(value),
        "units" => {
            display.units = value.parse::<UnitSystem>().map_err(|reason| CliError::Validation {
                field: key.into(),
                reason,
            })?;
        }
        "length" => {
            display.units.length = value.parse::<LengthUnit>().map_err(|_| CliError::Validation {
                field: key.into(),
                reason: "must be 'km' or 'mi'".into(),
            })?;
        }
        "temperature" => {
            display.units.temperature =
                value
                    .parse::<TemperatureUnit>()
                    .map_err(|_| CliError::Validation {
                        field: key.into(),
                        reason: "must be '°C' or '°F'".into(),
                    })?;
        }
        "utc_offset_minutes" => {
            display.utc_offset_minutes = value.parse().map_err(|_| CliError::Validation {
                field: key.into(),
                reason: "must be a whole number of minutes".into(),
            })?;
            display.utc_offset()?;
        }
        other => {
            return Err(CliError::Validation {
                field: other.into(),
                reason: format!("unknown config key '{other}'. Valid keys: {KNOWN_KEYS}"),
            });
        }
    }
    Ok(())
}

#[derive(Debug, Serialize)]
struct Derived {
    entity: String,
    card_size: u8,
    image: String,
    camera_refresh_secs: u64,
    refreshes_camera: bool,
    language: String,
    utc_offset: String,
    action_overrides: usize,
    shortcuts: usize,
}

// ── Handler ─────────────────────────────────────────────────────────

pub fn handle(args: ConfigArgs, global: &GlobalOpts) -> Result<(), CliError> {
    match args.command {
        // ── Init ────────────────────────────────────────────────────
        ConfigCommand::Init { entities, force } => {
            let path = config::config_path(global);
            if path.exists() && !force {
                return Err(CliError::ConfigExists {
                    path: path.display().to_string(),
                });
            }

            let entities = if entities.is_empty() {
                vec![util::read_snapshot(global)?.entity_id]
            } else {
                entities
            };

            let cfg = Config {
                card: stub_config(entities.iter().map(String::as_str)),
                ..Config::default()
            };
            let path = save(&cfg, global)?;

            if !global.quiet {
                eprintln!("✓ Configuration written to {}", path.display());
                match cfg.card.entity.as_deref() {
                    Some(entity) if !entity.is_empty() => eprintln!("  Entity: {entity}"),
                    _ => eprintln!("  No vacuum entity found; set one with: landroid config set entity <id>"),
                }
            }
            Ok(())
        }

        // ── Show ────────────────────────────────────────────────────
        ConfigCommand::Show => {
            let cfg = config::load_effective(global)?;
            let out = output::render_single(
                &global.output,
                &cfg,
                |c| toml::to_string_pretty(c).unwrap_or_else(|e| format!("{c:#?}\n# {e}")),
                |c| c.card.entity.clone().unwrap_or_default(),
            )?;
            output::print_output(&out, global.quiet)
        }

        // ── Path ────────────────────────────────────────────────────
        ConfigCommand::Path => {
            let path = config::config_path(global).display().to_string();
            output::print_output(&path, global.quiet)
        }

        // ── Set <key> <value> ───────────────────────────────────────
        ConfigCommand::Set { key, value } => {
            let mut cfg = config::load_stored(global)?;
            set_key(&mut cfg, &key, &value)?;
            save(&cfg, global)?;
            if !global.quiet {
                eprintln!("✓ Set {key}");
            }
            Ok(())
        }

        // ── Validate ────────────────────────────────────────────────
        ConfigCommand::Validate => {
            let cfg = config::load_effective(global)?;
            cfg.card.validate()?;
            let derived = Derived {
                entity: cfg.card.entity()?.to_owned(),
                card_size: cfg.card.card_size(),
                image: cfg.card.image().to_owned(),
                camera_refresh_secs: cfg.card.camera_refresh().as_secs(),
                refreshes_camera: cfg.card.refreshes_camera(),
                language: cfg.display.language(),
                utc_offset: cfg.display.utc_offset()?.to_string(),
                action_overrides: cfg.card.action_overrides().len(),
                shortcuts: cfg.card.shortcuts.len(),
            };
            let out = output::render_single(
                &global.output,
                &derived,
                |d| {
                    format!(
                        "entity:          {}\ncard size:       {}\nimage:           {}\n\
                         camera refresh:  {}s{}\nlanguage:        {}\nutc offset:      {}\n\
                         overrides:       {}\nshortcuts:       {}",
                        d.entity,
                        d.card_size,
                        d.image,
                        d.camera_refresh_secs,
                        if d.refreshes_camera { "" } else { " (off)" },
                        d.language,
                        d.utc_offset,
                        d.action_overrides,
                        d.shortcuts,
                    )
                },
                |d| d.entity.clone(),
            )?;
            output::print_output(&out, global.quiet)
        }
    }
}
