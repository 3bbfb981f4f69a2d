//! Shared helpers for command handlers.

use std::io::Read;
use std::path::Path;

use indexmap::IndexMap;
use landroid_config::Config;
use landroid_core::{CustomAction, EntitySnapshot, Formatter, MowerView, Router, normalize};
use tracing::debug;

use crate::cli::GlobalOpts;
use crate::config;
use crate::error::CliError;

/// Read the entity snapshot named by `--snapshot`, `-` meaning stdin.
pub fn read_snapshot(global: &GlobalOpts) -> Result<EntitySnapshot, CliError> {
    let path = global.snapshot.as_deref().ok_or(CliError::NoSnapshot)?;
    let text = read_source(path).map_err(|source| CliError::SnapshotRead {
        path: path.display().to_string(),
        source,
    })?;
    Ok(EntitySnapshot::from_json(&text)?)
}

fn read_source(path: &Path) -> std::io::Result<String> {
    if path.as_os_str() == "-" {
        let mut text = String::new();
        std::io::stdin().lock().read_to_string(&mut text)?;
        Ok(text)
    } else {
        std::fs::read_to_string(path)
    }
}

/// Everything a snapshot-bound command needs: the host state, its
/// normalized view, the effective config and a formatter for it.
pub struct Session {
    pub snapshot: EntitySnapshot,
    pub view: MowerView,
    pub config: Config,
    pub formatter: Formatter,
    overrides: IndexMap<String, CustomAction>,
}

impl Session {
    pub fn load(global: &GlobalOpts) -> Result<Self, CliError> {
        let config = config::load_effective(global)?;
        let formatter = config::formatter(&config)?;
        let snapshot = read_snapshot(global)?;
        let view = normalize(&snapshot);
        debug!(
            entity = %snapshot.entity_id,
            state = %view.state,
            status = %view.status,
            "normalized snapshot"
        );
        let overrides = config.card.action_overrides();
        Ok(Self {
            snapshot,
            view,
            config,
            formatter,
            overrides,
        })
    }

    /// The entity actions are routed to: the configured one, else the
    /// snapshot's own id.
    pub fn entity_id(&self) -> Result<String, CliError> {
        let mut card = self.config.card.clone();
        if card.entity().is_err() && !self.snapshot.entity_id.trim().is_empty() {
            card.entity = Some(self.snapshot.entity_id.trim().to_owned());
        }
        card.validate()?;
        Ok(card.entity()?.to_owned())
    }

    /// Router for `entity_id` with the configured action overrides.
    pub fn router<'a>(&'a self, entity_id: &'a str) -> Router<'a> {
        Router::new(entity_id, &self.overrides)
    }
}

/// Parse a command-line value as JSON, falling back to a plain string.
pub fn parse_value(raw: &str) -> serde_json::Value {
    serde_json::from_str(raw).unwrap_or_else(|_| serde_json::Value::String(raw.to_owned()))
}
