// ── Core error types ──
//
// The normalizer and formatter are total and never fail. Errors only come
// from the few edges that take user-supplied names: card actions, custom
// service strings and menu selections.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoreError {
    // ── Action routing ───────────────────────────────────────────────
    #[error("Unknown action: {name}")]
    UnknownAction { name: String },

    #[error("Invalid service '{service}': expected '<domain>.<service>'")]
    InvalidService { service: String },

    // ── Menus ────────────────────────────────────────────────────────
    #[error("Unknown menu: {name}")]
    UnknownMenu { name: String },

    #[error("Menu '{menu}' has no selectable option '{option}'")]
    InvalidOption { menu: String, option: String },

    // ── Input documents ──────────────────────────────────────────────
    #[error("Malformed entity snapshot: {0}")]
    Snapshot(#[from] serde_json::Error),
}
