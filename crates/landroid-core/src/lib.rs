//! Data core of the Landroid mower dashboard card.
//!
//! The card receives an entity snapshot from the dashboard host and renders
//! it. Everything that is not markup lives here:
//!
//! - **Snapshot model** ([`EntitySnapshot`], [`AttributeBag`]) hold the raw,
//!   loosely-typed state pushed by the host. Two backend generations share
//!   the bag: legacy flat scalars and current nested objects.
//!
//! - **Normalizer** ([`convert`]) reconciles both generations into the
//!   canonical [`MowerView`] with explicit presence checks. Total, pure and
//!   never fails: missing or malformed data degrades to documented defaults.
//!
//! - **Formatter** ([`format`]) does locale-aware rendering of one field by
//!   name: distances, temperatures, percentages, durations, timestamps and
//!   booleans, with a `-` placeholder for absent or unrenderable values.
//!
//! - **Presentation helpers**: [`i18n`] string tables behind the
//!   [`Localize`] seam, the [`icon`] table, the [`status`] line, the list
//!   [`menu`]s and the [`command`] layer that turns card actions into host
//!   service calls.

pub mod command;
pub mod convert;
pub mod error;
pub mod format;
pub mod i18n;
pub mod icon;
pub mod menu;
pub mod model;
pub mod status;

// ── Primary re-exports ──────────────────────────────────────────────
pub use command::requests::{CustomAction, Shortcut};
pub use command::toolbar::{ToolbarButton, ToolbarItem, configbar_for, toolbar_for};
pub use command::{Action, CardEvent, Router, ServiceCall};
pub use convert::{normalize, normalize_attributes};
pub use error::CoreError;
pub use format::{
    FieldCategory, FormatContext, Formatter, LengthUnit, Locale, TemperatureUnit, UnitSystem,
    format_value, resolve_language,
};
pub use i18n::{Localize, Translations};
pub use icon::{IconEntry, all_icons, icon_for, icon_for_name};
pub use menu::{Menu, MenuKind, MenuRow, list_menu};
pub use status::status_line;

// Re-export model types at the crate root for ergonomics.
pub use model::{
    // Snapshot
    AttributeBag,
    // Nested sections
    Battery,
    Blades,
    ChargeCycles,
    EntitySnapshot,
    ErrorInfo,
    Firmware,
    // Canonical view
    MowerView,
    Orientation,
    RainSensor,
    Section,
    Statistics,
    StatusInfo,
    Zone,
};
