// ── Card domain model ──
//
// `snapshot` holds what the host pushes (state string + untyped attribute
// bag). `view` is the canonical shape the card renders, built from the
// nested section types in `mower`, each wrapped in a `Section` that keeps
// the nested object it was read from. The conversion lives in `crate::convert`.

pub mod common;
pub mod lenient;
pub mod mower;
pub mod section;
pub mod snapshot;
pub mod view;

// ── Re-exports ──────────────────────────────────────────────────────
// Flat access: `use landroid_core::model::*` gives you everything.

// Shared constants
pub use common::{DEFAULT_IMAGE, DEFAULT_LANG, EPOCH, PLACEHOLDER};

// Snapshot
pub use snapshot::{AttributeBag, EntitySnapshot};

// Nested sections
pub use mower::{
    Battery, Blades, ChargeCycles, ErrorInfo, Firmware, Orientation, RainSensor, Statistics,
    StatusInfo, Zone,
};

// Canonical view
pub use section::Section;
pub use view::MowerView;
