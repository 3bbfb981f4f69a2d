// ── Nested section types of the canonical view ──
//
// Each section has the sub-shape the current backend generation reports.
// `Default` is the documented value when neither generation carries the
// section. Keys the card does not know are kept in `extra`; the nested
// object itself is kept by `Section`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::common::{EPOCH, PLACEHOLDER, ZONE_SLOTS, ZONE_STARTING_POINTS};

/// Charge cycle counters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChargeCycles {
    pub total: i64,
    pub current: i64,
    /// Cycle count at the last reset. Legacy backends do not report it and
    /// leave the placeholder text in its place.
    pub reset_at: Value,
    pub reset_time: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ChargeCycles {
    fn default() -> Self {
        Self {
            total: 0,
            current: 0,
            reset_at: Value::String(PLACEHOLDER.into()),
            reset_time: EPOCH.into(),
            extra: Map::new(),
        }
    }
}

/// Battery health and charge state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Battery {
    pub cycles: ChargeCycles,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Volts.
    pub voltage: f64,
    pub percent: i64,
    pub charging: bool,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Blade runtime counters, in minutes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Blades {
    pub total_on: i64,
    pub reset_at: i64,
    pub reset_time: String,
    pub current_on: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Blades {
    fn default() -> Self {
        Self {
            total_on: 0,
            reset_at: 0,
            reset_time: EPOCH.into(),
            current_on: 0,
            extra: Map::new(),
        }
    }
}

/// Current mower error. Id `0` means no error.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ErrorInfo {
    pub id: i64,
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for ErrorInfo {
    fn default() -> Self {
        Self {
            id: 0,
            description: PLACEHOLDER.into(),
            extra: Map::new(),
        }
    }
}

impl ErrorInfo {
    pub fn is_error(&self) -> bool {
        self.id > 0
    }
}

/// Firmware details. `version` is reported as a number by older backends
/// and as text by newer ones, so it stays a raw value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Firmware {
    pub auto_upgrade: bool,
    pub version: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Firmware {
    fn default() -> Self {
        Self {
            auto_upgrade: false,
            version: Value::from(0),
            extra: Map::new(),
        }
    }
}

/// Body orientation, in degrees.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Orientation {
    pub pitch: f64,
    pub roll: f64,
    pub yaw: f64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Rain sensor state. `delay` and `remaining` are minutes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RainSensor {
    pub delay: i64,
    pub triggered: bool,
    pub remaining: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RainSensor {
    pub fn is_delaying(&self) -> bool {
        self.delay > 0
    }
}

/// Zone layout. Zone numbers are zero-based; the card shows them one-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Zone {
    pub current: i64,
    pub next: i64,
    pub index: i64,
    /// Zone visit distribution, one slot per tenth of the mowing cycle.
    /// The misspelling is the backend's wire name.
    pub indicies: Vec<i64>,
    pub starting_point: Vec<i64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for Zone {
    fn default() -> Self {
        Self {
            current: 0,
            next: 0,
            index: 0,
            indicies: vec![0; ZONE_SLOTS],
            starting_point: vec![0; ZONE_STARTING_POINTS],
            extra: Map::new(),
        }
    }
}

/// Lifetime statistics. Work times are minutes, distance is metres.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Statistics {
    pub worktime_blades_on: i64,
    pub distance: i64,
    pub worktime_total: i64,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Backend status code with its description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct StatusInfo {
    pub id: i64,
    pub description: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for StatusInfo {
    fn default() -> Self {
        Self {
            id: 0,
            description: PLACEHOLDER.into(),
            extra: Map::new(),
        }
    }
}
