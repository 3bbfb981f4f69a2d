// ── Canonical mower view ──

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::common::{
    DEFAULT_DEVICE_CLASS, DEFAULT_RSSI, DEFAULT_SUPPORTED_FEATURES, EPOCH, PLACEHOLDER,
};
use super::mower::{
    Battery, Blades, ErrorInfo, Firmware, Orientation, RainSensor, Statistics, StatusInfo, Zone,
};
use super::section::Section;
use super::snapshot::AttributeBag;

/// The canonical, schema-independent view of one mower.
///
/// Built fresh by [`crate::convert::normalize`] on every snapshot. Every
/// field is always populated; `Default` yields the documented value of
/// each field when the snapshot carries nothing for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct MowerView {
    pub status: String,
    pub state: String,

    pub battery_level: i64,
    pub battery_icon: String,
    pub accessories: Value,
    pub battery: Section<Battery>,
    pub blades: Section<Blades>,
    pub error: Section<ErrorInfo>,
    pub firmware: Section<Firmware>,
    pub locked: bool,
    pub mac_address: String,
    pub model: String,
    pub online: bool,
    pub orientation: Section<Orientation>,
    pub rain_sensor: Section<RainSensor>,
    pub schedule: Value,
    pub serial_number: String,
    pub status_info: Section<StatusInfo>,
    pub time_zone: String,
    pub zone: Section<Zone>,
    pub capabilities: Value,
    pub mqtt_connected: bool,
    pub supported_landroid_features: i64,
    pub daily_progress: i64,
    pub next_scheduled_start: String,
    pub party_mode_enabled: bool,
    pub rssi: i64,
    pub statistics: Section<Statistics>,
    pub torque: i64,
    pub state_updated_at: String,
    pub device_class: String,
    pub friendly_name: String,
    pub supported_features: i64,
}

impl Default for MowerView {
    fn default() -> Self {
        Self {
            status: PLACEHOLDER.into(),
            state: PLACEHOLDER.into(),
            battery_level: 100,
            battery_icon: "mdi:battery".into(),
            accessories: Value::String(PLACEHOLDER.into()),
            battery: Section::default(),
            blades: Section::default(),
            error: Section::default(),
            firmware: Section::default(),
            locked: false,
            mac_address: PLACEHOLDER.into(),
            model: String::new(),
            online: false,
            orientation: Section::default(),
            rain_sensor: Section::default(),
            schedule: Value::String(String::new()),
            serial_number: PLACEHOLDER.into(),
            status_info: Section::default(),
            time_zone: PLACEHOLDER.into(),
            zone: Section::default(),
            capabilities: Value::String(String::new()),
            mqtt_connected: false,
            supported_landroid_features: 0,
            daily_progress: 0,
            next_scheduled_start: EPOCH.into(),
            party_mode_enabled: false,
            rssi: DEFAULT_RSSI,
            statistics: Section::default(),
            torque: 100,
            state_updated_at: EPOCH.into(),
            device_class: DEFAULT_DEVICE_CLASS.into(),
            friendly_name: String::new(),
            supported_features: DEFAULT_SUPPORTED_FEATURES,
        }
    }
}

impl MowerView {
    /// The view as a current-generation attribute bag.
    pub fn to_attributes(&self) -> AttributeBag {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => AttributeBag::from(map),
            _ => AttributeBag::new(),
        }
    }

    /// A top-level field by name, as the raw value the formatter consumes.
    pub fn field(&self, name: &str) -> Option<Value> {
        match serde_json::to_value(self) {
            Ok(Value::Object(mut map)) => map.remove(name),
            _ => None,
        }
    }

    /// Wi-Fi link quality in percent derived from RSSI.
    ///
    /// Readings outside the usable `-100..=-50` dBm window map to `0`.
    pub fn wifi_quality(&self) -> i64 {
        if self.rssi > -101 && self.rssi < -49 {
            (self.rssi + 100) * 2
        } else {
            0
        }
    }

    pub fn is_edgecut(&self) -> bool {
        self.state == "edgecut"
    }
}
