// ── Snapshot-to-view conversion ──
//
// Reconciles the two backend attribute generations into the canonical
// `MowerView`. Resolution per field, in order:
//
//   1. the current-generation nested section, when present and object-shaped
//   2. a section synthesized from the legacy flat fields
//   3. the documented default
//
// Presence is explicit: `null` and missing keys are absent, `0` and `false`
// are readings. Empty strings count as absent for text fields. Nothing here
// can fail; malformed values degrade to the next candidate.

use serde_json::Value;
use tracing::debug;

use crate::model::common::{
    DEFAULT_DEVICE_CLASS, DEFAULT_RSSI, DEFAULT_SUPPORTED_FEATURES, EPOCH, PLACEHOLDER,
    ZONE_SLOTS, ZONE_STARTING_POINTS,
};
use crate::model::{
    AttributeBag, Battery, Blades, ChargeCycles, EntitySnapshot, ErrorInfo, Firmware, MowerView,
    Orientation, RainSensor, Section, Statistics, StatusInfo, Zone,
};

// ── Helpers ────────────────────────────────────────────────────────

/// First non-empty text among `keys`.
fn first_text(attrs: &AttributeBag, keys: &[&str]) -> Option<String> {
    keys.iter().find_map(|key| attrs.text(key))
}

/// Any present value except the empty string, cloned as-is.
fn opaque(attrs: &AttributeBag, key: &str) -> Option<Value> {
    attrs
        .get(key)
        .filter(|v| v.as_str().is_none_or(|s| !s.is_empty()))
        .cloned()
}

/// Resolve a section: nested object first, legacy synthesis otherwise.
///
/// A nested object is kept verbatim; the typed reading next to it is what
/// the formatter and icons consume.
fn section_or_else<T>(
    attrs: &AttributeBag,
    key: &str,
    nested: impl FnOnce(&AttributeBag) -> T,
    legacy: impl FnOnce(&AttributeBag) -> T,
) -> Section<T> {
    if let Some(section) = attrs.section(key) {
        let typed = nested(&section);
        return Section::verbatim(typed, section.into_inner());
    }
    if attrs.contains(key) {
        debug!(field = key, "attribute is not object-shaped, synthesizing from legacy fields");
    }
    Section::synthesized(legacy(attrs))
}

// ── Battery ────────────────────────────────────────────────────────

const CYCLES_KEYS: &[&str] = &["total", "current", "reset_at", "reset_time"];
const BATTERY_KEYS: &[&str] = &["cycles", "temperature", "voltage", "percent", "charging"];

fn cycles_from_section(section: &AttributeBag) -> ChargeCycles {
    ChargeCycles {
        total: section.int("total").unwrap_or(0),
        current: section.int("current").unwrap_or(0),
        reset_at: section
            .get("reset_at")
            .cloned()
            .unwrap_or_else(|| Value::String(PLACEHOLDER.into())),
        reset_time: section.text("reset_time").unwrap_or_else(|| EPOCH.into()),
        extra: section.extras(CYCLES_KEYS),
    }
}

fn battery_from_section(section: &AttributeBag) -> Battery {
    Battery {
        cycles: section
            .section("cycles")
            .map_or_else(ChargeCycles::default, |c| cycles_from_section(&c)),
        temperature: section.float("temperature").unwrap_or(0.0),
        voltage: section.float("voltage").unwrap_or(0.0),
        percent: section.int("percent").unwrap_or(0),
        charging: section.flag("charging").unwrap_or(false),
        extra: section.extras(BATTERY_KEYS),
    }
}

fn battery_from_legacy(attrs: &AttributeBag) -> Battery {
    Battery {
        cycles: ChargeCycles {
            total: attrs.int("total_charge_cycles").unwrap_or(0),
            current: attrs.int("current_charge_cycles").unwrap_or(0),
            ..ChargeCycles::default()
        },
        temperature: attrs.float("battery_temperature").unwrap_or(0.0),
        voltage: attrs.float("battery_voltage").unwrap_or(0.0),
        percent: attrs.int("battery_level").unwrap_or(0),
        charging: false,
        extra: serde_json::Map::new(),
    }
}

// ── Blades ─────────────────────────────────────────────────────────

const BLADES_KEYS: &[&str] = &["total_on", "reset_at", "reset_time", "current_on"];

fn blades_from_section(section: &AttributeBag) -> Blades {
    Blades {
        total_on: section.int("total_on").unwrap_or(0),
        reset_at: section.int("reset_at").unwrap_or(0),
        reset_time: section.text("reset_time").unwrap_or_else(|| EPOCH.into()),
        current_on: section.int("current_on").unwrap_or(0),
        extra: section.extras(BLADES_KEYS),
    }
}

fn blades_from_legacy(attrs: &AttributeBag) -> Blades {
    let total = attrs.int("total_blade_time");
    let current = attrs.int("current_blade_time");

    Blades {
        total_on: total.unwrap_or(0),
        // Runtime at the last reset is only known when both counters are.
        reset_at: total.zip(current).map_or(0, |(t, c)| t.saturating_sub(c)),
        reset_time: attrs
            .text("blade_time_reset")
            .unwrap_or_else(|| EPOCH.into()),
        current_on: current.unwrap_or(0),
        extra: serde_json::Map::new(),
    }
}

// ── Error ──────────────────────────────────────────────────────────

const ERROR_KEYS: &[&str] = &["id", "description"];

fn error_from_section(section: &AttributeBag) -> ErrorInfo {
    ErrorInfo {
        id: section.int("id").unwrap_or(0),
        description: section
            .text("description")
            .unwrap_or_else(|| PLACEHOLDER.into()),
        extra: section.extras(ERROR_KEYS),
    }
}

/// Legacy backends report the error text in `error` and its code in
/// `error_id`.
fn error_from_legacy(attrs: &AttributeBag) -> ErrorInfo {
    ErrorInfo {
        id: attrs.int("error_id").unwrap_or(0),
        description: attrs.text("error").unwrap_or_else(|| PLACEHOLDER.into()),
        extra: serde_json::Map::new(),
    }
}

// ── Firmware ───────────────────────────────────────────────────────

const FIRMWARE_KEYS: &[&str] = &["auto_upgrade", "version"];

fn firmware_from_section(section: &AttributeBag) -> Firmware {
    Firmware {
        auto_upgrade: section.flag("auto_upgrade").unwrap_or(false),
        version: section.get("version").cloned().unwrap_or_else(|| Value::from(0)),
        extra: section.extras(FIRMWARE_KEYS),
    }
}

fn firmware_from_legacy(attrs: &AttributeBag) -> Firmware {
    Firmware {
        auto_upgrade: false,
        version: attrs
            .get("firmware_version")
            .cloned()
            .unwrap_or_else(|| Value::from(0)),
        extra: serde_json::Map::new(),
    }
}

// ── Orientation ────────────────────────────────────────────────────

const ORIENTATION_KEYS: &[&str] = &["pitch", "roll", "yaw"];

/// Both generations use the same key names: nested under `orientation`
/// or flat at the top level.
fn orientation_from(source: &AttributeBag, keep_extra: bool) -> Orientation {
    Orientation {
        pitch: source.float("pitch").unwrap_or(0.0),
        roll: source.float("roll").unwrap_or(0.0),
        yaw: source.float("yaw").unwrap_or(0.0),
        extra: if keep_extra {
            source.extras(ORIENTATION_KEYS)
        } else {
            serde_json::Map::new()
        },
    }
}

// ── Rain sensor ────────────────────────────────────────────────────

const RAIN_SENSOR_KEYS: &[&str] = &["delay", "triggered", "remaining"];

fn rain_sensor_from_section(section: &AttributeBag) -> RainSensor {
    RainSensor {
        delay: section.int("delay").unwrap_or(0),
        triggered: section.flag("triggered").unwrap_or(false),
        remaining: section.int("remaining").unwrap_or(0),
        extra: section.extras(RAIN_SENSOR_KEYS),
    }
}

fn rain_sensor_from_legacy(attrs: &AttributeBag) -> RainSensor {
    RainSensor {
        delay: attrs.int("rain_delay").unwrap_or(0),
        triggered: attrs.flag("rain_sensor_triggered").unwrap_or(false),
        remaining: attrs.int("rain_delay_remaining").unwrap_or(0),
        extra: serde_json::Map::new(),
    }
}

// ── Zone ───────────────────────────────────────────────────────────

const ZONE_KEYS: &[&str] = &["current", "next", "index", "indicies", "starting_point"];

fn zone_from_section(section: &AttributeBag) -> Zone {
    Zone {
        current: section.int("current").unwrap_or(0),
        next: section.int("next").unwrap_or(0),
        index: section.int("index").unwrap_or(0),
        indicies: section
            .int_list("indicies")
            .unwrap_or_else(|| vec![0; ZONE_SLOTS]),
        starting_point: section
            .int_list("starting_point")
            .unwrap_or_else(|| vec![0; ZONE_STARTING_POINTS]),
        extra: section.extras(ZONE_KEYS),
    }
}

/// Legacy backends carry the starting points as a bare `zone` array and
/// the visit distribution as `zone_probability`.
fn zone_from_legacy(attrs: &AttributeBag) -> Zone {
    Zone {
        current: 0,
        next: 0,
        index: attrs.int("mowing_zone").unwrap_or(0),
        indicies: attrs
            .int_list("zone_probability")
            .unwrap_or_else(|| vec![0; ZONE_SLOTS]),
        starting_point: attrs
            .int_list("zone")
            .unwrap_or_else(|| vec![0; ZONE_STARTING_POINTS]),
        extra: serde_json::Map::new(),
    }
}

// ── Statistics ─────────────────────────────────────────────────────

const STATISTICS_KEYS: &[&str] = &["worktime_blades_on", "distance", "worktime_total"];

fn statistics_from_section(section: &AttributeBag) -> Statistics {
    Statistics {
        worktime_blades_on: section.int("worktime_blades_on").unwrap_or(0),
        distance: section.int("distance").unwrap_or(0),
        worktime_total: section.int("worktime_total").unwrap_or(0),
        extra: section.extras(STATISTICS_KEYS),
    }
}

fn statistics_from_legacy(attrs: &AttributeBag) -> Statistics {
    Statistics {
        worktime_blades_on: attrs.int("work_time").unwrap_or(0),
        distance: attrs.int("distance").unwrap_or(0),
        worktime_total: 0,
        extra: serde_json::Map::new(),
    }
}

// ── Status ─────────────────────────────────────────────────────────

const STATUS_INFO_KEYS: &[&str] = &["id", "description"];

/// `status`, then `state`, then the host's primary state, then `-`.
fn resolve_status(attrs: &AttributeBag, primary_state: &str) -> String {
    first_text(attrs, &["status", "state"])
        .or_else(|| (!primary_state.is_empty()).then(|| primary_state.to_owned()))
        .unwrap_or_else(|| PLACEHOLDER.into())
}

fn status_info_from_section(section: &AttributeBag) -> StatusInfo {
    StatusInfo {
        id: section.int("id").unwrap_or(0),
        description: section
            .text("description")
            .unwrap_or_else(|| PLACEHOLDER.into()),
        extra: section.extras(STATUS_INFO_KEYS),
    }
}

// ── View ───────────────────────────────────────────────────────────

/// Build the canonical view from a raw attribute bag and the host's
/// primary state string.
pub fn normalize_attributes(attrs: &AttributeBag, primary_state: &str) -> MowerView {
    let status = resolve_status(attrs, primary_state);

    MowerView {
        state: status.clone(),
        status_info: section_or_else(attrs, "status_info", status_info_from_section, |_| {
            StatusInfo {
                description: status.clone(),
                ..StatusInfo::default()
            }
        }),
        status,

        battery_level: attrs.int("battery_level").unwrap_or(100),
        battery_icon: attrs
            .text("battery_icon")
            .unwrap_or_else(|| "mdi:battery".into()),
        accessories: opaque(attrs, "accessories")
            .unwrap_or_else(|| Value::String(PLACEHOLDER.into())),
        battery: section_or_else(attrs, "battery", battery_from_section, battery_from_legacy),
        blades: section_or_else(attrs, "blades", blades_from_section, blades_from_legacy),
        error: section_or_else(attrs, "error", error_from_section, error_from_legacy),
        firmware: section_or_else(attrs, "firmware", firmware_from_section, firmware_from_legacy),
        locked: attrs.flag("locked").unwrap_or(false),
        mac_address: first_text(attrs, &["mac_address", "mac"])
            .unwrap_or_else(|| PLACEHOLDER.into()),
        model: attrs.text("model").unwrap_or_default(),
        online: attrs.flag("online").unwrap_or(false),
        orientation: section_or_else(
            attrs,
            "orientation",
            |s| orientation_from(s, true),
            |a| orientation_from(a, false),
        ),
        rain_sensor: section_or_else(
            attrs,
            "rain_sensor",
            rain_sensor_from_section,
            rain_sensor_from_legacy,
        ),
        schedule: opaque(attrs, "schedule").unwrap_or_else(|| Value::String(String::new())),
        serial_number: first_text(attrs, &["serial_number", "serial"])
            .unwrap_or_else(|| PLACEHOLDER.into()),
        time_zone: attrs
            .text("time_zone")
            .unwrap_or_else(|| PLACEHOLDER.into()),
        zone: section_or_else(attrs, "zone", zone_from_section, zone_from_legacy),
        capabilities: opaque(attrs, "capabilities")
            .unwrap_or_else(|| Value::String(String::new())),
        mqtt_connected: attrs.flag("mqtt_connected").unwrap_or(false),
        supported_landroid_features: attrs.int("supported_landroid_features").unwrap_or(0),
        daily_progress: attrs.int("daily_progress").unwrap_or(0),
        next_scheduled_start: attrs
            .text("next_scheduled_start")
            .unwrap_or_else(|| EPOCH.into()),
        party_mode_enabled: attrs.flag("party_mode_enabled").unwrap_or(false),
        rssi: attrs.int("rssi").unwrap_or(DEFAULT_RSSI),
        statistics: section_or_else(
            attrs,
            "statistics",
            statistics_from_section,
            statistics_from_legacy,
        ),
        torque: attrs.int("torque").unwrap_or(100),
        state_updated_at: first_text(attrs, &["state_updated_at", "last_update"])
            .unwrap_or_else(|| EPOCH.into()),
        device_class: attrs
            .text("device_class")
            .unwrap_or_else(|| DEFAULT_DEVICE_CLASS.into()),
        friendly_name: attrs.text("friendly_name").unwrap_or_default(),
        supported_features: attrs
            .int("supported_features")
            .unwrap_or(DEFAULT_SUPPORTED_FEATURES),
    }
}

/// Build the canonical view for a host snapshot.
pub fn normalize(snapshot: &EntitySnapshot) -> MowerView {
    normalize_attributes(&snapshot.attributes, &snapshot.state)
}

impl From<&EntitySnapshot> for MowerView {
    fn from(snapshot: &EntitySnapshot) -> Self {
        normalize(snapshot)
    }
}
