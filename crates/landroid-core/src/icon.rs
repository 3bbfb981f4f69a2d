// ── Icon table ──
//
// Material Design icon names for every attribute and action the card can
// show. Most entries are fixed; a few depend on the current reading.

use serde::Serialize;
use strum::{Display, EnumIter, EnumString, IntoEnumIterator};

use crate::model::MowerView;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumString, EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum IconEntry {
    BatteryIcon,
    Accessories,
    Battery,
    Cycles,
    Blades,
    Error,
    Firmware,
    Locked,
    MacAddress,
    Model,
    Online,
    Orientation,
    RainSensor,
    Schedule,
    SerialNumber,
    StatusInfo,
    TimeZone,
    Zone,
    Current,
    Next,
    Capabilities,
    MqttConnected,
    SupportedLandroidFeatures,
    DailyProgress,
    NextScheduledStart,
    PartyModeEnabled,
    Rssi,
    Statistics,
    Torque,
    StateUpdatedAt,
    SupportedFeatures,
    Play,
    Start,
    Stop,
    Pause,
    ReturnToBase,
    Edgecut,
}

/// `mdi:numeric-N-box-multiple` for a zero-based zone index.
fn zone_numeral(zone: i64) -> String {
    format!("mdi:numeric-{}-box-multiple", zone.saturating_add(1))
}

/// Wi-Fi strength bucket: `1`..=`4`, or `outline` for no usable signal.
fn wifi_icon(quality: i64) -> String {
    let bucket = (quality - 1).div_euclid(20);
    if bucket > 0 {
        format!("mdi:wifi-strength-{bucket}")
    } else {
        "mdi:wifi-strength-outline".to_owned()
    }
}

/// Icon for `entry` given the current readings.
pub fn icon_for(entry: IconEntry, view: &MowerView) -> String {
    let fixed = match entry {
        IconEntry::BatteryIcon => return view.battery_icon.clone(),
        IconEntry::Zone | IconEntry::Current => return zone_numeral(view.zone.current),
        IconEntry::Next => return zone_numeral(view.zone.next),
        IconEntry::Rssi => return wifi_icon(view.wifi_quality()),

        IconEntry::Locked if view.locked => "mdi:lock",
        IconEntry::Locked => "mdi:lock-open",
        IconEntry::Online if view.online => "mdi:web",
        IconEntry::Online => "mdi:web-off",
        IconEntry::MqttConnected if view.mqtt_connected => "mdi:network",
        IconEntry::MqttConnected => "mdi:network-off",
        IconEntry::PartyModeEnabled if view.party_mode_enabled => "mdi:sleep",
        IconEntry::PartyModeEnabled => "mdi:sleep-off",
        IconEntry::RainSensor if view.rain_sensor.is_delaying() => "mdi:weather-pouring",
        IconEntry::RainSensor => "mdi:weather-sunny",
        IconEntry::Pause | IconEntry::Edgecut if view.is_edgecut() => "mdi:motion-pause",
        IconEntry::Pause => "mdi:pause",
        IconEntry::Edgecut => "mdi:motion-play",

        IconEntry::Accessories => "mdi:toolbox",
        IconEntry::Battery => "mdi:battery",
        IconEntry::Cycles => "mdi:battery-sync",
        IconEntry::Blades => "mdi:fan",
        IconEntry::Error => "mdi:alert-circle",
        IconEntry::Firmware | IconEntry::StatusInfo => "mdi:information",
        IconEntry::MacAddress => "mdi:barcode",
        IconEntry::Model => "mdi:label",
        IconEntry::Orientation => "mdi:rotate-orbit",
        IconEntry::Schedule => "mdi:calendar-clock",
        IconEntry::SerialNumber => "mdi:numeric",
        IconEntry::TimeZone => "mdi:web-clock",
        IconEntry::Capabilities | IconEntry::SupportedFeatures => "mdi:format-list-bulleted",
        IconEntry::SupportedLandroidFeatures => "mdi:star-circle-outline",
        IconEntry::DailyProgress => "mdi:progress-helper",
        IconEntry::NextScheduledStart => "mdi:clock-start",
        IconEntry::Statistics => "mdi:chart-areaspline",
        IconEntry::Torque => "mdi:plus-minus-box",
        IconEntry::StateUpdatedAt => "mdi:update",
        IconEntry::Play | IconEntry::Start => "mdi:play",
        IconEntry::Stop => "mdi:stop",
        IconEntry::ReturnToBase => "mdi:home-import-outline",
    };
    fixed.to_owned()
}

/// Icon for an attribute or action name, `None` for names without one.
pub fn icon_for_name(name: &str, view: &MowerView) -> Option<String> {
    name.parse::<IconEntry>().ok().map(|entry| icon_for(entry, view))
}

/// The whole table for the current readings, in declaration order.
pub fn all_icons(view: &MowerView) -> Vec<(IconEntry, String)> {
    IconEntry::iter()
        .map(|entry| (entry, icon_for(entry, view)))
        .collect()
}
