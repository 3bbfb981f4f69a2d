// ── Field-name → format category table ──
//
// The formatter dispatches on the field *name*, never on the runtime type
// of the value: `0` is a percentage under `daily_progress` and a duration
// under `worktime_total`.

use serde::Serialize;
use strum::{Display, EnumIter, IntoEnumIterator};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Display, EnumIter)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum FieldCategory {
    /// Metres, shown as kilometres or miles.
    Distance,
    /// Degrees Celsius, shown in the configured scale.
    Temperature,
    /// Integer percentage.
    Percent,
    /// Volts with a localized unit label.
    Voltage,
    /// Degrees of body orientation.
    Angle,
    /// Plain counters.
    Counter,
    /// Minutes, decomposed into days, hours and minutes.
    Duration,
    /// Date and time.
    Timestamp,
    /// Localized yes/no word.
    Boolean,
    /// Rain delay, shown as `m:ss`.
    RainDelay,
    /// Anything else.
    Generic,
}

static TABLE: &[(FieldCategory, &[&str])] = &[
    (FieldCategory::Distance, &["distance"]),
    (FieldCategory::Temperature, &["temperature"]),
    (
        FieldCategory::Percent,
        &["battery_level", "daily_progress", "percent", "rssi", "torque"],
    ),
    (FieldCategory::Voltage, &["voltage"]),
    (FieldCategory::Angle, &["pitch", "roll", "yaw"]),
    (FieldCategory::Counter, &["total", "current"]),
    (
        FieldCategory::Duration,
        &[
            "reset_at",
            "total_on",
            "current_on",
            "remaining",
            "time_extension",
            "duration",
            "worktime_blades_on",
            "worktime_total",
        ],
    ),
    (
        FieldCategory::Timestamp,
        &[
            "last_update",
            "next_scheduled_start",
            "reset_time",
            "state_updated_at",
        ],
    ),
    (
        FieldCategory::Boolean,
        &[
            "active",
            "auto_upgrade",
            "boundary",
            "charging",
            "locked",
            "mqtt_connected",
            "online",
            "party_mode_enabled",
            "triggered",
        ],
    ),
    (FieldCategory::RainDelay, &["delay", "raindelay"]),
];

impl FieldCategory {
    /// Category of a field name. Unknown names are [`FieldCategory::Generic`].
    pub fn of(field: &str) -> Self {
        TABLE
            .iter()
            .find(|(_, fields)| fields.contains(&field))
            .map_or(Self::Generic, |(category, _)| *category)
    }

    /// The field names mapped to this category.
    pub fn fields(self) -> &'static [&'static str] {
        TABLE
            .iter()
            .find(|(category, _)| *category == self)
            .map_or(&[], |(_, fields)| fields)
    }

    /// Every field name with an explicit category.
    pub fn known_fields() -> impl Iterator<Item = (&'static str, Self)> {
        Self::iter().flat_map(|category| category.fields().iter().map(move |f| (*f, category)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn every_documented_field_has_its_category() {
        let expected: &[(&str, FieldCategory)] = &[
            ("distance", FieldCategory::Distance),
            ("temperature", FieldCategory::Temperature),
            ("battery_level", FieldCategory::Percent),
            ("daily_progress", FieldCategory::Percent),
            ("percent", FieldCategory::Percent),
            ("rssi", FieldCategory::Percent),
            ("torque", FieldCategory::Percent),
            ("voltage", FieldCategory::Voltage),
            ("pitch", FieldCategory::Angle),
            ("roll", FieldCategory::Angle),
            ("yaw", FieldCategory::Angle),
            ("total", FieldCategory::Counter),
            ("current", FieldCategory::Counter),
            ("reset_at", FieldCategory::Duration),
            ("total_on", FieldCategory::Duration),
            ("current_on", FieldCategory::Duration),
            ("remaining", FieldCategory::Duration),
            ("time_extension", FieldCategory::Duration),
            ("duration", FieldCategory::Duration),
            ("worktime_blades_on", FieldCategory::Duration),
            ("worktime_total", FieldCategory::Duration),
            ("last_update", FieldCategory::Timestamp),
            ("next_scheduled_start", FieldCategory::Timestamp),
            ("reset_time", FieldCategory::Timestamp),
            ("state_updated_at", FieldCategory::Timestamp),
            ("active", FieldCategory::Boolean),
            ("auto_upgrade", FieldCategory::Boolean),
            ("boundary", FieldCategory::Boolean),
            ("charging", FieldCategory::Boolean),
            ("locked", FieldCategory::Boolean),
            ("mqtt_connected", FieldCategory::Boolean),
            ("online", FieldCategory::Boolean),
            ("party_mode_enabled", FieldCategory::Boolean),
            ("triggered", FieldCategory::Boolean),
            ("delay", FieldCategory::RainDelay),
            ("raindelay", FieldCategory::RainDelay),
        ];
        for (field, category) in expected {
            assert_eq!(FieldCategory::of(field), *category, "field {field}");
        }
        assert_eq!(FieldCategory::known_fields().count(), expected.len());
    }

    #[test]
    fn unknown_and_schedule_fields_are_generic() {
        for field in ["start", "end", "model", "serial_number", "", "Distance"] {
            assert_eq!(FieldCategory::of(field), FieldCategory::Generic);
        }
        assert!(FieldCategory::Generic.fields().is_empty());
    }

    #[test]
    fn no_field_is_mapped_twice() {
        let mut seen = HashSet::new();
        for (field, _) in FieldCategory::known_fields() {
            assert!(seen.insert(field), "{field} appears in two categories");
        }
    }
}
