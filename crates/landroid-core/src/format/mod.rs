// ── Value formatter ──
//
// `format_value` turns one canonical field (by name) and its raw value into
// display text. Dispatch goes through `FieldCategory::of(field)`; the value
// is coerced into the category's expected shape and, when that fails,
// degrades to the placeholder without affecting any other field.

pub mod category;
pub mod datetime;
pub mod locale;
pub mod number;
pub mod units;

use chrono::{FixedOffset, Offset, Utc};
use serde_json::Value;
use tracing::{debug, warn};

pub use category::FieldCategory;
pub use locale::{Locale, LocaleProfile, resolve_language, supported_tags};
pub use units::{LengthUnit, TemperatureUnit, UnitSystem};

use crate::i18n::{Localize, Translations};
use crate::model::PLACEHOLDER;
use crate::model::lenient::{as_bool, as_f64, as_i64};

use self::number::{format_integer, format_number};

// ── String-table keys emitted by the formatter ─────────────────────

pub const TRUE_KEY: &str = "common.true";
pub const FALSE_KEY: &str = "common.false";
pub const VOLTAGE_KEY: &str = "units.voltage";

const METERS_PER_KILOMETER: f64 = 1000.0;
const METERS_PER_MILE: f64 = 1609.0;
const MINUTES_PER_DAY: i64 = 1440;

/// The string-table key for a boolean reading.
pub const fn bool_key(value: bool) -> &'static str {
    if value { TRUE_KEY } else { FALSE_KEY }
}

/// The string-table key a field's rendering depends on, if any.
///
/// Boolean fields resolve to `common.true`/`common.false`, voltage to its
/// unit label. Every other category is rendered without the string table.
pub fn lookup_key(field: &str, value: &Value) -> Option<&'static str> {
    match FieldCategory::of(field) {
        FieldCategory::Boolean => as_bool(value).map(bool_key),
        FieldCategory::Voltage => Some(VOLTAGE_KEY),
        _ => None,
    }
}

// ── Context ─────────────────────────────────────────────────────────

/// Everything the formatter needs besides the field itself.
#[derive(Clone, Copy)]
pub struct FormatContext<'a> {
    pub locale: &'a Locale,
    pub units: UnitSystem,
    pub utc_offset: FixedOffset,
    pub strings: &'a dyn Localize,
}

impl<'a> FormatContext<'a> {
    /// A context rendering timestamps in UTC.
    pub fn new(locale: &'a Locale, units: UnitSystem, strings: &'a dyn Localize) -> Self {
        Self {
            locale,
            units,
            utc_offset: Utc.fix(),
            strings,
        }
    }

    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    /// Shorthand for [`format_value`] with this context.
    pub fn format(&self, field: &str, value: Option<&Value>) -> String {
        format_value(field, value, self)
    }

    /// Shorthand for a string-table lookup with a literal fallback.
    pub fn localize_or(&self, key: &str, fallback: &str) -> String {
        self.strings.localize_or(key, fallback)
    }

    pub fn profile(&self) -> &'static LocaleProfile {
        self.locale.profile()
    }
}

impl std::fmt::Debug for FormatContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormatContext")
            .field("locale", &self.locale.tag())
            .field("units", &self.units)
            .field("utc_offset", &self.utc_offset)
            .finish_non_exhaustive()
    }
}

/// Owns the locale and string tables a [`FormatContext`] borrows.
#[derive(Debug, Clone)]
pub struct Formatter {
    pub locale: Locale,
    pub units: UnitSystem,
    pub utc_offset: FixedOffset,
    pub translations: Translations,
}

impl Formatter {
    /// A formatter for `language`, falling back to the default locale when
    /// the tag is unsupported.
    pub fn new(language: &str, units: UnitSystem) -> Self {
        let locale = Locale::resolve(language);
        let translations = Translations::new(locale.tag());
        Self {
            locale,
            units,
            utc_offset: Utc.fix(),
            translations,
        }
    }

    pub fn with_utc_offset(mut self, offset: FixedOffset) -> Self {
        self.utc_offset = offset;
        self
    }

    pub fn context(&self) -> FormatContext<'_> {
        FormatContext::new(&self.locale, self.units, &self.translations)
            .with_utc_offset(self.utc_offset)
    }
}

impl Default for Formatter {
    fn default() -> Self {
        Self::new(crate::model::DEFAULT_LANG, UnitSystem::default())
    }
}

// ── Formatting ──────────────────────────────────────────────────────

/// Render one canonical field for display.
///
/// Absent and `null` values are the placeholder, whatever the field.
/// Values that cannot be read as the field's category are the placeholder
/// too.
pub fn format_value(field: &str, value: Option<&Value>, ctx: &FormatContext<'_>) -> String {
    let Some(value) = value.filter(|v| !v.is_null()) else {
        return PLACEHOLDER.to_owned();
    };

    let category = FieldCategory::of(field);
    let rendered = match category {
        FieldCategory::Distance => distance(value, ctx),
        FieldCategory::Temperature => temperature(value, ctx),
        FieldCategory::Percent => percent(value, ctx),
        FieldCategory::Voltage => as_f64(value).map(|v| {
            format!(
                "{} {}",
                format_number(v, ctx.profile()),
                ctx.localize_or(VOLTAGE_KEY, "V")
            )
        }),
        FieldCategory::Angle => {
            as_f64(value).map(|v| ctx.profile().degree.apply(v, &format_number(v, ctx.profile())))
        }
        FieldCategory::Counter => as_f64(value).map(|v| format_number(v, ctx.profile())),
        FieldCategory::Duration => duration(value, ctx),
        FieldCategory::Timestamp => {
            let rendered = datetime::parse_timestamp(value)
                .map(|dt| datetime::render(dt, ctx.utc_offset, &ctx.profile().datetime));
            if rendered.is_none() {
                warn!(field, value = %value, "value is not a valid date-time");
            }
            rendered
        }
        FieldCategory::Boolean => as_bool(value).map(|b| {
            let fallback = if b { "true" } else { "false" };
            ctx.localize_or(bool_key(b), fallback)
        }),
        FieldCategory::RainDelay => rain_delay(value),
        FieldCategory::Generic => generic(value, ctx),
    };

    rendered.unwrap_or_else(|| {
        debug!(field, %category, value = %value, "unrenderable value");
        PLACEHOLDER.to_owned()
    })
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn percent(value: &Value, ctx: &FormatContext<'_>) -> Option<String> {
    let n = as_i64(value)?;
    let profile = ctx.profile();
    Some(profile.percent.apply(n as f64, &format_integer(n, profile)))
}

#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn distance(value: &Value, ctx: &FormatContext<'_>) -> Option<String> {
    let meters = as_i64(value)? as f64;
    let profile = ctx.profile();
    Some(match ctx.units.length {
        LengthUnit::Kilometers => {
            let km = meters / METERS_PER_KILOMETER;
            profile.kilometer.apply(km, &format_number(km, profile))
        }
        LengthUnit::Miles => {
            let mi = meters / METERS_PER_MILE;
            profile.mile.apply(mi, &format_number(mi, profile))
        }
    })
}

/// Readings arrive in Celsius; Fahrenheit is converted, not just relabelled.
fn temperature(value: &Value, ctx: &FormatContext<'_>) -> Option<String> {
    let celsius = as_f64(value)?;
    let profile = ctx.profile();
    Some(match ctx.units.temperature {
        TemperatureUnit::Celsius => profile.celsius.apply(celsius, &format_number(celsius, profile)),
        TemperatureUnit::Fahrenheit => {
            let f = celsius * 9.0 / 5.0 + 32.0;
            profile.fahrenheit.apply(f, &format_number(f, profile))
        }
    })
}

/// Minutes as `"<d> <h> <m>"`, zero components omitted.
#[allow(clippy::cast_precision_loss, clippy::as_conversions)]
fn duration(value: &Value, ctx: &FormatContext<'_>) -> Option<String> {
    let total = as_i64(value).filter(|n| *n >= 0)?;
    let profile = ctx.profile();

    let days = total / MINUTES_PER_DAY;
    let hours = (total % MINUTES_PER_DAY) / 60;
    let minutes = total % 60;

    let parts: Vec<String> = [
        (days, &profile.day),
        (hours, &profile.hour),
        (minutes, &profile.minute),
    ]
    .into_iter()
    .filter(|(n, _)| *n != 0)
    .map(|(n, pattern)| pattern.apply(n as f64, &format_integer(n, profile)))
    .collect();

    Some(parts.join(" "))
}

/// Seconds as `m:ss`.
fn rain_delay(value: &Value) -> Option<String> {
    let total = as_i64(value).filter(|n| *n >= 0)?;
    let minutes = total / 60;
    let seconds = total % 60;

    let minutes = if minutes == 0 { "0".to_owned() } else { minutes.to_string() };
    let seconds = if seconds == 0 { "00".to_owned() } else { format!("{seconds:02}") };
    Some(format!("{minutes}:{seconds}"))
}

fn generic(value: &Value, ctx: &FormatContext<'_>) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => n.as_f64().map(|v| format_number(v, ctx.profile())),
        Value::String(s) => Some(s.clone()),
        Value::Array(items) => Some(
            items
                .iter()
                .filter_map(|item| generic(item, ctx))
                .collect::<Vec<_>>()
                .join(", "),
        ),
        Value::Object(_) => None,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn fmt(field: &str, value: Value) -> String {
        let formatter = Formatter::default();
        formatter.context().format(field, Some(&value))
    }

    fn fmt_with(formatter: &Formatter, field: &str, value: Value) -> String {
        formatter.context().format(field, Some(&value))
    }

    #[test]
    fn zero_percent_is_a_reading() {
        assert_eq!(fmt("daily_progress", json!(0)), "0%");
        assert_eq!(fmt("battery_level", json!(87)), "87%");
        assert_eq!(fmt("torque", json!("-12")), "-12%");
    }

    #[test]
    fn null_and_absent_are_the_placeholder() {
        let formatter = Formatter::default();
        let ctx = formatter.context();
        for field in ["distance", "worktime_total", "charging", "raindelay", "model", "last_update"] {
            assert_eq!(ctx.format(field, Some(&Value::Null)), PLACEHOLDER, "{field}");
            assert_eq!(ctx.format(field, None), PLACEHOLDER, "{field}");
        }
    }

    #[test]
    fn durations_skip_zero_components() {
        assert_eq!(fmt("worktime_total", json!(90)), "1 hr 30 min");
        assert_eq!(fmt("worktime_total", json!(0)), "");
        assert_eq!(fmt("total_on", json!(1440)), "1 day");
        assert_eq!(fmt("total_on", json!(2 * 1440 + 5)), "2 days 5 min");
        assert_eq!(fmt("remaining", json!(60)), "1 hr");
        assert_eq!(fmt("reset_at", json!(-5)), PLACEHOLDER);
    }

    #[test]
    fn rain_delay_is_minutes_and_seconds() {
        assert_eq!(fmt("raindelay", json!(95)), "1:35");
        assert_eq!(fmt("delay", json!(0)), "0:00");
        assert_eq!(fmt("delay", json!(60)), "1:00");
        assert_eq!(fmt("delay", json!(30)), "0:30");
        assert_eq!(fmt("delay", json!(65)), "1:05");
        assert_eq!(fmt("delay", json!("soon")), PLACEHOLDER);
    }

    #[test]
    fn unsupported_locale_formats_like_the_default() {
        let fallback = Formatter::new("Test", UnitSystem::metric());
        let default = Formatter::default();
        for (field, value) in [
            ("distance", json!(12_345)),
            ("worktime_total", json!(90)),
            ("voltage", json!(19.8)),
            ("last_update", json!("2024-03-05T14:07:00Z")),
        ] {
            assert_eq!(
                fmt_with(&fallback, field, value.clone()),
                fmt_with(&default, field, value)
            );
        }
        assert_eq!(fallback.locale.tag(), crate::model::DEFAULT_LANG);
    }

    #[test]
    fn distance_follows_unit_system() {
        assert_eq!(fmt("distance", json!(12_345)), "12.345 km");
        assert_eq!(fmt("distance", json!("2500")), "2.5 km");
        let imperial = Formatter::new("en-GB", UnitSystem::imperial());
        assert_eq!(fmt_with(&imperial, "distance", json!(16_090)), "10 mi");
    }

    #[test]
    fn temperature_converts_to_fahrenheit() {
        assert_eq!(fmt("temperature", json!(21.5)), "21.5°C");
        let imperial = Formatter::new("en-GB", UnitSystem::imperial());
        assert_eq!(fmt_with(&imperial, "temperature", json!(20)), "68°F");
    }

    #[test]
    fn booleans_use_string_table_words() {
        assert_eq!(fmt("charging", json!(true)), "Yes");
        assert_eq!(fmt("locked", json!(false)), "No");
        let german = Formatter::new("de", UnitSystem::metric());
        assert_eq!(fmt_with(&german, "online", json!(1)), "Ja");
        assert_eq!(lookup_key("party_mode_enabled", &json!(false)), Some(FALSE_KEY));
        assert_eq!(lookup_key("voltage", &json!(20)), Some(VOLTAGE_KEY));
        assert_eq!(lookup_key("model", &json!("x")), None);
    }

    #[test]
    fn voltage_angle_and_counters() {
        assert_eq!(fmt("voltage", json!(19.84)), "19.84 V");
        assert_eq!(fmt("pitch", json!(-2.5)), "-2.5 deg");
        assert_eq!(fmt("total", json!(1234)), "1,234");
        let german = Formatter::new("de-DE", UnitSystem::metric());
        assert_eq!(fmt_with(&german, "voltage", json!(19.84)), "19,84 V");
        assert_eq!(fmt_with(&german, "daily_progress", json!(40)), "40 %");
    }

    #[test]
    fn unparsable_timestamp_is_the_placeholder() {
        assert_eq!(fmt("next_scheduled_start", json!("tomorrow-ish")), PLACEHOLDER);
        assert_eq!(fmt("reset_time", json!(crate::model::EPOCH)), "01/01/1970, 00:00");
    }

    #[test]
    fn timestamps_honor_the_offset() {
        let formatter =
            Formatter::default().with_utc_offset(FixedOffset::east_opt(2 * 3600).unwrap());
        assert_eq!(
            fmt_with(&formatter, "state_updated_at", json!("2024-06-01T08:00:00Z")),
            "01/06/2024, 10:00"
        );
    }

    #[test]
    fn generic_values() {
        assert_eq!(fmt("start", json!("10:00")), "10:00");
        assert_eq!(fmt("model", json!(4567.5)), "4,567.5");
        assert_eq!(fmt("zone", json!([1, 2, 3])), "1, 2, 3");
        assert_eq!(fmt("anything", json!({"a": 1})), PLACEHOLDER);
    }

    #[test]
    fn repeated_calls_are_identical() {
        let a = fmt("worktime_blades_on", json!(12_345));
        let b = fmt("worktime_blades_on", json!(12_345));
        assert_eq!(a, b);
        assert_eq!(a, "8 days 13 hr 45 min");
    }
}
