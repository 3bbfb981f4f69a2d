// ── Locale resolution and formatting profiles ──
//
// Each supported locale carries the handful of conventions the card needs:
// number separators, short unit patterns and the short date/time layout.
// Patterns use `{n}` for the already-localized number.

use std::fmt;

use tracing::debug;

use crate::model::common::DEFAULT_LANG;

/// Singular/plural pair of a unit pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnitPattern {
    pub one: &'static str,
    pub other: &'static str,
}

impl UnitPattern {
    const fn same(pattern: &'static str) -> Self {
        Self {
            one: pattern,
            other: pattern,
        }
    }

    const fn plural(one: &'static str, other: &'static str) -> Self {
        Self { one, other }
    }

    /// Fill in the localized number, picking the plural form by `count`.
    pub fn apply(&self, count: f64, number: &str) -> String {
        #[allow(clippy::float_cmp)]
        let pattern = if count == 1.0 { self.one } else { self.other };
        pattern.replace("{n}", number)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DateOrder {
    DayMonthYear,
    MonthDayYear,
    YearMonthDay,
}

/// Short date + short time layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateTimeStyle {
    pub order: DateOrder,
    pub separator: char,
    /// Zero-pad day and month.
    pub padded: bool,
    pub two_digit_year: bool,
    /// Text between the date and the time.
    pub joiner: &'static str,
    pub hour12: bool,
}

/// Formatting conventions of one locale.
#[derive(Debug, PartialEq, Eq)]
pub struct LocaleProfile {
    pub tag: &'static str,
    pub decimal: char,
    pub group: char,
    /// Integer digits required before grouping kicks in.
    pub min_grouping: usize,
    pub percent: UnitPattern,
    pub celsius: UnitPattern,
    pub fahrenheit: UnitPattern,
    pub degree: UnitPattern,
    pub kilometer: UnitPattern,
    pub mile: UnitPattern,
    pub day: UnitPattern,
    pub hour: UnitPattern,
    pub minute: UnitPattern,
    pub datetime: DateTimeStyle,
}

const EN_GB: LocaleProfile = LocaleProfile {
    tag: "en-GB",
    decimal: '.',
    group: ',',
    min_grouping: 4,
    percent: UnitPattern::same("{n}%"),
    celsius: UnitPattern::same("{n}°C"),
    fahrenheit: UnitPattern::same("{n}°F"),
    degree: UnitPattern::same("{n} deg"),
    kilometer: UnitPattern::same("{n} km"),
    mile: UnitPattern::same("{n} mi"),
    day: UnitPattern::plural("{n} day", "{n} days"),
    hour: UnitPattern::same("{n} hr"),
    minute: UnitPattern::same("{n} min"),
    datetime: DateTimeStyle {
        order: DateOrder::DayMonthYear,
        separator: '/',
        padded: true,
        two_digit_year: false,
        joiner: ", ",
        hour12: false,
    },
};

/// Supported locales. The first entry is the fallback.
static PROFILES: &[LocaleProfile] = &[
    EN_GB,
    LocaleProfile {
        tag: "en",
        datetime: DateTimeStyle {
            order: DateOrder::MonthDayYear,
            separator: '/',
            padded: false,
            two_digit_year: true,
            joiner: ", ",
            hour12: true,
        },
        ..EN_GB
    },
    LocaleProfile {
        tag: "de",
        decimal: ',',
        group: '.',
        min_grouping: 4,
        percent: UnitPattern::same("{n} %"),
        celsius: UnitPattern::same("{n} °C"),
        fahrenheit: UnitPattern::same("{n} °F"),
        degree: UnitPattern::same("{n}°"),
        kilometer: UnitPattern::same("{n} km"),
        mile: UnitPattern::same("{n} mi"),
        day: UnitPattern::same("{n} Tg."),
        hour: UnitPattern::same("{n} Std."),
        minute: UnitPattern::same("{n} Min."),
        datetime: DateTimeStyle {
            order: DateOrder::DayMonthYear,
            separator: '.',
            padded: true,
            two_digit_year: true,
            joiner: ", ",
            hour12: false,
        },
    },
    LocaleProfile {
        tag: "fr",
        decimal: ',',
        group: '\u{202f}',
        min_grouping: 4,
        percent: UnitPattern::same("{n}\u{a0}%"),
        celsius: UnitPattern::same("{n}\u{a0}°C"),
        fahrenheit: UnitPattern::same("{n}\u{a0}°F"),
        degree: UnitPattern::same("{n}°"),
        kilometer: UnitPattern::same("{n}\u{a0}km"),
        mile: UnitPattern::same("{n}\u{a0}mi"),
        day: UnitPattern::same("{n}\u{a0}j"),
        hour: UnitPattern::same("{n}\u{a0}h"),
        minute: UnitPattern::same("{n}\u{a0}min"),
        datetime: DateTimeStyle {
            order: DateOrder::DayMonthYear,
            separator: '/',
            padded: true,
            two_digit_year: false,
            joiner: " ",
            hour12: false,
        },
    },
    LocaleProfile {
        tag: "it",
        decimal: ',',
        group: '.',
        min_grouping: 4,
        percent: UnitPattern::same("{n}%"),
        celsius: UnitPattern::same("{n}°C"),
        fahrenheit: UnitPattern::same("{n}°F"),
        degree: UnitPattern::same("{n}°"),
        kilometer: UnitPattern::same("{n} km"),
        mile: UnitPattern::same("{n} mi"),
        day: UnitPattern::same("{n} g"),
        hour: UnitPattern::same("{n} h"),
        minute: UnitPattern::same("{n} min"),
        datetime: DateTimeStyle {
            order: DateOrder::DayMonthYear,
            separator: '/',
            padded: true,
            two_digit_year: true,
            joiner: ", ",
            hour12: false,
        },
    },
    LocaleProfile {
        tag: "nl",
        decimal: ',',
        group: '.',
        min_grouping: 4,
        percent: UnitPattern::same("{n}%"),
        celsius: UnitPattern::same("{n} °C"),
        fahrenheit: UnitPattern::same("{n} °F"),
        degree: UnitPattern::same("{n}°"),
        kilometer: UnitPattern::same("{n} km"),
        mile: UnitPattern::same("{n} mi"),
        day: UnitPattern::plural("{n} dag", "{n} dagen"),
        hour: UnitPattern::same("{n} uur"),
        minute: UnitPattern::same("{n} min"),
        datetime: DateTimeStyle {
            order: DateOrder::DayMonthYear,
            separator: '-',
            padded: false,
            two_digit_year: false,
            joiner: ", ",
            hour12: false,
        },
    },
    LocaleProfile {
        tag: "es",
        decimal: ',',
        group: '.',
        min_grouping: 5,
        percent: UnitPattern::same("{n}\u{a0}%"),
        celsius: UnitPattern::same("{n} °C"),
        fahrenheit: UnitPattern::same("{n} °F"),
        degree: UnitPattern::same("{n}°"),
        kilometer: UnitPattern::same("{n} km"),
        mile: UnitPattern::same("{n} mi"),
        day: UnitPattern::same("{n} d"),
        hour: UnitPattern::same("{n} h"),
        minute: UnitPattern::same("{n} min"),
        datetime: DateTimeStyle {
            order: DateOrder::DayMonthYear,
            separator: '/',
            padded: false,
            two_digit_year: true,
            joiner: ", ",
            hour12: false,
        },
    },
    LocaleProfile {
        tag: "pl",
        decimal: ',',
        group: '\u{a0}',
        min_grouping: 5,
        percent: UnitPattern::same("{n}%"),
        celsius: UnitPattern::same("{n}°C"),
        fahrenheit: UnitPattern::same("{n}°F"),
        degree: UnitPattern::same("{n}°"),
        kilometer: UnitPattern::same("{n} km"),
        mile: UnitPattern::same("{n} mi"),
        day: UnitPattern::plural("{n} dzień", "{n} dni"),
        hour: UnitPattern::same("{n} godz."),
        minute: UnitPattern::same("{n} min"),
        datetime: DateTimeStyle {
            order: DateOrder::DayMonthYear,
            separator: '.',
            padded: true,
            two_digit_year: false,
            joiner: ", ",
            hour12: false,
        },
    },
    LocaleProfile {
        tag: "sv",
        decimal: ',',
        group: '\u{a0}',
        min_grouping: 4,
        percent: UnitPattern::same("{n}\u{a0}%"),
        celsius: UnitPattern::same("{n}\u{a0}°C"),
        fahrenheit: UnitPattern::same("{n}\u{a0}°F"),
        degree: UnitPattern::same("{n}°"),
        kilometer: UnitPattern::same("{n} km"),
        mile: UnitPattern::same("{n} mi"),
        day: UnitPattern::same("{n} d"),
        hour: UnitPattern::same("{n} tim"),
        minute: UnitPattern::same("{n} min"),
        datetime: DateTimeStyle {
            order: DateOrder::YearMonthDay,
            separator: '-',
            padded: true,
            two_digit_year: false,
            joiner: " ",
            hour12: false,
        },
    },
];

/// Tags of every supported locale.
pub fn supported_tags() -> impl Iterator<Item = &'static str> {
    PROFILES.iter().map(|p| p.tag)
}

// ── Tag handling ───────────────────────────────────────────────────

/// Canonical casing of a BCP-47 style tag, or `None` when malformed.
///
/// Only the shape is checked: a 2-3 letter language followed by 1-8
/// character alphanumeric subtags.
fn canonical_tag(raw: &str) -> Option<String> {
    let mut parts = raw.split('-');
    let language = parts.next()?;
    if !(2..=3).contains(&language.len()) || !language.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let mut tag = language.to_ascii_lowercase();
    for part in parts {
        if part.is_empty() || part.len() > 8 || !part.chars().all(|c| c.is_ascii_alphanumeric()) {
            return None;
        }
        tag.push('-');
        if part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()) {
            tag.push_str(&part.to_ascii_uppercase());
        } else {
            tag.push_str(part);
        }
    }
    Some(tag)
}

/// Decode a persisted language selection.
///
/// The selection may have been stored JSON-encoded (`"\"de\""`) or raw
/// (`de`). A JSON `null` means "nothing selected".
fn decode_stored(raw: &str) -> Option<String> {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(serde_json::Value::String(s)) => Some(s),
        Ok(_) => None,
        Err(_) => Some(raw.to_owned()),
    }
}

/// Pick the language tag to format with.
///
/// The persisted user selection wins, then the primary subtag of the
/// runtime's ambient language, then [`DEFAULT_LANG`]. Quotes are stripped
/// and the first underscore becomes a hyphen (`pt_BR` → `pt-BR`).
pub fn resolve_language(stored: Option<&str>, ambient: Option<&str>) -> String {
    let stored = stored.and_then(decode_stored).filter(|s| !s.is_empty());
    let ambient = ambient
        .and_then(|a| a.split('-').next())
        .filter(|a| !a.is_empty())
        .map(str::to_owned);

    stored
        .or(ambient)
        .unwrap_or_else(|| DEFAULT_LANG.to_owned())
        .replace(['\'', '"'], "")
        .replacen('_', "-", 1)
}

// ── Locale ─────────────────────────────────────────────────────────

/// A validated locale: the requested tag and the profile serving it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Locale {
    tag: String,
    profile: &'static LocaleProfile,
}

impl Locale {
    /// Validate `tag` against the supported profiles.
    ///
    /// An exact match wins, then a match on the language subtag alone.
    /// Returns `None` for malformed or unsupported tags.
    pub fn parse(tag: &str) -> Option<Self> {
        let tag = canonical_tag(tag.trim())?;
        let language = tag.split('-').next().unwrap_or_default();

        let profile = PROFILES
            .iter()
            .find(|p| p.tag == tag)
            .or_else(|| PROFILES.iter().find(|p| p.tag == language))?;

        Some(Self { tag, profile })
    }

    /// Like [`Locale::parse`], falling back to [`DEFAULT_LANG`].
    pub fn resolve(tag: &str) -> Self {
        Self::parse(tag).unwrap_or_else(|| {
            debug!(tag, fallback = DEFAULT_LANG, "unsupported locale tag");
            Self::default()
        })
    }

    /// The tag as requested, canonically cased.
    pub fn tag(&self) -> &str {
        &self.tag
    }

    /// The primary language subtag (`de` for `de-AT`).
    pub fn language(&self) -> &str {
        self.tag.split('-').next().unwrap_or(&self.tag)
    }

    pub fn profile(&self) -> &'static LocaleProfile {
        self.profile
    }
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            tag: DEFAULT_LANG.to_owned(),
            profile: &PROFILES[0],
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.tag)
    }
}
