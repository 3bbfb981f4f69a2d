// ── Unit system selection ──
//
// Mirrors the host's `unit_system` configuration: a length unit (`km` or
// `mi`) and a temperature unit (`°C` or `°F`), selected independently.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum LengthUnit {
    #[default]
    #[serde(rename = "km")]
    #[strum(serialize = "km")]
    Kilometers,
    #[serde(rename = "mi")]
    #[strum(serialize = "mi")]
    Miles,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum TemperatureUnit {
    #[default]
    #[serde(rename = "°C")]
    #[strum(serialize = "°C", serialize = "C")]
    Celsius,
    #[serde(rename = "°F")]
    #[strum(serialize = "°F", serialize = "F")]
    Fahrenheit,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitSystem {
    #[serde(default)]
    pub length: LengthUnit,
    #[serde(default)]
    pub temperature: TemperatureUnit,
}

impl UnitSystem {
    pub const fn metric() -> Self {
        Self {
            length: LengthUnit::Kilometers,
            temperature: TemperatureUnit::Celsius,
        }
    }

    pub const fn imperial() -> Self {
        Self {
            length: LengthUnit::Miles,
            temperature: TemperatureUnit::Fahrenheit,
        }
    }
}

impl FromStr for UnitSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" => Ok(Self::metric()),
            "imperial" | "us_customary" => Ok(Self::imperial()),
            other => Err(format!("expected 'metric' or 'imperial', got '{other}'")),
        }
    }
}
