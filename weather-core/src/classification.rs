//! WMO weather code classification as used by Open-Meteo.
//!
//! The table holds a description and a symbolic [`IconId`] per code. Turning
//! an icon id into something drawable is the job of the presentation layer.

use std::{collections::BTreeMap, sync::LazyLock};

use crate::error::ClassificationError;

/// Symbolic icon identifier. Several codes intentionally share one icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconId {
    ClearSky,
    MainlyClear,
    PartlyCloudy,
    Overcast,
    Fog,
    Rain,
    Snow,
    Thunderstorm,
}

impl IconId {
    pub fn as_str(&self) -> &'static str {
        match self {
            IconId::ClearSky => "clear-sky",
            IconId::MainlyClear => "mainly-clear",
            IconId::PartlyCloudy => "partly-cloudy",
            IconId::Overcast => "overcast",
            IconId::Fog => "fog",
            IconId::Rain => "rain",
            IconId::Snow => "snow",
            IconId::Thunderstorm => "thunderstorm",
        }
    }
}

impl std::fmt::Display for IconId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherCodeEntry {
    pub code: u8,
    pub description: &'static str,
    pub icon: IconId,
}

const ENTRIES: &[(u8, &str, IconId)] = &[
    (0, "Clear sky", IconId::ClearSky),
    (1, "Mainly clear", IconId::MainlyClear),
    (2, "Partly cloudy", IconId::PartlyCloudy),
    (3, "Overcast", IconId::Overcast),
    (45, "Fog", IconId::Fog),
    (48, "Depositing rime fog", IconId::Fog),
    (51, "Drizzle (light intensity)", IconId::Rain),
    (53, "Drizzle (moderate intensity)", IconId::Rain),
    (55, "Drizzle (dense intensity)", IconId::Rain),
    (56, "Freezing drizzle (light intensity)", IconId::Rain),
    (57, "Freezing drizzle (dense intensity)", IconId::Rain),
    (61, "Rain (slight intensity)", IconId::Rain),
    (63, "Rain (moderate intensity)", IconId::Rain),
    (65, "Rain (heavy intensity)", IconId::Rain),
    (66, "Freezing rain (light intensity)", IconId::Rain),
    (67, "Freezing rain (heavy intensity)", IconId::Rain),
    (71, "Snow fall (slight intensity)", IconId::Snow),
    (73, "Snow fall (moderate intensity)", IconId::Snow),
    (75, "Snow fall (heavy intensity)", IconId::Snow),
    (77, "Snow grains", IconId::Snow),
    (80, "Rain showers (slight intensity)", IconId::Rain),
    (81, "Rain showers (moderate intensity)", IconId::Rain),
    (82, "Rain showers (violent intensity)", IconId::Rain),
    (85, "Snow showers (slight intensity)", IconId::Snow),
    (86, "Snow showers (heavy intensity)", IconId::Snow),
    (95, "Thunderstorm (slight or moderate)", IconId::Thunderstorm),
    (96, "Thunderstorm with slight hail", IconId::Thunderstorm),
    (99, "Thunderstorm with heavy hail", IconId::Thunderstorm),
];

static TABLE: LazyLock<BTreeMap<u8, WeatherCodeEntry>> = LazyLock::new(|| {
    ENTRIES
        .iter()
        .map(|&(code, description, icon)| (code, WeatherCodeEntry { code, description, icon }))
        .collect()
});

/// Look up the description and icon for a weather code.
///
/// Codes outside the table are an error rather than a guessed fallback.
pub fn classify(code: u8) -> Result<&'static WeatherCodeEntry, ClassificationError> {
    TABLE.get(&code).ok_or(ClassificationError::MissingClassification(code))
}

/// All known entries in ascending code order.
pub fn known_codes() -> impl Iterator<Item = &'static WeatherCodeEntry> {
    TABLE.values()
}
