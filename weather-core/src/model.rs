use anyhow::{Result, bail};
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{Deserialize, Serialize};

use crate::error::FetchError;

/// Open-Meteo reports local times without seconds or offset.
const LOCAL_TIME_FORMAT: &str = "%Y-%m-%dT%H:%M";

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoCoordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl GeoCoordinates {
    /// Build coordinates, rejecting values outside the WGS84 ranges.
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        if !(-90.0..=90.0).contains(&latitude) {
            bail!("Latitude {latitude} is out of range (-90..=90)");
        }
        if !(-180.0..=180.0).contains(&longitude) {
            bail!("Longitude {longitude} is out of range (-180..=180)");
        }

        Ok(Self { latitude, longitude })
    }
}

impl std::fmt::Display for GeoCoordinates {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.latitude, self.longitude)
    }
}

/// The single point-in-time observation shown on the page.
#[derive(Debug, Clone, PartialEq)]
pub struct CurrentWeatherReading {
    pub temperature_celsius: f64,
    pub wind_speed_mps: f64,
    pub wind_direction_degrees: f64,
    pub weather_code: u8,
    pub observed_at: DateTime<FixedOffset>,
}

/// Today's aggregates from the `daily` block.
#[derive(Debug, Clone, PartialEq)]
pub struct DailySummary {
    pub temperature_max: f64,
    pub temperature_min: f64,
    pub sunrise: String,
    pub sunset: String,
    pub uv_index_max: f64,
}

/// Full Open-Meteo forecast document for the request built by
/// [`crate::provider::ForecastRequest`].
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub latitude: f64,
    pub longitude: f64,
    #[serde(default)]
    pub generationtime_ms: f64,
    #[serde(default)]
    pub utc_offset_seconds: i32,
    #[serde(default)]
    pub timezone: String,
    #[serde(default)]
    pub timezone_abbreviation: String,
    #[serde(default)]
    pub elevation: f64,
    pub current_weather: CurrentWeatherBlock,
    #[serde(default)]
    pub hourly_units: Option<HourlyUnits>,
    #[serde(default)]
    pub hourly: Option<HourlyBlock>,
    #[serde(default)]
    pub daily_units: Option<DailyUnits>,
    #[serde(default)]
    pub daily: Option<DailyBlock>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CurrentWeatherBlock {
    pub temperature: f64,
    pub windspeed: f64,
    pub winddirection: f64,
    pub weathercode: u8,
    pub time: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HourlyUnits {
    pub time: String,
    pub temperature_2m: String,
    pub apparent_temperature: String,
    pub precipitation_probability: String,
    pub precipitation: String,
    pub windspeed_10m: String,
    pub winddirection_10m: String,
}

/// Hourly series. Open-Meteo reports missing values as `null`.
#[derive(Debug, Clone, Deserialize)]
pub struct HourlyBlock {
    pub time: Vec<String>,
    pub temperature_2m: Vec<Option<f64>>,
    pub apparent_temperature: Vec<Option<f64>>,
    pub precipitation_probability: Vec<Option<f64>>,
    pub precipitation: Vec<Option<f64>>,
    pub windspeed_10m: Vec<Option<f64>>,
    pub winddirection_10m: Vec<Option<f64>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyUnits {
    pub time: String,
    pub weathercode: String,
    pub temperature_2m_max: String,
    pub temperature_2m_min: String,
    pub sunrise: String,
    pub sunset: String,
    pub uv_index_max: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DailyBlock {
    pub time: Vec<String>,
    pub weathercode: Vec<Option<u8>>,
    pub temperature_2m_max: Vec<Option<f64>>,
    pub temperature_2m_min: Vec<Option<f64>>,
    pub sunrise: Vec<Option<String>>,
    pub sunset: Vec<Option<String>>,
    pub uv_index_max: Vec<Option<f64>>,
}

impl ForecastResponse {
    /// Extract the current-conditions reading, stamping it with the
    /// location's UTC offset.
    pub fn to_reading(&self) -> std::result::Result<CurrentWeatherReading, FetchError> {
        let current = &self.current_weather;

        let offset = FixedOffset::east_opt(self.utc_offset_seconds)
            .ok_or_else(|| FetchError::InvalidTimestamp(current.time.clone()))?;

        let observed_at = NaiveDateTime::parse_from_str(&current.time, LOCAL_TIME_FORMAT)
            .ok()
            .and_then(|local| local.and_local_timezone(offset).single())
            .ok_or_else(|| FetchError::InvalidTimestamp(current.time.clone()))?;

        Ok(CurrentWeatherReading {
            temperature_celsius: current.temperature,
            wind_speed_mps: current.windspeed,
            wind_direction_degrees: current.winddirection,
            weather_code: current.weathercode,
            observed_at,
        })
    }

    /// First day of the `daily` block. `None` if the block is absent or
    /// any of its first values is missing.
    pub fn daily_summary(&self) -> Option<DailySummary> {
        let daily = self.daily.as_ref()?;

        Some(DailySummary {
            temperature_max: (*daily.temperature_2m_max.first()?)?,
            temperature_min: (*daily.temperature_2m_min.first()?)?,
            sunrise: daily.sunrise.first()?.clone()?,
            sunset: daily.sunset.first()?.clone()?,
            uv_index_max: (*daily.uv_index_max.first()?)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, Timelike};

    fn sample() -> serde_json::Value {
        serde_json::json!({
            "latitude": 59.33,
            "longitude": 18.06,
            "generationtime_ms": 0.5,
            "utc_offset_seconds": 7200,
            "timezone": "Europe/Stockholm",
            "timezone_abbreviation": "CEST",
            "elevation": 20.0,
            "current_weather": {
                "temperature": 14.2,
                "windspeed": 3.4,
                "winddirection": 225.0,
                "weathercode": 3,
                "time": "2024-06-01T12:00"
            },
            "daily": {
                "time": ["2024-06-01"],
                "weathercode": [3],
                "temperature_2m_max": [17.5],
                "temperature_2m_min": [9.1],
                "sunrise": ["2024-06-01T03:38"],
                "sunset": ["2024-06-01T21:54"],
                "uv_index_max": [5.2]
            }
        })
    }

    #[test]
    fn reading_from_current_weather() {
        let resp: ForecastResponse = serde_json::from_value(sample()).unwrap();
        let reading = resp.to_reading().unwrap();

        assert_eq!(reading.weather_code, 3);
        assert!((reading.temperature_celsius - 14.2).abs() < f64::EPSILON);
        assert!((reading.wind_speed_mps - 3.4).abs() < f64::EPSILON);
        assert!((reading.wind_direction_degrees - 225.0).abs() < f64::EPSILON);
        assert_eq!(reading.observed_at.offset().local_minus_utc(), 7200);
        assert_eq!(reading.observed_at.day(), 1);
        assert_eq!(reading.observed_at.hour(), 12);
    }

    #[test]
    fn malformed_time_is_rejected() {
        let mut value = sample();
        value["current_weather"]["time"] = serde_json::json!("yesterday");
        let resp: ForecastResponse = serde_json::from_value(value).unwrap();

        assert!(matches!(resp.to_reading(), Err(FetchError::InvalidTimestamp(t)) if t == "yesterday"));
    }

    #[test]
    fn daily_summary_takes_first_day() {
        let resp: ForecastResponse = serde_json::from_value(sample()).unwrap();
        let summary = resp.daily_summary().unwrap();

        assert!((summary.temperature_max - 17.5).abs() < f64::EPSILON);
        assert!((summary.temperature_min - 9.1).abs() < f64::EPSILON);
        assert_eq!(summary.sunrise, "2024-06-01T03:38");
        assert_eq!(summary.sunset, "2024-06-01T21:54");
    }

    #[test]
    fn daily_summary_absent_without_daily_block() {
        let mut value = sample();
        value.as_object_mut().unwrap().remove("daily");
        let resp: ForecastResponse = serde_json::from_value(value).unwrap();

        assert!(resp.daily_summary().is_none());
    }

    #[test]
    fn null_daily_value_keeps_reading_and_drops_summary() {
        let mut value = sample();
        value["daily"]["uv_index_max"] = serde_json::json!([null]);
        value["hourly"] = serde_json::json!({
            "time": ["2024-06-01T00:00"],
            "temperature_2m": [null],
            "apparent_temperature": [8.9],
            "precipitation_probability": [null],
            "precipitation": [0.0],
            "windspeed_10m": [2.1],
            "winddirection_10m": [null]
        });

        let resp: ForecastResponse = serde_json::from_value(value).unwrap();

        assert_eq!(resp.to_reading().unwrap().weather_code, 3);
        assert!(resp.daily_summary().is_none());
    }

    #[test]
    fn coordinates_are_range_checked() {
        assert!(GeoCoordinates::new(59.33, 18.06).is_ok());
        assert!(GeoCoordinates::new(91.0, 0.0).is_err());
        assert!(GeoCoordinates::new(0.0, -180.5).is_err());
    }
}
