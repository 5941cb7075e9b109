use crate::{error::FetchError, model::ForecastResponse, model::GeoCoordinates};
use async_trait::async_trait;

pub mod open_meteo;

pub use open_meteo::OpenMeteoProvider;

pub const HOURLY_FIELDS: &[&str] = &[
    "temperature_2m",
    "apparent_temperature",
    "precipitation_probability",
    "precipitation",
    "windspeed_10m",
    "winddirection_10m",
];

pub const DAILY_FIELDS: &[&str] = &[
    "weathercode",
    "temperature_2m_max",
    "temperature_2m_min",
    "sunrise",
    "sunset",
    "uv_index_max",
];

/// Query for a one-day forecast with current conditions at a position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ForecastRequest {
    pub coordinates: GeoCoordinates,
}

impl ForecastRequest {
    pub fn for_coordinates(coordinates: GeoCoordinates) -> Self {
        Self { coordinates }
    }

    /// Query parameters in the order they are sent.
    pub fn query_pairs(&self) -> Vec<(&'static str, String)> {
        vec![
            ("latitude", self.coordinates.latitude.to_string()),
            ("longitude", self.coordinates.longitude.to_string()),
            ("hourly", HOURLY_FIELDS.join(",")),
            ("daily", DAILY_FIELDS.join(",")),
            ("current_weather", "true".to_string()),
            ("windspeed_unit", "ms".to_string()),
            ("forecast_days", "1".to_string()),
            ("timezone", "auto".to_string()),
        ]
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait WeatherProvider: Send + Sync {
    async fn fetch_forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse, FetchError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn query_contains_fixed_parameter_set_in_order() {
        let request = ForecastRequest::for_coordinates(GeoCoordinates::new(59.33, 18.06).unwrap());
        let pairs = request.query_pairs();

        let keys: Vec<&str> = pairs.iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            [
                "latitude",
                "longitude",
                "hourly",
                "daily",
                "current_weather",
                "windspeed_unit",
                "forecast_days",
                "timezone"
            ]
        );

        assert_eq!(pairs[0].1, "59.33");
        assert_eq!(pairs[1].1, "18.06");
        assert_eq!(
            pairs[2].1,
            "temperature_2m,apparent_temperature,precipitation_probability,precipitation,windspeed_10m,winddirection_10m"
        );
        assert_eq!(
            pairs[3].1,
            "weathercode,temperature_2m_max,temperature_2m_min,sunrise,sunset,uv_index_max"
        );
        assert_eq!(pairs[4].1, "true");
        assert_eq!(pairs[5].1, "ms");
        assert_eq!(pairs[6].1, "1");
        assert_eq!(pairs[7].1, "auto");
    }

    #[test]
    fn negative_coordinates_keep_sign() {
        let request = ForecastRequest::for_coordinates(GeoCoordinates::new(-33.87, -70.5).unwrap());
        let pairs = request.query_pairs();

        assert_eq!(pairs[0].1, "-33.87");
        assert_eq!(pairs[1].1, "-70.5");
    }
}
