use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use tracing::debug;

use crate::{error::FetchError, model::ForecastResponse};

use super::{ForecastRequest, WeatherProvider};

pub const DEFAULT_FORECAST_URL: &str = "https://api.open-meteo.com/v1/forecast";

#[derive(Debug, Clone)]
pub struct OpenMeteoProvider {
    endpoint: String,
    http: Client,
}

impl OpenMeteoProvider {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, FetchError> {
        let http = Client::builder().timeout(timeout).build().map_err(FetchError::Network)?;

        Ok(Self { endpoint: endpoint.into(), http })
    }
}

#[async_trait]
impl WeatherProvider for OpenMeteoProvider {
    async fn fetch_forecast(&self, request: &ForecastRequest) -> Result<ForecastResponse, FetchError> {
        debug!(endpoint = %self.endpoint, coordinates = %request.coordinates, "requesting forecast");

        let res = self
            .http
            .get(&self.endpoint)
            .query(&request.query_pairs())
            .send()
            .await
            .map_err(FetchError::Network)?;

        let status = res.status();
        let body = res.text().await.map_err(FetchError::Network)?;

        if !status.is_success() {
            return Err(FetchError::Status { status, body: truncate_body(&body) });
        }

        let parsed: ForecastResponse =
            serde_json::from_str(&body).map_err(FetchError::MalformedJson)?;

        debug!(
            timezone = %parsed.timezone,
            weathercode = parsed.current_weather.weathercode,
            "forecast received"
        );

        Ok(parsed)
    }
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX {
        let mut end = MAX;
        while !body.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &body[..end])
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_body_is_kept() {
        assert_eq!(truncate_body("Internal Server Error"), "Internal Server Error");
    }

    #[test]
    fn long_body_is_truncated() {
        let body = "x".repeat(500);
        let truncated = truncate_body(&body);
        assert_eq!(truncated.len(), 203);
        assert!(truncated.ends_with("..."));
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        let body = "°".repeat(150);
        let truncated = truncate_body(&body);
        assert!(truncated.ends_with("..."));
        assert!(truncated.len() <= 203);
    }
}
