//! Sources of a single position fix.
//!
//! A terminal has no location service of its own, so the position comes
//! either from configuration or from an IP-based lookup.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::{error::GeolocationError, model::GeoCoordinates};

pub const DEFAULT_GEOLOCATION_URL: &str = "http://ip-api.com/json";

/// One-shot "get current position". No tracking, no caching.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Geolocator: Send + Sync {
    async fn current_position(&self) -> Result<GeoCoordinates, GeolocationError>;
}

#[async_trait]
impl<T: Geolocator + ?Sized> Geolocator for Box<T> {
    async fn current_position(&self) -> Result<GeoCoordinates, GeolocationError> {
        (**self).current_position().await
    }
}

/// Always answers with the coordinates it was built with.
#[derive(Debug, Clone, Copy)]
pub struct FixedGeolocator {
    coordinates: GeoCoordinates,
}

impl FixedGeolocator {
    pub fn new(coordinates: GeoCoordinates) -> Self {
        Self { coordinates }
    }
}

#[async_trait]
impl Geolocator for FixedGeolocator {
    async fn current_position(&self) -> Result<GeoCoordinates, GeolocationError> {
        Ok(self.coordinates)
    }
}

/// Stands in for a user who has refused location access.
#[derive(Debug, Clone, Copy, Default)]
pub struct DisabledGeolocator;

#[async_trait]
impl Geolocator for DisabledGeolocator {
    async fn current_position(&self) -> Result<GeoCoordinates, GeolocationError> {
        Err(GeolocationError::PermissionDenied(
            "location lookup is disabled in configuration".to_string(),
        ))
    }
}

/// Approximate position from the public IP address.
#[derive(Debug, Clone)]
pub struct IpGeolocator {
    endpoint: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct IpApiResponse {
    status: String,
    message: Option<String>,
    lat: Option<f64>,
    lon: Option<f64>,
}

impl IpGeolocator {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Result<Self, GeolocationError> {
        let http = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GeolocationError::PositionUnavailable(e.to_string()))?;

        Ok(Self { endpoint: endpoint.into(), http })
    }
}

#[async_trait]
impl Geolocator for IpGeolocator {
    async fn current_position(&self) -> Result<GeoCoordinates, GeolocationError> {
        debug!(endpoint = %self.endpoint, "looking up position from IP address");

        let res = self.http.get(&self.endpoint).send().await.map_err(map_transport_error)?;

        let status = res.status();
        if !status.is_success() {
            return Err(GeolocationError::PositionUnavailable(format!(
                "lookup failed with status {status}"
            )));
        }

        let body: IpApiResponse = res.json().await.map_err(map_transport_error)?;

        if body.status != "success" {
            return Err(GeolocationError::PositionUnavailable(
                body.message.unwrap_or_else(|| format!("lookup status '{}'", body.status)),
            ));
        }

        let (Some(lat), Some(lon)) = (body.lat, body.lon) else {
            return Err(GeolocationError::PositionUnavailable(
                "lookup response carried no coordinates".to_string(),
            ));
        };

        GeoCoordinates::new(lat, lon)
            .map_err(|e| GeolocationError::PositionUnavailable(e.to_string()))
    }
}

fn map_transport_error(err: reqwest::Error) -> GeolocationError {
    if err.is_timeout() {
        GeolocationError::Timeout
    } else {
        GeolocationError::PositionUnavailable(err.to_string())
    }
}
