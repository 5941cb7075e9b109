use reqwest::StatusCode;
use thiserror::Error;

/// Failure to obtain a position fix from the location source.
#[derive(Debug, Error)]
pub enum GeolocationError {
    #[error("Location access denied: {0}")]
    PermissionDenied(String),

    #[error("Position unavailable: {0}")]
    PositionUnavailable(String),

    #[error("Location request timed out")]
    Timeout,
}

/// Failure to retrieve or decode the forecast document.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("Failed to send request to Open-Meteo: {0}")]
    Network(#[source] reqwest::Error),

    #[error("Open-Meteo request failed with status {status}: {body}")]
    Status { status: StatusCode, body: String },

    #[error("Failed to parse Open-Meteo JSON: {0}")]
    MalformedJson(#[source] serde_json::Error),

    #[error("Invalid observation time '{0}'")]
    InvalidTimestamp(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ClassificationError {
    #[error("No classification for weather code {0}")]
    MissingClassification(u8),
}

/// Any failure that leaves the page in its loading state.
#[derive(Debug, Error)]
pub enum WeatherError {
    #[error(transparent)]
    Geolocation(#[from] GeolocationError),

    #[error(transparent)]
    Fetch(#[from] FetchError),

    #[error(transparent)]
    Classification(#[from] ClassificationError),
}
