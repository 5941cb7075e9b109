//! Core library for the `weather` CLI.
//!
//! This crate defines:
//! - The WMO weather code classification table and the compass converter
//! - Position sources and the Open-Meteo forecast provider
//! - The page that ties them together and its text rendering
//! - Configuration and the error taxonomy
//!
//! It is used by `weather-cli`, but can also be reused by other binaries or services.

pub mod classification;
pub mod compass;
pub mod config;
pub mod error;
pub mod geolocation;
pub mod model;
pub mod page;
pub mod presentation;
pub mod provider;

pub use classification::{IconId, WeatherCodeEntry, classify};
pub use compass::{CompassPoint, convert_wind_direction};
pub use config::{Config, LocationMode};
pub use error::{ClassificationError, FetchError, GeolocationError, WeatherError};
pub use geolocation::{DisabledGeolocator, FixedGeolocator, Geolocator, IpGeolocator};
pub use model::{CurrentWeatherReading, DailySummary, ForecastResponse, GeoCoordinates};
pub use page::{PageState, WeatherPage};
pub use provider::{ForecastRequest, OpenMeteoProvider, WeatherProvider};
