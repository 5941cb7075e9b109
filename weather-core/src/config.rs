use anyhow::{Context, Result, anyhow};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::Path, path::PathBuf, time::Duration};

use crate::{
    geolocation::{
        DEFAULT_GEOLOCATION_URL, DisabledGeolocator, FixedGeolocator, Geolocator, IpGeolocator,
    },
    model::GeoCoordinates,
    provider::open_meteo::{DEFAULT_FORECAST_URL, OpenMeteoProvider},
};

/// Where the position fix comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LocationMode {
    /// Look the position up from the public IP address.
    #[default]
    Ip,
    /// Use the configured latitude/longitude.
    Fixed,
    /// Location access refused.
    Disabled,
}

impl LocationMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            LocationMode::Ip => "ip",
            LocationMode::Fixed => "fixed",
            LocationMode::Disabled => "disabled",
        }
    }

    pub const fn all() -> &'static [LocationMode] {
        &[LocationMode::Ip, LocationMode::Fixed, LocationMode::Disabled]
    }
}

impl std::fmt::Display for LocationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for LocationMode {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "ip" => Ok(LocationMode::Ip),
            "fixed" => Ok(LocationMode::Fixed),
            "disabled" => Ok(LocationMode::Disabled),
            _ => Err(anyhow!(
                "Unknown location mode '{value}'. Supported modes: ip, fixed, disabled."
            )),
        }
    }
}

/// Top-level configuration stored on disk.
///
/// Example TOML:
/// ```toml
/// location = "fixed"
/// latitude = 59.33
/// longitude = 18.06
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub location: LocationMode,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub forecast_url: String,
    pub geolocation_url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            location: LocationMode::default(),
            latitude: None,
            longitude: None,
            forecast_url: DEFAULT_FORECAST_URL.to_string(),
            geolocation_url: DEFAULT_GEOLOCATION_URL.to_string(),
            timeout_secs: 30,
        }
    }
}

impl Config {
    /// Load config from disk, or return an empty default if it doesn't exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_file_path()?)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            // First run: no config file, return defaults.
            return Ok(Self::default());
        }

        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        let cfg: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))?;

        Ok(cfg)
    }

    /// Save config to disk, creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_file_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml =
            toml::to_string_pretty(self).context("Failed to serialize configuration to TOML")?;

        fs::write(path, toml)
            .with_context(|| format!("Failed to write config file: {}", path.display()))?;

        Ok(())
    }

    /// Path to the config file.
    pub fn config_file_path() -> Result<PathBuf> {
        let dirs = ProjectDirs::from("dev", "weather-now", "weather-cli")
            .ok_or_else(|| anyhow!("Could not determine platform config directory"))?;

        Ok(dirs.config_dir().join("config.toml"))
    }

    /// Switch to fixed coordinates.
    pub fn set_fixed_location(&mut self, coordinates: GeoCoordinates) {
        self.location = LocationMode::Fixed;
        self.latitude = Some(coordinates.latitude);
        self.longitude = Some(coordinates.longitude);
    }

    /// Configured fixed coordinates, validated.
    pub fn fixed_coordinates(&self) -> Result<GeoCoordinates> {
        match (self.latitude, self.longitude) {
            (Some(lat), Some(lon)) => GeoCoordinates::new(lat, lon),
            _ => Err(anyhow!(
                "Location mode is 'fixed' but no coordinates are configured.\n\
                 Hint: run `weather configure` or pass --lat and --lon."
            )),
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Build the position source for the configured mode.
    pub fn geolocator(&self) -> Result<Box<dyn Geolocator>> {
        let boxed: Box<dyn Geolocator> = match self.location {
            LocationMode::Ip => Box::new(
                IpGeolocator::new(self.geolocation_url.clone(), self.timeout())
                    .context("Failed to build IP geolocation client")?,
            ),
            LocationMode::Fixed => Box::new(FixedGeolocator::new(self.fixed_coordinates()?)),
            LocationMode::Disabled => Box::new(DisabledGeolocator),
        };

        Ok(boxed)
    }

    pub fn provider(&self) -> Result<OpenMeteoProvider> {
        OpenMeteoProvider::new(self.forecast_url.clone(), self.timeout())
            .context("Failed to build Open-Meteo client")
    }
}
