//! The weather page: one position fix, one forecast request, one reading.

use tracing::{debug, error};

use crate::{
    classification::classify,
    error::WeatherError,
    geolocation::Geolocator,
    model::{CurrentWeatherReading, DailySummary},
    presentation,
    provider::{ForecastRequest, WeatherProvider},
};

#[derive(Debug, Clone, PartialEq)]
pub enum PageState {
    Loading,
    Ready(CurrentWeatherReading),
}

pub struct WeatherPage<G, P> {
    geolocator: G,
    provider: P,
    state: PageState,
    daily: Option<DailySummary>,
    show_daily: bool,
}

impl<G: Geolocator, P: WeatherProvider> WeatherPage<G, P> {
    pub fn new(geolocator: G, provider: P) -> Self {
        Self { geolocator, provider, state: PageState::Loading, daily: None, show_daily: false }
    }

    /// Also render today's high/low, sun times and UV index.
    pub fn with_daily_summary(mut self, show: bool) -> Self {
        self.show_daily = show;
        self
    }

    pub fn state(&self) -> &PageState {
        &self.state
    }

    pub fn reading(&self) -> Option<&CurrentWeatherReading> {
        match &self.state {
            PageState::Ready(reading) => Some(reading),
            PageState::Loading => None,
        }
    }

    /// Locate, fetch and store the current reading.
    ///
    /// Failures are logged once and leave the page loading. Once a reading
    /// is stored, further calls do nothing.
    pub async fn load(&mut self) -> &PageState {
        if matches!(self.state, PageState::Ready(_)) {
            debug!("reading already loaded, not fetching again");
            return &self.state;
        }

        match self.fetch_reading().await {
            Ok((reading, daily)) => {
                debug!(weather_code = reading.weather_code, observed_at = %reading.observed_at, "reading stored");
                if let Err(err) = classify(reading.weather_code) {
                    let err = WeatherError::from(err);
                    error!(error = %err, "cannot render current weather");
                }
                self.daily = daily;
                self.state = PageState::Ready(reading);
            }
            Err(err) => {
                error!(error = %err, "failed to load current weather");
            }
        }

        &self.state
    }

    async fn fetch_reading(
        &self,
    ) -> Result<(CurrentWeatherReading, Option<DailySummary>), WeatherError> {
        let coordinates = self.geolocator.current_position().await?;
        debug!(%coordinates, "position acquired");

        let request = ForecastRequest::for_coordinates(coordinates);
        let response = self.provider.fetch_forecast(&request).await?;

        let reading = response.to_reading()?;
        Ok((reading, response.daily_summary()))
    }

    /// Text for the current state. A weather code without a classification
    /// is shown as loading; the gap was already logged by [`Self::load`].
    pub fn render(&self) -> String {
        let PageState::Ready(reading) = &self.state else {
            return presentation::render_loading();
        };

        let daily = if self.show_daily { self.daily.as_ref() } else { None };

        presentation::render_reading(reading, daily)
            .unwrap_or_else(|_| presentation::render_loading())
    }
}
