//! Text rendering of the page.
//!
//! This is the only place that knows what an [`IconId`] looks like on screen.

use crate::{
    classification::{IconId, classify},
    compass::convert_wind_direction,
    error::ClassificationError,
    model::{CurrentWeatherReading, DailySummary},
};

pub const HEADING: &str = "The weather right now";
pub const LOADING_TEXT: &str = "Loading weather data...";
pub const ATTRIBUTION: &str = "Weather data from Open-Meteo (https://open-meteo.com)";

const ARROWS: [&str; 8] = ["↑", "↗", "→", "↘", "↓", "↙", "←", "↖"];

pub fn icon_glyph(icon: IconId) -> &'static str {
    match icon {
        IconId::ClearSky => "☀️",
        IconId::MainlyClear => "🌤️",
        IconId::PartlyCloudy => "⛅",
        IconId::Overcast => "☁️",
        IconId::Fog => "🌫️",
        IconId::Rain => "🌧️",
        IconId::Snow => "🌨️",
        IconId::Thunderstorm => "⛈️",
    }
}

/// An up arrow turned clockwise by `degrees`, snapped to 45°.
pub fn wind_arrow(degrees: f64) -> &'static str {
    if !degrees.is_finite() {
        return "?";
    }
    let octant = ((degrees.rem_euclid(360.0) + 22.5) / 45.0) as usize;
    ARROWS[octant % ARROWS.len()]
}

pub fn render_loading() -> String {
    format!("{LOADING_TEXT}\n\n{ATTRIBUTION}\n")
}

/// Current-conditions summary for a stored reading.
pub fn render_reading(
    reading: &CurrentWeatherReading,
    daily: Option<&DailySummary>,
) -> Result<String, ClassificationError> {
    let entry = classify(reading.weather_code)?;
    let direction = convert_wind_direction(reading.wind_direction_degrees).unwrap_or("-");

    let daily = daily.map(|d| format!("\n{}", render_daily(d))).unwrap_or_default();

    Ok(format!(
        "{HEADING}\n{icon}\n{temperature} °C\n{description}\n{speed} m/s {arrow} {direction}\n{daily}\n{ATTRIBUTION}\n",
        icon = icon_glyph(entry.icon),
        temperature = reading.temperature_celsius,
        description = entry.description,
        speed = reading.wind_speed_mps,
        arrow = wind_arrow(reading.wind_direction_degrees),
    ))
}

pub fn render_daily(daily: &DailySummary) -> String {
    format!(
        "Today: {} °C / {} °C\nSunrise {}, sunset {}\nMax UV index {}\n",
        daily.temperature_max,
        daily.temperature_min,
        clock_time(&daily.sunrise),
        clock_time(&daily.sunset),
        daily.uv_index_max,
    )
}

/// `2024-06-01T03:38` -> `03:38`; anything else is shown as-is.
fn clock_time(iso: &str) -> &str {
    iso.split_once('T').map_or(iso, |(_, time)| time)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{FixedOffset, TimeZone};

    fn reading(code: u8) -> CurrentWeatherReading {
        CurrentWeatherReading {
            temperature_celsius: 14.2,
            wind_speed_mps: 3.4,
            wind_direction_degrees: 225.0,
            weather_code: code,
            observed_at: FixedOffset::east_opt(7200)
                .unwrap()
                .with_ymd_and_hms(2024, 6, 1, 12, 0, 0)
                .unwrap(),
        }
    }

    #[test]
    fn overcast_reading_renders_summary() {
        let out = render_reading(&reading(3), None).unwrap();
        let lines: Vec<&str> = out.lines().collect();

        assert_eq!(lines[0], HEADING);
        assert_eq!(lines[1], icon_glyph(IconId::Overcast));
        assert_eq!(lines[2], "14.2 °C");
        assert_eq!(lines[3], "Overcast");
        assert_eq!(lines[4], "3.4 m/s ↙ SW");
        assert!(out.ends_with(&format!("{ATTRIBUTION}\n")));
    }

    #[test]
    fn whole_numbers_render_without_fraction() {
        let mut r = reading(0);
        r.temperature_celsius = 20.0;
        r.wind_speed_mps = 5.0;
        let out = render_reading(&r, None).unwrap();

        assert!(out.contains("\n20 °C\n"));
        assert!(out.contains("\n5 m/s "));
    }

    #[test]
    fn unknown_code_fails_to_render() {
        assert_eq!(
            render_reading(&reading(42), None),
            Err(ClassificationError::MissingClassification(42))
        );
    }

    #[test]
    fn rendering_is_repeatable() {
        let r = reading(61);
        assert_eq!(render_reading(&r, None), render_reading(&r, None));
    }

    #[test]
    fn daily_block_is_included_when_given() {
        let daily = DailySummary {
            temperature_max: 17.5,
            temperature_min: 9.1,
            sunrise: "2024-06-01T03:38".to_string(),
            sunset: "2024-06-01T21:54".to_string(),
            uv_index_max: 5.2,
        };
        let out = render_reading(&reading(3), Some(&daily)).unwrap();

        assert!(out.contains("Today: 17.5 °C / 9.1 °C"));
        assert!(out.contains("Sunrise 03:38, sunset 21:54"));
        assert!(out.contains("Max UV index 5.2"));
    }

    #[test]
    fn full_layout_with_daily_block() {
        let daily = DailySummary {
            temperature_max: 17.5,
            temperature_min: 9.1,
            sunrise: "2024-06-01T03:38".to_string(),
            sunset: "2024-06-01T21:54".to_string(),
            uv_index_max: 5.2,
        };
        let out = render_reading(&reading(3), Some(&daily)).unwrap();

        let expected = format!(
            "{HEADING}\n{}\n14.2 °C\nOvercast\n3.4 m/s ↙ SW\n\n\
             Today: 17.5 °C / 9.1 °C\nSunrise 03:38, sunset 21:54\nMax UV index 5.2\n\n\
             {ATTRIBUTION}\n",
            icon_glyph(IconId::Overcast)
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn full_layout_without_daily_block() {
        let out = render_reading(&reading(3), None).unwrap();

        let expected = format!(
            "{HEADING}\n{}\n14.2 °C\nOvercast\n3.4 m/s ↙ SW\n\n{ATTRIBUTION}\n",
            icon_glyph(IconId::Overcast)
        );
        assert_eq!(out, expected);
    }

    #[test]
    fn arrows_follow_bearing() {
        assert_eq!(wind_arrow(0.0), "↑");
        assert_eq!(wind_arrow(90.0), "→");
        assert_eq!(wind_arrow(180.0), "↓");
        assert_eq!(wind_arrow(350.0), "↑");
        assert_eq!(wind_arrow(-45.0), "↖");
        assert_eq!(wind_arrow(f64::NAN), "?");
    }

    #[test]
    fn loading_view_has_placeholder_and_attribution() {
        let out = render_loading();
        assert!(out.starts_with(LOADING_TEXT));
        assert!(out.contains(ATTRIBUTION));
    }
}
