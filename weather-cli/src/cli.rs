use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use inquire::{CustomType, Select};
use tracing::info;
use weather_core::{
    Config, FixedGeolocator, GeoCoordinates, Geolocator, LocationMode, WeatherPage,
};

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weather", version, about = "Current weather where you are")]
pub struct Cli {
    /// Increase diagnostic output (-v, -vv, -vvv). RUST_LOG overrides.
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Choose where your position comes from.
    Configure,

    /// Show the weather right now (default).
    Show(ShowArgs),
}

#[derive(Debug, Default, clap::Args)]
pub struct ShowArgs {
    /// Latitude; overrides the configured location source.
    #[arg(long, requires = "lon", allow_negative_numbers = true)]
    lat: Option<f64>,

    /// Longitude; overrides the configured location source.
    #[arg(long, requires = "lat", allow_negative_numbers = true)]
    lon: Option<f64>,

    /// Also show today's high/low, sunrise, sunset and UV index.
    #[arg(long)]
    today: bool,
}

impl Cli {
    pub async fn run(self) -> Result<ExitCode> {
        match self.command {
            Some(Command::Configure) => {
                configure()?;
                Ok(ExitCode::SUCCESS)
            }
            Some(Command::Show(args)) => show(args).await,
            None => show(ShowArgs::default()).await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let mode = Select::new("Where should your position come from?", LocationMode::all().to_vec())
        .with_starting_cursor(
            LocationMode::all().iter().position(|m| *m == config.location).unwrap_or(0),
        )
        .prompt()
        .context("Location source prompt was cancelled")?;

    match mode {
        LocationMode::Fixed => {
            let latitude = CustomType::<f64>::new("Latitude:")
                .with_error_message("Please enter a number, e.g. 59.33")
                .prompt()
                .context("Latitude prompt was cancelled")?;
            let longitude = CustomType::<f64>::new("Longitude:")
                .with_error_message("Please enter a number, e.g. 18.06")
                .prompt()
                .context("Longitude prompt was cancelled")?;

            config.set_fixed_location(GeoCoordinates::new(latitude, longitude)?);
        }
        other => config.location = other,
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

/// Human-readable name of the position source `show` will use.
fn location_source(args: &ShowArgs, config: &Config) -> String {
    match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => format!("command line ({lat}, {lon})"),
        _ => match config.location {
            LocationMode::Ip => format!("IP lookup via {}", config.geolocation_url),
            LocationMode::Fixed => "configured coordinates".to_string(),
            LocationMode::Disabled => "none (location disabled)".to_string(),
        },
    }
}

async fn show(args: ShowArgs) -> Result<ExitCode> {
    let config = Config::load()?;
    info!(source = %location_source(&args, &config), forecast_url = %config.forecast_url, "resolved location source");

    let geolocator: Box<dyn Geolocator> = match (args.lat, args.lon) {
        (Some(lat), Some(lon)) => Box::new(FixedGeolocator::new(GeoCoordinates::new(lat, lon)?)),
        _ => config.geolocator()?,
    };

    let mut page = WeatherPage::new(geolocator, config.provider()?).with_daily_summary(args.today);
    page.load().await;

    print!("{}", page.render());

    if page.reading().is_some() { Ok(ExitCode::SUCCESS) } else { Ok(ExitCode::FAILURE) }
}
