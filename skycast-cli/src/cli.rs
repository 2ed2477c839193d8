use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Local;
use clap::{Parser, Subcommand};
use tokio::sync::watch;

use skycast_core::{
    AppState, Config, Coordinate, PermissionState, WeatherController, WeatherSnapshot,
    provider_from_config,
};

use crate::location::FixedLocationTracker;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Current weather in your terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the OpenWeather API key and an optional home location.
    Configure,

    /// Show current weather for a city.
    City {
        /// City name, e.g. "London".
        name: String,
    },

    /// Show current weather for the configured home location.
    Here,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::City { name } => city(&name).await,
            Command::Here => here().await,
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("OpenWeather API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let set_home = inquire::Confirm::new("Set a home location for `skycast here`?")
        .with_default(true)
        .prompt()
        .context("Failed to read answer")?;

    if set_home {
        let latitude = inquire::CustomType::<f64>::new("Latitude:")
            .with_error_message("Enter a decimal number, e.g. 51.5072")
            .prompt()
            .context("Failed to read latitude")?;
        let longitude = inquire::CustomType::<f64>::new("Longitude:")
            .with_error_message("Enter a decimal number, e.g. -0.1276")
            .prompt()
            .context("Failed to read longitude")?;
        config.set_home(Coordinate {
            latitude,
            longitude,
        });
    }

    config.save()?;
    println!(
        "Saved configuration to {}",
        Config::config_file_path()?.display()
    );

    Ok(())
}

fn build_controller(config: &Config) -> Result<Arc<WeatherController>> {
    let provider = provider_from_config(config)?;
    let tracker = FixedLocationTracker::new(config.home);

    Ok(Arc::new(WeatherController::new(
        Arc::from(provider),
        Arc::new(tracker),
    )))
}

async fn city(name: &str) -> Result<()> {
    let config = Config::load()?;
    let controller = build_controller(&config)?;

    let mut states = controller.watch_app_state();
    let search = tokio::spawn({
        let controller = Arc::clone(&controller);
        let name = name.to_owned();
        async move { controller.search_by_city(&name).await }
    });

    render_until_settled(&mut states).await?;
    search.await.context("weather fetch task failed")?;

    Ok(())
}

async fn here() -> Result<()> {
    let config = Config::load()?;
    let controller = build_controller(&config)?;
    controller.initialize().await;

    let mut states = controller.watch_app_state();
    let renderer = tokio::spawn(async move { render_until_settled(&mut states).await });

    let flow = controller.request_permission().await;

    match controller.permission_state() {
        PermissionState::Granted => {
            renderer
                .await
                .context("render task failed")?
                .context("rendering stopped early")?;
        }
        PermissionState::Denied => {
            renderer.abort();
            println!("Location permission denied; run `skycast here` again to retry.");
        }
        PermissionState::DeniedAlways => {
            renderer.abort();
            println!("Location is unavailable until a home location is configured.");
            println!("Run `skycast configure` to set one.");
        }
        PermissionState::NotDetermined => {
            renderer.abort();
        }
    }

    flow.context("location permission flow failed")?;

    Ok(())
}

/// Print each published state until a terminal one arrives.
async fn render_until_settled(states: &mut watch::Receiver<AppState>) -> Result<()> {
    loop {
        states
            .changed()
            .await
            .context("state publisher dropped")?;
        let state = states.borrow_and_update().clone();
        if render_state(&state) {
            return Ok(());
        }
    }
}

/// Render one published state. Returns true once a terminal state was shown.
fn render_state(state: &AppState) -> bool {
    match state {
        AppState::Loading => {
            eprintln!("Fetching weather...");
            false
        }
        AppState::Error(message) => {
            println!("{message}");
            true
        }
        AppState::Success(snapshot) => {
            print_snapshot(snapshot);
            true
        }
    }
}

fn print_snapshot(snapshot: &WeatherSnapshot) {
    let observed = snapshot.observed_at.with_timezone(&Local);

    println!("{}", snapshot.display_name());
    println!(
        "  {}°C  {} ({})",
        snapshot.temperature_celsius_rounded(),
        snapshot.condition,
        snapshot.description
    );
    println!("  Humidity : {}%", snapshot.humidity_pct);
    println!("  Wind     : {} m/s", snapshot.wind_speed_mps);
    println!("  Observed : {}", observed.format("%H:%M"));
}
