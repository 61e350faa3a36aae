//! Advisory weather display.

use crate::config::Config;
use crate::errors::AppResult;
use crate::weather::WeatherClient;
use tracing::warn;

/// Fetches and prints current conditions for a coordinate pair.
///
/// Weather data is advisory only: any failure, including a missing
/// endpoint configuration, is reported as absence and the command still
/// succeeds.
pub fn show_weather(config: &Config, lat: f64, lon: f64) -> AppResult<()> {
    let Some(base_url) = &config.weather_url else {
        println!("暂无天气数据 (ALLEREASE_WEATHER_URL not set)");
        return Ok(());
    };

    let client = WeatherClient::new(base_url.clone());
    match client.fetch(lat, lon) {
        Ok(report) => {
            println!(
                "{}: {} {}",
                report.location_name, report.condition, report.temp
            );
            println!("AQI {} ({})", report.aqi, report.aqi_label);
        }
        Err(e) => {
            warn!("Weather lookup failed: {}", e);
            println!("暂无天气数据");
        }
    }
    Ok(())
}
