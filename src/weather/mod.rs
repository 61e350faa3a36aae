//! Advisory weather and air-quality lookup.
//!
//! This module provides a small client for fetching current weather and AQI
//! data for a coordinate pair from a configurable HTTP endpoint. The data
//! is purely informational: every failure is caught at the operation
//! boundary and rendered as "no weather data available," and nothing here
//! is ever allowed to influence logging or reminder behavior.

use crate::errors::{AppResult, WeatherError};
use reqwest::blocking::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

/// Request timeout for the advisory lookup. Generous enough for slow
/// mobile networks, short enough that the command never feels hung.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Current conditions for a location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeatherReport {
    /// Short condition description (e.g. "sunny").
    pub condition: String,
    /// Display temperature (e.g. "25°C").
    pub temp: String,
    /// Air quality index value.
    pub aqi: String,
    /// Air quality level label (e.g. "优").
    pub aqi_label: String,
    /// Resolved location name.
    pub location_name: String,
}

/// Client for the weather/AQI endpoint.
pub struct WeatherClient {
    base_url: String,
    client: Client,
}

impl WeatherClient {
    /// Creates a new client against the given endpoint base URL.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .unwrap_or_else(|_| Client::new()),
        }
    }

    /// Fetches current conditions for a coordinate pair.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The endpoint is not reachable
    /// - The endpoint answers with a non-success status
    /// - The response body cannot be interpreted
    pub fn fetch(&self, lat: f64, lon: f64) -> AppResult<WeatherReport> {
        let url = format!(
            "{}/weather?lat={}&lon={}",
            self.base_url.trim_end_matches('/'),
            lat,
            lon
        );
        debug!("Fetching weather from {}", url);

        let response = self
            .client
            .get(&url)
            .send()
            .map_err(WeatherError::Unreachable)?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().unwrap_or_default();
            return Err(WeatherError::BadStatus { status, body }.into());
        }

        let report: WeatherReport = response.json().map_err(|e| {
            WeatherError::InvalidResponse(format!("Failed to parse weather response: {}", e))
        })?;

        debug!(
            "Weather for {}: {} {}, AQI {} ({})",
            report.location_name, report.condition, report.temp, report.aqi, report.aqi_label
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_report_deserializes_camel_case() {
        let report: WeatherReport = serde_json::from_str(
            r#"{"condition":"sunny","temp":"25°C","aqi":"45","aqiLabel":"优","locationName":"杭州"}"#,
        )
        .unwrap();
        assert_eq!(report.aqi_label, "优");
        assert_eq!(report.location_name, "杭州");
    }

    #[test]
    fn test_base_url_trailing_slash_is_tolerated() {
        let client = WeatherClient::new("http://127.0.0.1:1/");
        // The port is closed; this exercises the URL join and the
        // unreachable-endpoint error path.
        let err = client.fetch(30.25, 120.16).unwrap_err();
        assert!(format!("{}", err).contains("Weather"));
    }
}
