pub mod errors;
pub mod models;

use std::future::Future;
use std::time::Duration;
use reqwest::Client;
use crate::manager_meteo::errors::MeteoError;
use crate::manager_meteo::models::{Daily, DayForecast, FullForecast};

/// Number of days in the daily series, the maximum horizon Open-Meteo serves.
pub const FORECAST_DAYS: i64 = 16;

/// Source of the fixed horizon daily forecast series.
pub trait ForecastSource {
    fn daily(&self) -> impl Future<Output = Result<Vec<DayForecast>, MeteoError>> + Send;
}

/// Struct for fetching daily weather forecasts from Open-Meteo
#[derive(Clone)]
pub struct Meteo {
    client: Client,
    lat: f64,
    long: f64,
}

impl Meteo {
    /// Returns a Meteo struct ready for fetching daily forecasts for the
    /// given location
    ///
    /// # Arguments
    ///
    /// * 'lat' - latitude of the location
    /// * 'long' - longitude of the location
    pub fn new(lat: f64, long: f64) -> Result<Meteo, MeteoError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()?;

        Ok(Self { client, lat, long })
    }

    /// Retrieves the full 16 day daily series from Open-Meteo.
    ///
    /// The raw response carries the daily parameters as parallel arrays,
    /// which get zipped into one record per calendar day.
    async fn fetch_daily(&self) -> Result<Vec<DayForecast>, MeteoError> {
        let url = request_url(self.lat, self.long);

        let req = self.client.get(url).send().await?;

        let status = req.status();
        if !status.is_success() {
            return Err(MeteoError::Meteo(format!(
                "Error while fetching forecast from Open-Meteo: {}",
                status
            )));
        }

        let json = req.text().await?;
        let full: FullForecast = serde_json::from_str(&json)?;

        zip_daily(full.daily)
    }
}

impl ForecastSource for Meteo {
    async fn daily(&self) -> Result<Vec<DayForecast>, MeteoError> {
        self.fetch_daily().await
    }
}

/// Builds the forecast request url for the given location.
/// Coordinates are formatted with 5 decimals, the precision Open-Meteo
/// resolves locations at.
fn request_url(lat: f64, long: f64) -> String {
    let meteo_domain = "https://api.open-meteo.com";
    format!(
        "{}/v1/forecast?latitude={:0.5}&longitude={:0.5}\
         &daily=temperature_2m_max,temperature_2m_min,precipitation_sum,weathercode\
         &forecast_days={}&timezone=auto&temperature_unit=celsius",
        meteo_domain, lat, long, FORECAST_DAYS
    )
}

/// Zips the provider's parallel arrays into per day records.
/// Arrays of unequal length mean a malformed document.
fn zip_daily(daily: Daily) -> Result<Vec<DayForecast>, MeteoError> {
    let len = daily.time.len();
    if daily.temperature_2m_max.len() != len
        || daily.temperature_2m_min.len() != len
        || daily.precipitation_sum.len() != len
        || daily.weathercode.len() != len
    {
        return Err(MeteoError::Document(
            "daily arrays are not aligned".to_string(),
        ));
    }

    let mut series: Vec<DayForecast> = Vec::with_capacity(len);
    for (i, date) in daily.time.into_iter().enumerate() {
        series.push(DayForecast {
            date,
            temp_max: daily.temperature_2m_max[i],
            temp_min: daily.temperature_2m_min[i],
            precipitation_mm: daily.precipitation_sum[i],
            weather_code: daily.weathercode[i],
        });
    }

    Ok(series)
}
