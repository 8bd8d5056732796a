use serde::{Deserialize, Serialize};

/// Daily block as Open-Meteo reports it, parallel arrays aligned by index.
#[derive(Deserialize)]
pub struct Daily {
    pub time: Vec<String>,
    pub temperature_2m_max: Vec<f64>,
    pub temperature_2m_min: Vec<f64>,
    pub precipitation_sum: Vec<f64>,
    pub weathercode: Vec<u16>,
}

#[derive(Deserialize)]
pub struct FullForecast {
    pub daily: Daily,
}

/// One calendar day of the fixed forecast horizon.
///
/// The date stays the provider's local ISO day key, untouched by any
/// timezone conversion, since lookups match on that exact string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DayForecast {
    pub date: String,
    pub temp_max: f64,
    pub temp_min: f64,
    pub precipitation_mm: f64,
    pub weather_code: u16,
}
