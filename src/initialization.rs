use std::env;
use std::fs;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use serde::Deserialize;
use crate::errors::ConfigError;
use crate::logging;

#[derive(Deserialize)]
pub struct Config {
    pub web_server: WebServer,
    pub event: Event,
    #[serde(default)]
    pub forecast: Forecast,
}

#[derive(Deserialize)]
pub struct WebServer {
    pub bind_address: String,
    pub bind_port: u16,
}

/// The wedding itself: who, when and where.
#[derive(Deserialize, Clone)]
pub struct Event {
    pub couple: Vec<String>,
    pub date: NaiveDate,
    #[serde(default)]
    pub time: Option<NaiveTime>,
    pub venue: String,
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
}

#[derive(Deserialize)]
pub struct Forecast {
    #[serde(default = "default_refresh_secs")]
    pub refresh_secs: u64,
}

impl Default for Forecast {
    fn default() -> Self {
        Forecast {
            refresh_secs: default_refresh_secs(),
        }
    }
}

fn default_refresh_secs() -> u64 {
    3600
}

impl Event {
    /// The instant the countdown runs towards, midnight when no ceremony
    /// time is configured.
    pub fn target_instant(&self) -> DateTime<Utc> {
        self.date
            .and_time(self.time.unwrap_or(NaiveTime::MIN))
            .and_utc()
    }
}

/// Loads the configuration and initializes logging
///
/// The configuration file defaults to `config.toml` in the working directory
/// and can be overridden by the first command line argument.
pub fn config() -> Result<Config, ConfigError> {
    let path = env::args()
        .nth(1)
        .unwrap_or_else(|| String::from("config.toml"));
    let raw = fs::read_to_string(&path)?;
    let config: Config = toml::from_str(&raw)?;

    logging::setup_logger()?;

    Ok(config)
}
