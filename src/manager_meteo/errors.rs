use std::fmt;

#[derive(Debug)]
pub enum MeteoError {
    Meteo(String),
    Document(String),
}

impl fmt::Display for MeteoError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            MeteoError::Meteo(e) => write!(f, "MeteoError::Meteo: {}", e),
            MeteoError::Document(e) => write!(f, "MeteoError::Document: {}", e),
        }
    }
}
impl From<reqwest::Error> for MeteoError {
    fn from(e: reqwest::Error) -> Self {
        MeteoError::Meteo(e.to_string())
    }
}
impl From<serde_json::Error> for MeteoError {
    fn from(e: serde_json::Error) -> Self {
        MeteoError::Document(e.to_string())
    }
}
