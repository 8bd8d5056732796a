use actix_web::{get, web, HttpResponse, Responder};
use chrono::{NaiveDate, Utc};
use log::info;
use serde::{Deserialize, Serialize};
use crate::links;
use crate::manager_forecast::{self, ForecastOutcome};
use crate::AppState;

#[derive(Deserialize, Debug)]
struct ForecastQuery {
    date: Option<NaiveDate>,
}

#[derive(Serialize)]
struct ForecastResponse {
    #[serde(flatten)]
    outcome: ForecastOutcome,
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
}

impl From<ForecastOutcome> for ForecastResponse {
    fn from(outcome: ForecastOutcome) -> Self {
        let message = outcome.message();
        ForecastResponse { outcome, message }
    }
}

#[derive(Serialize)]
struct EventResponse {
    couple: Vec<String>,
    date: NaiveDate,
    venue: String,
    address: String,
    latitude: f64,
    longitude: f64,
    is_wedding_day: bool,
    maps_url: String,
    ride_url: String,
}

#[get("/countdown")]
pub async fn countdown(data: web::Data<AppState>) -> impl Responder {
    let state = *data.countdown.lock().await;

    HttpResponse::Ok().json(state)
}

#[get("/forecast")]
pub async fn forecast(params: web::Query<ForecastQuery>, data: web::Data<AppState>) -> impl Responder {
    info!("{:?}", params);

    let outcome = match params.date {
        Some(date) => manager_forecast::resolve(date, Utc::now(), &data.meteo).await,
        None => match data.forecast.latest().await {
            Some(outcome) => outcome,
            None => {
                return HttpResponse::ServiceUnavailable()
                    .json(serde_json::json!({"message": "Cargando pronóstico..."}))
            }
        },
    };

    HttpResponse::Ok().json(ForecastResponse::from(outcome))
}

#[get("/event")]
pub async fn event(data: web::Data<AppState>) -> impl Responder {
    let e = &data.event;

    HttpResponse::Ok().json(EventResponse {
        couple: e.couple.clone(),
        date: e.date,
        venue: e.venue.clone(),
        address: e.address.clone(),
        latitude: e.latitude,
        longitude: e.longitude,
        is_wedding_day: Utc::now().date_naive() == e.date,
        maps_url: links::maps_directions(e.latitude, e.longitude),
        ride_url: links::uber_dropoff(e.latitude, e.longitude),
    })
}
