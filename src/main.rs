#![feature(int_roundings)]

mod errors;
mod logging;
mod initialization;
mod handlers;
mod links;
mod countdown;
mod classify;
mod manager_countdown;
mod manager_forecast;
mod manager_meteo;

use std::sync::Arc;
use actix_web::{web, App, HttpServer};
use chrono::Utc;
use log::info;
use tokio::sync::Mutex;
use crate::countdown::CountdownState;
use crate::errors::UnrecoverableError;
use crate::initialization::{config, Event};
use crate::manager_forecast::ForecastCache;
use crate::manager_meteo::Meteo;

pub struct AppState {
    pub countdown: Arc<Mutex<CountdownState>>,
    pub forecast: Arc<ForecastCache>,
    pub meteo: Meteo,
    pub event: Arc<Event>,
}

#[actix_web::main]
async fn main() -> Result<(), UnrecoverableError> {
    let config = config()?;

    let meteo = Meteo::new(config.event.latitude, config.event.longitude)?;
    let event = Arc::new(config.event);

    let target = event.target_instant();
    let countdown_state = Arc::new(Mutex::new(countdown::compute(target, Utc::now())));
    let ticker = manager_countdown::start(target, countdown_state.clone());

    let cache = Arc::new(ForecastCache::new());
    tokio::spawn(manager_forecast::run_forecasts(
        cache.clone(),
        meteo.clone(),
        event.date,
        config.forecast.refresh_secs,
    ));

    info!(
        "wedding of {} on {}, serving on {}:{}",
        event.couple.join(" y "),
        event.date,
        config.web_server.bind_address,
        config.web_server.bind_port
    );

    HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(AppState {
                countdown: countdown_state.clone(),
                forecast: cache.clone(),
                meteo: meteo.clone(),
                event: event.clone(),
            }))
            .service(handlers::countdown)
            .service(handlers::forecast)
            .service(handlers::event)
    })
        .bind((config.web_server.bind_address, config.web_server.bind_port))?
        .run()
        .await?;

    ticker.stop();

    Ok(())
}
