use std::sync::Arc;
use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use log::{error, info};
use serde::Serialize;
use tokio::sync::Mutex;
use crate::classify::{self, RainIntensity, WeatherCategory};
use crate::manager_meteo::models::DayForecast;
use crate::manager_meteo::{ForecastSource, FORECAST_DAYS};

const MS_PER_DAY: i64 = 86_400_000;

/// Outcome of resolving a calendar day against the provider's horizon.
///
/// Everything but `Matched` is terminal for the attempt: no retry, no
/// partial data.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ForecastOutcome {
    Matched {
        day: DayForecast,
        category: WeatherCategory,
        description: &'static str,
        intensity: Option<RainIntensity>,
    },
    OutOfWindow,
    NoExactMatch,
    FetchError { message: String },
}

impl ForecastOutcome {
    /// Short user facing message, None when there is nothing to say beyond
    /// the forecast itself.
    pub fn message(&self) -> Option<String> {
        match self {
            ForecastOutcome::Matched { intensity, .. } => {
                intensity.map(|i| i.phrase().to_string())
            }
            ForecastOutcome::OutOfWindow => Some(format!(
                "El pronóstico solo está disponible para los próximos {} días.",
                FORECAST_DAYS
            )),
            ForecastOutcome::NoExactMatch => {
                Some("No hay pronóstico para esa fecha aún.".to_string())
            }
            ForecastOutcome::FetchError { message } => {
                Some(format!("Error al cargar el pronóstico: {}", message))
            }
        }
    }
}

/// Whole day distance between the event date and now, as the ceiling of
/// the absolute difference.
///
/// # Arguments
///
/// * 'event_date' - the calendar day of the event
/// * 'now' - the instant to measure from
fn days_between(event_date: NaiveDate, now: DateTime<Utc>) -> i64 {
    let target = event_date.and_time(NaiveTime::MIN).and_utc();
    let delta_ms = (target - now).num_milliseconds().abs();

    delta_ms.div_ceil(MS_PER_DAY)
}

/// Resolves the forecast for a calendar day.
///
/// The provider never carries data beyond its fixed horizon, so days further
/// out short circuit to `OutOfWindow` without issuing a fetch. A day inside
/// the horizon but absent from the returned series is `NoExactMatch`; the
/// series is searched on the exact ISO day key it reports.
///
/// # Arguments
///
/// * 'event_date' - the calendar day to look up
/// * 'now' - the instant the lookup is made
/// * 'source' - provider of the daily series
pub async fn resolve<S: ForecastSource>(
    event_date: NaiveDate,
    now: DateTime<Utc>,
    source: &S,
) -> ForecastOutcome {
    if days_between(event_date, now) > FORECAST_DAYS {
        return ForecastOutcome::OutOfWindow;
    }

    let series = match source.daily().await {
        Ok(series) => series,
        Err(e) => {
            return ForecastOutcome::FetchError {
                message: e.to_string(),
            }
        }
    };

    let key = event_date.format("%Y-%m-%d").to_string();
    match series.into_iter().find(|day| day.date == key) {
        Some(day) => {
            let category = classify::categorize(day.weather_code);
            let description = classify::describe(day.weather_code);
            let intensity = classify::rain_intensity(day.precipitation_mm);

            ForecastOutcome::Matched {
                day,
                category,
                description,
                intensity,
            }
        }
        None => ForecastOutcome::NoExactMatch,
    }
}

/// Latest resolved outcome, guarded against stale refreshes.
///
/// Every refresh attempt takes a generation tag when its fetch is issued;
/// a store carrying an outdated tag is discarded, so a slow response can
/// never overwrite the result of a newer attempt.
pub struct ForecastCache {
    inner: Mutex<Inner>,
}

struct Inner {
    generation: u64,
    latest: Option<ForecastOutcome>,
}

impl ForecastCache {
    pub fn new() -> Self {
        ForecastCache {
            inner: Mutex::new(Inner {
                generation: 0,
                latest: None,
            }),
        }
    }

    /// Marks the start of a refresh attempt and returns its generation tag.
    pub async fn begin(&self) -> u64 {
        let mut inner = self.inner.lock().await;
        inner.generation += 1;

        inner.generation
    }

    /// Stores an outcome unless a newer attempt has begun since the tag was
    /// taken. Returns whether the outcome was kept.
    pub async fn store(&self, generation: u64, outcome: ForecastOutcome) -> bool {
        let mut inner = self.inner.lock().await;
        if generation != inner.generation {
            return false;
        }

        inner.latest = Some(outcome);
        true
    }

    /// Returns the most recently kept outcome, None before the first refresh
    /// completes.
    pub async fn latest(&self) -> Option<ForecastOutcome> {
        self.inner.lock().await.latest.clone()
    }
}

/// Forecast refresh loop
///
/// # Arguments
///
/// * 'cache' - shared cache the handlers read from
/// * 'source' - provider of the daily series
/// * 'event_date' - the wedding day
/// * 'refresh_secs' - seconds between refreshes
pub async fn run_forecasts<S: ForecastSource>(
    cache: Arc<ForecastCache>,
    source: S,
    event_date: NaiveDate,
    refresh_secs: u64,
) {
    loop {
        let generation = cache.begin().await;
        let outcome = resolve(event_date, Utc::now(), &source).await;

        if let ForecastOutcome::FetchError { message } = &outcome {
            error!("failed to refresh forecast: {}", message);
        }

        if !cache.store(generation, outcome).await {
            info!("discarded stale forecast refresh");
        }

        tokio::time::sleep(tokio::time::Duration::from_secs(refresh_secs)).await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use chrono::TimeZone;
    use crate::manager_meteo::errors::MeteoError;

    struct StubSource {
        calls: AtomicUsize,
        response: Result<Vec<DayForecast>, String>,
    }

    impl StubSource {
        fn with_series(series: Vec<DayForecast>) -> Self {
            StubSource {
                calls: AtomicUsize::new(0),
                response: Ok(series),
            }
        }

        fn failing(message: &str) -> Self {
            StubSource {
                calls: AtomicUsize::new(0),
                response: Err(message.to_string()),
            }
        }
    }

    impl ForecastSource for StubSource {
        async fn daily(&self) -> Result<Vec<DayForecast>, MeteoError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            match &self.response {
                Ok(series) => Ok(series.clone()),
                Err(message) => Err(MeteoError::Meteo(message.clone())),
            }
        }
    }

    fn day(date: &str, code: u16, precipitation_mm: f64) -> DayForecast {
        DayForecast {
            date: date.to_string(),
            temp_max: 28.0,
            temp_min: 17.0,
            precipitation_mm,
            weather_code: code,
        }
    }

    fn noon(y: i32, m: u32, d: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, 12, 0, 0).unwrap()
    }

    #[test]
    fn day_distance_rounds_up() {
        // 15.5 days ahead counts as 16
        assert_eq!(
            days_between(NaiveDate::from_ymd_opt(2025, 7, 21).unwrap(), noon(2025, 7, 5)),
            16
        );
        // past days count by their absolute distance
        assert_eq!(
            days_between(NaiveDate::from_ymd_opt(2025, 7, 3).unwrap(), noon(2025, 7, 5)),
            3
        );
    }

    #[tokio::test]
    async fn beyond_the_horizon_skips_the_fetch() {
        let source = StubSource::with_series(vec![day("2025-07-05", 0, 0.0)]);
        let event = NaiveDate::from_ymd_opt(2025, 8, 30).unwrap();

        let outcome = resolve(event, noon(2025, 7, 5), &source).await;

        assert_eq!(outcome, ForecastOutcome::OutOfWindow);
        assert_eq!(source.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn the_sixteenth_day_is_still_inside_the_window() {
        let source = StubSource::with_series(vec![]);
        let now = Utc.with_ymd_and_hms(2025, 7, 5, 0, 0, 0).unwrap();
        let event = NaiveDate::from_ymd_opt(2025, 7, 21).unwrap();

        let outcome = resolve(event, now, &source).await;

        assert_eq!(outcome, ForecastOutcome::NoExactMatch);
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn matches_the_event_day() {
        let source = StubSource::with_series(vec![
            day("2025-07-04", 1, 0.0),
            day("2025-07-05", 61, 3.2),
            day("2025-07-06", 95, 11.5),
        ]);
        let event = NaiveDate::from_ymd_opt(2025, 7, 5).unwrap();

        let outcome = resolve(event, noon(2025, 7, 4), &source).await;

        assert_eq!(
            outcome,
            ForecastOutcome::Matched {
                day: day("2025-07-05", 61, 3.2),
                category: WeatherCategory::Rain,
                description: "Lluvia moderada",
                intensity: Some(RainIntensity::Moderate),
            }
        );
    }

    #[tokio::test]
    async fn absent_day_is_no_exact_match() {
        let source = StubSource::with_series(vec![day("2025-07-04", 1, 0.0)]);
        let event = NaiveDate::from_ymd_opt(2025, 7, 5).unwrap();

        let outcome = resolve(event, noon(2025, 7, 4), &source).await;

        assert_eq!(outcome, ForecastOutcome::NoExactMatch);
    }

    #[tokio::test]
    async fn failed_fetch_surfaces_its_message() {
        let source = StubSource::failing("connection refused");
        let event = NaiveDate::from_ymd_opt(2025, 7, 5).unwrap();

        let outcome = resolve(event, noon(2025, 7, 4), &source).await;

        match outcome {
            ForecastOutcome::FetchError { message } => {
                assert!(!message.is_empty());
                assert!(message.contains("connection refused"));
            }
            other => panic!("expected FetchError, got {:?}", other),
        }
        assert_eq!(source.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn stale_refresh_is_discarded() {
        let cache = ForecastCache::new();

        let old_generation = cache.begin().await;
        let new_generation = cache.begin().await;

        assert!(cache.store(new_generation, ForecastOutcome::NoExactMatch).await);
        assert!(!cache.store(old_generation, ForecastOutcome::OutOfWindow).await);

        assert_eq!(cache.latest().await, Some(ForecastOutcome::NoExactMatch));
    }

    #[test]
    fn outcome_messages_are_user_facing() {
        assert!(ForecastOutcome::OutOfWindow
            .message()
            .unwrap()
            .contains("16 días"));
        assert!(ForecastOutcome::NoExactMatch.message().is_some());

        let fetch_error = ForecastOutcome::FetchError {
            message: "HTTP 500".to_string(),
        };
        assert!(fetch_error.message().unwrap().contains("HTTP 500"));
    }
}
