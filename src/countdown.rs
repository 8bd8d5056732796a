use chrono::{DateTime, Utc};
use serde::Serialize;

const MS_PER_SECOND: i64 = 1_000;
const MS_PER_MINUTE: i64 = 60_000;
const MS_PER_HOUR: i64 = 3_600_000;
const MS_PER_DAY: i64 = 86_400_000;

/// State of the countdown towards the wedding instant.
///
/// `Remaining` always carries `hours` in 0..=23 and `minutes`/`seconds`
/// in 0..=59; once the target has passed the state is `Arrived` and the
/// fields are never negative.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum CountdownState {
    Remaining {
        days: i64,
        hours: i64,
        minutes: i64,
        seconds: i64,
    },
    Arrived,
}

/// Breaks the time left until the target down into whole days, hours,
/// minutes and seconds using floor division on the millisecond delta.
///
/// A delta of zero or less means the big day is here.
///
/// # Arguments
///
/// * 'target' - the wedding instant
/// * 'now' - the instant to measure from
pub fn compute(target: DateTime<Utc>, now: DateTime<Utc>) -> CountdownState {
    let delta = (target - now).num_milliseconds();

    if delta <= 0 {
        return CountdownState::Arrived;
    }

    CountdownState::Remaining {
        days: delta / MS_PER_DAY,
        hours: (delta / MS_PER_HOUR) % 24,
        minutes: (delta / MS_PER_MINUTE) % 60,
        seconds: (delta / MS_PER_SECOND) % 60,
    }
}
