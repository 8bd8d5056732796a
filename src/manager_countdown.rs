use std::sync::Arc;
use chrono::{DateTime, Utc};
use log::info;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use crate::countdown::{self, CountdownState};

/// Handle to a running countdown tick.
///
/// Stopping consumes the handle, so a ticker can only be stopped once; the
/// caller starts a fresh one when the target changes.
pub struct CountdownTicker {
    handle: JoinHandle<()>,
}

impl CountdownTicker {
    /// Stops the tick.
    pub fn stop(self) {
        self.handle.abort();
    }
}

/// Starts the once per second countdown tick.
///
/// The shared state gets a freshly computed value on every tick, starting
/// immediately; the loop ends on its own once the target has arrived.
///
/// # Arguments
///
/// * 'target' - the wedding instant
/// * 'state' - shared state the handlers read from
pub fn start(target: DateTime<Utc>, state: Arc<Mutex<CountdownState>>) -> CountdownTicker {
    let handle = tokio::spawn(async move {
        let mut tick = tokio::time::interval(std::time::Duration::from_secs(1));

        loop {
            tick.tick().await;

            let current = countdown::compute(target, Utc::now());
            *state.lock().await = current;

            if current == CountdownState::Arrived {
                info!("countdown reached the wedding instant");
                break;
            }
        }
    });

    CountdownTicker { handle }
}
