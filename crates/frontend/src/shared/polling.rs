//! Periodic background refresh with explicit start / stop.

use gloo_timers::callback::Interval;
use leptos::prelude::*;
use std::sync::Arc;

/// Runs `callback` every `period_ms` until stopped.
///
/// The interval handle is not `Send`, so it lives in local storage; the task
/// itself is `Copy` and can be moved into event handlers.
#[derive(Clone, Copy)]
pub struct PollingTask {
    handle: StoredValue<Option<Interval>, LocalStorage>,
    period_ms: StoredValue<u32>,
    callback: StoredValue<Arc<dyn Fn() + Send + Sync>>,
}

impl PollingTask {
    pub fn new(period_ms: u32, callback: impl Fn() + Send + Sync + 'static) -> Self {
        Self {
            handle: StoredValue::new_local(None),
            period_ms: StoredValue::new(period_ms.max(1)),
            callback: StoredValue::new(Arc::new(callback)),
        }
    }

    /// Starts ticking. Restarts when already running.
    pub fn start(&self) {
        self.stop();
        let callback = self.callback.get_value();
        let period = self.period_ms.get_value();
        let interval = Interval::new(period, move || callback());
        self.handle.set_value(Some(interval));
        log::debug!("polling started, every {} ms", period);
    }

    /// Dropping the interval cancels it.
    pub fn stop(&self) {
        let was_running = self
            .handle
            .try_update_value(|h| h.take().is_some())
            .unwrap_or(false);
        if was_running {
            log::debug!("polling stopped");
        }
    }

    pub fn is_running(&self) -> bool {
        self.handle
            .try_with_value(|h| h.is_some())
            .unwrap_or(false)
    }

    /// Changes the period; a running task is restarted with it.
    pub fn set_period(&self, period_ms: u32) {
        let period_ms = period_ms.max(1);
        if self.period_ms.get_value() == period_ms {
            return;
        }
        self.period_ms.set_value(period_ms);
        if self.is_running() {
            self.start();
        }
    }
}

/// Creates a started [`PollingTask`] that stops when the owner is cleaned up.
pub fn use_polling(period_ms: u32, callback: impl Fn() + Send + Sync + 'static) -> PollingTask {
    let task = PollingTask::new(period_ms, callback);
    task.start();
    on_cleanup(move || task.stop());
    task
}
