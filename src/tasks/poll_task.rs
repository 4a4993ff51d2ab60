//! Periodic backend polling.
//!
//! - [`ImuPoller`] reads `GET /imu` on a fixed interval and publishes each
//!   sample on a watch channel. Only one poll loop exists at a time.
//! - [`wait_for_calibration_mode`] polls `GET /calibration_mode` until the
//!   backend reaches the requested state or the retry budget runs out.
use std::sync::Arc;
use std::time::Duration;

use log::{debug, info, warn};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{sleep, Instant, MissedTickBehavior};

use super::net_task::{Backend, ImuReading};

/// Latest IMU sample; `None` after a failed read
pub type ImuSample = Option<ImuReading>;

pub struct ImuPoller {
    backend: Arc<dyn Backend>,
    interval: Duration,
    sample_sender: watch::Sender<ImuSample>,
    handle: Option<JoinHandle<()>>,
}

impl ImuPoller {
    pub fn new(backend: Arc<dyn Backend>, interval: Duration) -> Self {
        let (sample_sender, _) = watch::channel(None);
        Self {
            backend,
            interval,
            sample_sender,
            handle: None,
        }
    }

    pub fn subscribe(&self) -> watch::Receiver<ImuSample> {
        self.sample_sender.subscribe()
    }

    /// Latest published sample
    pub fn latest(&self) -> ImuSample {
        *self.sample_sender.borrow()
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Starts polling immediately, cancelling any loop already running.
    pub fn start(&mut self) {
        self.stop();

        let backend = self.backend.clone();
        let sender = self.sample_sender.clone();
        let period = self.interval;
        self.handle = Some(tokio::spawn(async move {
            let mut ticker = tokio::time::interval_at(Instant::now(), period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                let sample = match backend.imu().await {
                    Ok(reading) => Some(reading),
                    Err(e) => {
                        warn!("[IMU_TASK] read failed: {e}");
                        None
                    }
                };
                sender.send_replace(sample);
            }
        }));
        info!("[IMU_TASK] polling every {:?}", self.interval);
    }

    pub fn stop(&mut self) {
        if let Some(handle) = self.handle.take() {
            handle.abort();
            debug!("[IMU_TASK] previous poll cancelled");
        }
    }

    /// Flips polling on or off and returns the new state
    pub fn toggle(&mut self) -> bool {
        if self.is_running() {
            self.stop();
            false
        } else {
            self.start();
            true
        }
    }
}

impl Drop for ImuPoller {
    fn drop(&mut self) {
        self.stop();
    }
}

/// Waits for the backend's calibration flag to equal `target`.
///
/// The first read happens after one `interval`, followed by up to `retries`
/// more reads spaced by `interval`. A failed read counts as "not yet".
/// Returns whether the target state was observed; running out of retries is
/// not an error.
pub async fn wait_for_calibration_mode(
    backend: &dyn Backend,
    target: bool,
    interval: Duration,
    retries: u32,
) -> bool {
    for attempt in 0..=retries {
        sleep(interval).await;
        match backend.calibration_mode().await {
            Ok(mode) if mode == target => {
                debug!("[CALIB_TASK] calibration_mode={target} after {} reads", attempt + 1);
                return true;
            }
            Ok(_) => {}
            Err(e) => warn!("[CALIB_TASK] calibration_mode read failed: {e}"),
        }
    }
    info!("[CALIB_TASK] gave up waiting for calibration_mode={target}");
    false
}
