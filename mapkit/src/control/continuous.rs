use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::{RwLock, RwLockReadGuard};
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::control::zoom::step_zoom;
use crate::control::{ContinuousZoomConfig, ZoomDirection};
use crate::error::MapkitError;
use crate::view::ZoomView;

/// Press-and-hold zoom driven by a tokio interval timer.
///
/// Unlike [`ZoomControl`](super::ZoomControl), which is polled by the host, this driver owns a
/// background task that applies a step on every tick while a button is held. The view is shared
/// with the task behind a lock.
///
/// At most one timer task exists at a time. It is stopped by [`ContinuousZoom::press_end`], by
/// the next [`ContinuousZoom::press_start`] and when the driver is dropped. Stopping takes the
/// view lock, so once `press_end` returns no further step can reach the view.
pub struct ContinuousZoom<V> {
    view: Arc<RwLock<V>>,
    config: ContinuousZoomConfig,
    session: Arc<AtomicU64>,
    task: Option<(ZoomDirection, JoinHandle<()>)>,
    runtime: Handle,
}

impl<V: ZoomView + Send + Sync + 'static> ContinuousZoom<V> {
    /// Creates a new driver for the given view.
    ///
    /// Must be called from within a tokio runtime: the timer tasks are spawned on it.
    pub fn new(view: Arc<RwLock<V>>, config: ContinuousZoomConfig) -> Result<Self, MapkitError> {
        config.validate()?;
        let runtime = Handle::try_current().map_err(|_| MapkitError::NoRuntime)?;

        Ok(Self {
            view,
            config,
            session: Arc::new(AtomicU64::new(0)),
            task: None,
            runtime,
        })
    }

    /// Applies one zoom step and starts the repeating timer. Stops the previous timer if any.
    pub fn press_start(&mut self, direction: ZoomDirection) {
        self.stop("restarted");

        let step = self.config.step();
        let interval = self.config.interval();

        let session_id = {
            let mut view = self.view.write();
            step_zoom(&mut *view, direction, step);
            self.session.load(Ordering::Acquire)
        };

        let view = self.view.clone();
        let session = self.session.clone();
        let first_tick = tokio::time::Instant::now() + interval;

        let task = self.runtime.spawn(async move {
            let mut ticker = tokio::time::interval_at(first_tick, interval);
            loop {
                ticker.tick().await;

                let mut view = view.write();
                if session.load(Ordering::Acquire) != session_id {
                    break;
                }

                step_zoom(&mut *view, direction, step);
            }
        });

        log::debug!("Zoom {direction:?} timer started");
        self.task = Some((direction, task));
    }

    /// Read access to the view.
    pub fn view(&self) -> RwLockReadGuard<'_, V> {
        self.view.read()
    }
}

impl<V> ContinuousZoom<V> {
    /// Stops the timer. Does nothing if no button is held.
    pub fn press_end(&mut self) {
        self.stop("released");
    }

    /// Whether the timer is running.
    pub fn is_pressing(&self) -> bool {
        self.task.is_some()
    }

    /// Direction of the running timer, if any.
    pub fn direction(&self) -> Option<ZoomDirection> {
        self.task.as_ref().map(|(direction, _)| *direction)
    }

    /// Configuration of the driver.
    pub fn config(&self) -> ContinuousZoomConfig {
        self.config
    }

    /// The shared view the driver modifies.
    pub fn shared_view(&self) -> Arc<RwLock<V>> {
        self.view.clone()
    }

    fn stop(&mut self, reason: &str) {
        let Some((direction, task)) = self.task.take() else {
            return;
        };

        {
            let _view = self.view.write();
            self.session.fetch_add(1, Ordering::AcqRel);
        }

        task.abort();
        log::debug!("Zoom {direction:?} timer {reason}");
    }
}

impl<V> Drop for ContinuousZoom<V> {
    fn drop(&mut self) {
        self.stop("dropped");
    }
}
