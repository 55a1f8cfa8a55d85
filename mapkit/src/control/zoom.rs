use std::time::Duration;

use web_time::Instant;

use crate::control::{ControlEvent, ControlEventHandler, EventPropagation, ZoomDirection};
use crate::error::MapkitError;
use crate::view::ZoomView;

const DEFAULT_ZOOM_STEP: f64 = 0.5;
const DEFAULT_TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Configuration of a [`ZoomControl`].
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct ContinuousZoomConfig {
    step: f64,
    #[cfg_attr(
        feature = "serde",
        serde(rename = "interval_ms", with = "crate::config::millis")
    )]
    interval: Duration,
}

impl Default for ContinuousZoomConfig {
    fn default() -> Self {
        Self {
            step: DEFAULT_ZOOM_STEP,
            interval: DEFAULT_TICK_INTERVAL,
        }
    }
}

impl ContinuousZoomConfig {
    /// Creates a validated configuration.
    pub fn new(step: f64, interval: Duration) -> Result<Self, MapkitError> {
        let config = Self { step, interval };
        config.validate()?;
        Ok(config)
    }

    /// Zoom level change applied on every tap and on every tick while a button is held.
    pub fn step(&self) -> f64 {
        self.step
    }

    /// Sets the zoom level change applied on every tap and tick.
    pub fn with_step(mut self, step: f64) -> Self {
        self.step = step;
        self
    }

    /// Sets the zoom level change applied on every tap and tick.
    pub fn set_step(&mut self, step: f64) {
        self.step = step;
    }

    /// Time between two consecutive steps while a button is held.
    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Sets time between two consecutive steps while a button is held.
    pub fn with_interval(mut self, interval: Duration) -> Self {
        self.interval = interval;
        self
    }

    /// Sets time between two consecutive steps while a button is held.
    pub fn set_interval(&mut self, interval: Duration) {
        self.interval = interval;
    }

    /// Checks that the step is a finite positive number and the interval is not zero.
    pub fn validate(&self) -> Result<(), MapkitError> {
        if !self.step.is_finite() || self.step <= 0.0 {
            return Err(MapkitError::InvalidStep(self.step));
        }

        if self.interval.is_zero() {
            return Err(MapkitError::InvalidInterval);
        }

        Ok(())
    }
}

/// Record of a zoom button being held.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct PressSession {
    direction: ZoomDirection,
    started_at: Instant,
    ticks_applied: u64,
}

impl PressSession {
    /// Direction the held button zooms in.
    pub fn direction(&self) -> ZoomDirection {
        self.direction
    }

    /// Time the button was pressed.
    pub fn started_at(&self) -> Instant {
        self.started_at
    }

    /// Number of repeated steps applied so far, not counting the step applied on press.
    pub fn ticks_applied(&self) -> u64 {
        self.ticks_applied
    }
}

/// State of a [`ZoomControl`].
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub enum ZoomControlState {
    /// No button is held.
    #[default]
    Idle,
    /// A button is held and the zoom keeps changing.
    Pressing(PressSession),
}

/// Zoom-in/zoom-out control with press-and-hold support.
///
/// Pressing a button applies one zoom step right away. While the button stays down, one more
/// step is applied every [`ContinuousZoomConfig::interval`]. The control holds no OS timer: the
/// host calls [`ZoomControl::advance`] (or sends [`ControlEvent::Tick`]) whenever it gets a
/// chance, and the control applies all the steps that became due since the press. Use
/// [`ZoomControl::next_tick_in`] to know when to wake up next.
///
/// Releasing the button, moving the pointer off it, [`ZoomControl::cancel`] and dropping the
/// control all end the session. Once the session ended no more steps are applied.
#[derive(Debug, Default)]
pub struct ZoomControl {
    config: ContinuousZoomConfig,
    state: ZoomControlState,
}

impl ZoomControl {
    /// Creates a new control with the given configuration.
    pub fn new(config: ContinuousZoomConfig) -> Result<Self, MapkitError> {
        config.validate()?;
        Ok(Self {
            config,
            state: ZoomControlState::Idle,
        })
    }

    /// Returns the current configuration of the control.
    pub fn config(&self) -> ContinuousZoomConfig {
        self.config
    }

    /// Updates the configuration of the control. Any held button is released first.
    pub fn set_config(&mut self, config: ContinuousZoomConfig) -> Result<(), MapkitError> {
        config.validate()?;
        self.cancel();
        self.config = config;
        Ok(())
    }

    /// Current state of the control.
    pub fn state(&self) -> ZoomControlState {
        self.state
    }

    /// Whether a zoom button is currently held.
    pub fn is_pressing(&self) -> bool {
        matches!(self.state, ZoomControlState::Pressing(_))
    }

    /// Direction of the held button, if any.
    pub fn direction(&self) -> Option<ZoomDirection> {
        match self.state {
            ZoomControlState::Pressing(session) => Some(session.direction),
            ZoomControlState::Idle => None,
        }
    }

    /// A zoom button was pressed.
    ///
    /// Ends the previous session if there is one, applies one step and starts repeating.
    pub fn press_start(
        &mut self,
        direction: ZoomDirection,
        now: Instant,
        view: &mut (impl ZoomView + ?Sized),
    ) {
        self.end_session("restarted");

        log::debug!("Zoom {direction:?} pressed");
        step_zoom(view, direction, self.config.step);

        self.state = ZoomControlState::Pressing(PressSession {
            direction,
            started_at: now,
            ticks_applied: 0,
        });
    }

    /// Applies all steps that became due by `now`. Does nothing if no button is held.
    pub fn advance(&mut self, now: Instant, view: &mut (impl ZoomView + ?Sized)) {
        let ZoomControlState::Pressing(session) = &mut self.state else {
            return;
        };

        let due = due_ticks(session.started_at, now, self.config.interval);
        while session.ticks_applied < due {
            session.ticks_applied += 1;
            if !step_zoom(view, session.direction, self.config.step) {
                // Saturated at a bound or no zoom to change: the remaining ticks change nothing.
                session.ticks_applied = due;
            }
        }
    }

    /// The held button was released.
    ///
    /// Steps that were due before `now` are applied, then the session ends. Calling this without
    /// a held button does nothing.
    pub fn press_end(&mut self, now: Instant, view: &mut (impl ZoomView + ?Sized)) {
        self.advance(now, view);
        self.end_session("released");
    }

    /// The pointer left the held button. Same as [`ZoomControl::press_end`].
    pub fn pointer_left(&mut self, now: Instant, view: &mut (impl ZoomView + ?Sized)) {
        self.advance(now, view);
        self.end_session("pointer left");
    }

    /// Ends the current session without applying any more steps.
    pub fn cancel(&mut self) {
        self.end_session("cancelled");
    }

    /// Time left until the next step is due. `None` if no button is held.
    pub fn next_tick_in(&self, now: Instant) -> Option<Duration> {
        let ZoomControlState::Pressing(session) = &self.state else {
            return None;
        };

        let interval = self.config.interval.as_nanos();
        let next_tick = interval.saturating_mul(session.ticks_applied as u128 + 1);
        let elapsed = now.saturating_duration_since(session.started_at).as_nanos();

        let left = next_tick.saturating_sub(elapsed);
        Some(Duration::from_nanos(left.min(u64::MAX as u128) as u64))
    }

    fn end_session(&mut self, reason: &str) {
        if let ZoomControlState::Pressing(session) =
            std::mem::replace(&mut self.state, ZoomControlState::Idle)
        {
            log::debug!(
                "Zoom {:?} session {reason} after {} ticks",
                session.direction,
                session.ticks_applied
            );
        }
    }
}

impl ControlEventHandler for ZoomControl {
    fn handle(
        &mut self,
        event: &ControlEvent,
        view: &mut dyn ZoomView,
        now: Instant,
    ) -> EventPropagation {
        match event {
            ControlEvent::PressStarted(direction) => {
                self.press_start(*direction, now, view);
                EventPropagation::Stop
            }
            ControlEvent::PressEnded => {
                self.press_end(now, view);
                EventPropagation::Stop
            }
            ControlEvent::PointerLeft => {
                self.pointer_left(now, view);
                EventPropagation::Stop
            }
            ControlEvent::Tick => {
                self.advance(now, view);
                EventPropagation::Propagate
            }
            _ => EventPropagation::Propagate,
        }
    }
}

/// Applies one step to the view, clamped to its zoom bounds. Returns `false` if the zoom level
/// did not change.
pub(crate) fn step_zoom(
    view: &mut (impl ZoomView + ?Sized),
    direction: ZoomDirection,
    step: f64,
) -> bool {
    let Some(current) = view.zoom() else {
        log::debug!("Zoom level is not set, skipping zoom step");
        return false;
    };

    let target = (current + direction.sign() * step)
        .max(view.min_zoom())
        .min(view.max_zoom());

    // A view already outside its bounds is not pulled back against the pressed direction.
    if (target - current) * direction.sign() <= 0.0 {
        return false;
    }

    log::trace!("Zoom step {current} -> {target}");
    view.set_zoom(target);
    true
}

fn due_ticks(started_at: Instant, now: Instant, interval: Duration) -> u64 {
    let elapsed = now.saturating_duration_since(started_at).as_nanos();
    let ticks = elapsed / interval.as_nanos().max(1);
    ticks.min(u64::MAX as u128) as u64
}
