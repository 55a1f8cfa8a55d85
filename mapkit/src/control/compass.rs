use web_time::Instant;

use crate::control::{ControlEvent, ControlEventHandler, EventPropagation};
use crate::error::MapkitError;
use crate::view::ZoomView;

const DEFAULT_ROTATION_STEP: f64 = std::f64::consts::FRAC_PI_8;

/// Configuration of a [`CompassControl`].
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct CompassConfig {
    rotation_step: f64,
}

impl Default for CompassConfig {
    fn default() -> Self {
        Self {
            rotation_step: DEFAULT_ROTATION_STEP,
        }
    }
}

impl CompassConfig {
    /// Rotation in radians applied by every click on the rotate buttons.
    pub fn rotation_step(&self) -> f64 {
        self.rotation_step
    }

    /// Sets rotation in radians applied by every click on the rotate buttons.
    pub fn with_rotation_step(mut self, step: f64) -> Self {
        self.rotation_step = step;
        self
    }

    /// Sets rotation in radians applied by every click on the rotate buttons.
    pub fn set_rotation_step(&mut self, step: f64) {
        self.rotation_step = step;
    }

    /// Checks that the rotation step is a finite number.
    pub fn validate(&self) -> Result<(), MapkitError> {
        if !self.rotation_step.is_finite() {
            return Err(MapkitError::InvalidRotationStep(self.rotation_step));
        }

        Ok(())
    }
}

/// Control rotating the map by fixed steps and back to north.
#[derive(Default, Copy, Clone, PartialEq, Debug)]
pub struct CompassControl {
    config: CompassConfig,
}

impl CompassControl {
    /// Creates a new compass with the given configuration.
    pub fn new(config: CompassConfig) -> Result<Self, MapkitError> {
        config.validate()?;
        Ok(Self { config })
    }

    /// Returns the current configuration of the compass.
    pub fn config(&self) -> CompassConfig {
        self.config
    }

    /// Rotates the map counterclockwise by one step.
    pub fn rotate_left(&self, view: &mut (impl ZoomView + ?Sized)) {
        view.set_rotation(view.rotation() - self.config.rotation_step);
    }

    /// Rotates the map clockwise by one step.
    pub fn rotate_right(&self, view: &mut (impl ZoomView + ?Sized)) {
        view.set_rotation(view.rotation() + self.config.rotation_step);
    }

    /// Sets the rotation so that north is up.
    pub fn reset_north(&self, view: &mut (impl ZoomView + ?Sized)) {
        view.set_rotation(0.0);
    }
}

impl ControlEventHandler for CompassControl {
    fn handle(
        &mut self,
        event: &ControlEvent,
        view: &mut dyn ZoomView,
        _now: Instant,
    ) -> EventPropagation {
        match event {
            ControlEvent::RotateLeft => self.rotate_left(view),
            ControlEvent::RotateRight => self.rotate_right(view),
            ControlEvent::ResetNorth => self.reset_north(view),
            _ => return EventPropagation::Propagate,
        }

        log::debug!("Map rotation changed to {}", view.rotation());
        EventPropagation::Stop
    }
}
