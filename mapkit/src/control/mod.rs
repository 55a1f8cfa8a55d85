//! This module contains the controls that change a map view in response to user input.
//!
//! Controls do not listen to OS or toolkit events by themselves. The host (for example an `egui`
//! widget) converts its input into [`ControlEvent`]s and gives them to a [`ControlEventHandler`]
//! together with the view and the current time:
//!
//! 1. [`ZoomControl`] turns press/release of the zoom buttons into single steps (tap) or a
//!    repeating zoom (hold).
//! 2. [`CompassControl`] rotates the map or resets it to north.
//! 3. [`MapControls`] owns one of each and dispatches events to them.
//!
//! Hosts that prefer a real repeating timer over frame polling can use `ContinuousZoom` (requires
//! the `tokio` feature).

use web_time::Instant;

use crate::view::ZoomView;

mod compass;
#[cfg(feature = "tokio")]
mod continuous;
mod zoom;

pub use compass::{CompassConfig, CompassControl};
#[cfg(feature = "tokio")]
pub use continuous::ContinuousZoom;
pub use zoom::{ContinuousZoomConfig, PressSession, ZoomControl, ZoomControlState};

/// Direction of a zoom step.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ZoomDirection {
    /// Increase the zoom level.
    In,
    /// Decrease the zoom level.
    Out,
}

impl ZoomDirection {
    /// `1.0` for [`ZoomDirection::In`] and `-1.0` for [`ZoomDirection::Out`].
    pub fn sign(&self) -> f64 {
        match self {
            ZoomDirection::In => 1.0,
            ZoomDirection::Out => -1.0,
        }
    }
}

/// Input for the controls, produced by the UI layer.
#[derive(Debug, Copy, Clone, PartialEq)]
pub enum ControlEvent {
    /// Pointer button went down on a zoom button.
    PressStarted(ZoomDirection),
    /// Pointer button was released.
    PressEnded,
    /// Pointer left the zoom button while it was held.
    PointerLeft,
    /// A frame passed. Time-driven controls apply the steps that became due.
    Tick,
    /// Rotate the map counterclockwise by one step.
    RotateLeft,
    /// Rotate the map clockwise by one step.
    RotateRight,
    /// Reset the map rotation so that north is up.
    ResetNorth,
}

/// Value returned by a [`ControlEventHandler`] to indicate the status of the event.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum EventPropagation {
    /// Event should be propagated to the next handler.
    Propagate,
    /// Event was handled and should not be given to other handlers.
    Stop,
}

/// Control that reacts to [`ControlEvent`]s by changing the view.
pub trait ControlEventHandler {
    /// Handle the event.
    fn handle(
        &mut self,
        event: &ControlEvent,
        view: &mut dyn ZoomView,
        now: Instant,
    ) -> EventPropagation;
}

/// Set of controls shown over a map: one zoom control and one compass.
#[derive(Debug, Default)]
pub struct MapControls {
    zoom: ZoomControl,
    compass: CompassControl,
}

impl MapControls {
    /// Creates a new set of controls.
    pub fn new(zoom: ZoomControl, compass: CompassControl) -> Self {
        Self { zoom, compass }
    }

    /// The zoom control.
    pub fn zoom(&self) -> &ZoomControl {
        &self.zoom
    }

    /// Mutable reference to the zoom control.
    pub fn zoom_mut(&mut self) -> &mut ZoomControl {
        &mut self.zoom
    }

    /// The compass control.
    pub fn compass(&self) -> &CompassControl {
        &self.compass
    }

    /// Mutable reference to the compass control.
    pub fn compass_mut(&mut self) -> &mut CompassControl {
        &mut self.compass
    }
}

impl ControlEventHandler for MapControls {
    fn handle(
        &mut self,
        event: &ControlEvent,
        view: &mut dyn ZoomView,
        now: Instant,
    ) -> EventPropagation {
        match self.zoom.handle(event, view, now) {
            EventPropagation::Stop => EventPropagation::Stop,
            EventPropagation::Propagate => self.compass.handle(event, view, now),
        }
    }
}
