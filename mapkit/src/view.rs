use std::fmt::{Debug, Formatter};
use std::sync::Arc;

use crate::error::MapkitError;
use crate::messenger::Messenger;

/// Default minimum zoom level of a [`MapView`].
pub const DEFAULT_MIN_ZOOM: f64 = 0.0;
/// Default maximum zoom level of a [`MapView`].
pub const DEFAULT_MAX_ZOOM: f64 = 28.0;

/// The part of a map view that the controls of this crate read and modify.
///
/// This is the seam between the controls and the mapping library that actually renders the map.
/// The library owns the view; controls only ever change it through these methods.
pub trait ZoomView {
    /// Current zoom level. `None` if the zoom level was never set.
    fn zoom(&self) -> Option<f64>;
    /// Sets the zoom level.
    fn set_zoom(&mut self, zoom: f64);
    /// Minimum zoom level the view allows.
    fn min_zoom(&self) -> f64;
    /// Maximum zoom level the view allows.
    fn max_zoom(&self) -> f64;
    /// Rotation of the map in radians. Positive values rotate the map clockwise.
    fn rotation(&self) -> f64;
    /// Sets rotation of the map in radians.
    fn set_rotation(&mut self, rotation: f64);
}

/// Allowed range of zoom levels.
#[derive(Debug, Copy, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ZoomConstraints {
    min_zoom: f64,
    max_zoom: f64,
}

impl Default for ZoomConstraints {
    fn default() -> Self {
        Self {
            min_zoom: DEFAULT_MIN_ZOOM,
            max_zoom: DEFAULT_MAX_ZOOM,
        }
    }
}

impl ZoomConstraints {
    /// Creates new constraints. Returns an error if `min_zoom > max_zoom` or any of the bounds is
    /// not finite.
    pub fn new(min_zoom: f64, max_zoom: f64) -> Result<Self, MapkitError> {
        if !min_zoom.is_finite() || !max_zoom.is_finite() || min_zoom > max_zoom {
            return Err(MapkitError::InvalidZoomRange {
                min: min_zoom,
                max: max_zoom,
            });
        }

        Ok(Self { min_zoom, max_zoom })
    }

    /// Minimum zoom level.
    pub fn min_zoom(&self) -> f64 {
        self.min_zoom
    }

    /// Maximum zoom level.
    pub fn max_zoom(&self) -> f64 {
        self.max_zoom
    }

    /// Clamps the given zoom level into the allowed range.
    pub fn clamp(&self, zoom: f64) -> f64 {
        zoom.clamp(self.min_zoom, self.max_zoom)
    }
}

/// A simple map view holding zoom level and rotation.
///
/// Apps that do not have their own view type can use this one directly. Every change is reported
/// to the [`Messenger`] if one is set, so the host can redraw.
#[derive(Clone, Default)]
pub struct MapView {
    zoom: Option<f64>,
    rotation: f64,
    constraints: ZoomConstraints,
    messenger: Option<Arc<dyn Messenger>>,
}

impl Debug for MapView {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapView")
            .field("zoom", &self.zoom)
            .field("rotation", &self.rotation)
            .field("constraints", &self.constraints)
            .finish()
    }
}

impl MapView {
    /// Creates a view with the given zoom level and no rotation.
    pub fn new(zoom: f64) -> Self {
        let constraints = ZoomConstraints::default();
        Self {
            zoom: Some(constraints.clamp(zoom)),
            ..Default::default()
        }
    }

    /// Returns the view with the given zoom constraints. Current zoom is clamped into them.
    pub fn with_constraints(mut self, constraints: ZoomConstraints) -> Self {
        self.constraints = constraints;
        self.zoom = self.zoom.map(|z| constraints.clamp(z));
        self
    }

    /// Returns the view with the given rotation.
    pub fn with_rotation(mut self, rotation: f64) -> Self {
        self.rotation = rotation;
        self
    }

    /// Returns the view with the given messenger.
    pub fn with_messenger(mut self, messenger: impl Messenger + 'static) -> Self {
        self.messenger = Some(Arc::new(messenger));
        self
    }

    /// Sets the new messenger of the view.
    pub fn set_messenger(&mut self, messenger: Option<impl Messenger + 'static>) {
        self.messenger = match messenger {
            Some(m) => Some(Arc::new(m)),
            None => None,
        };
    }

    /// Zoom constraints of the view.
    pub fn constraints(&self) -> ZoomConstraints {
        self.constraints
    }

    /// Request redraw of the map.
    pub fn redraw(&self) {
        if let Some(messenger) = &self.messenger {
            messenger.request_redraw();
        }
    }
}

impl ZoomView for MapView {
    fn zoom(&self) -> Option<f64> {
        self.zoom
    }

    fn set_zoom(&mut self, zoom: f64) {
        if zoom.is_nan() {
            log::warn!("Ignoring NaN zoom level");
            return;
        }

        self.zoom = Some(self.constraints.clamp(zoom));
        self.redraw();
    }

    fn min_zoom(&self) -> f64 {
        self.constraints.min_zoom
    }

    fn max_zoom(&self) -> f64 {
        self.constraints.max_zoom
    }

    fn rotation(&self) -> f64 {
        self.rotation
    }

    fn set_rotation(&mut self, rotation: f64) {
        self.rotation = rotation;
        self.redraw();
    }
}
