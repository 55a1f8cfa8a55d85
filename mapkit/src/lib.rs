//! Mapkit is a set of UI controls for interactive maps: zoom buttons with press-and-hold support,
//! a compass and a panel placing them in a corner of the map.
//!
//! # Quick start
//!
//! ```no_run
//! use mapkit::control::{ZoomControl, ZoomDirection};
//! use mapkit::{MapView, ZoomView};
//! use web_time::Instant;
//!
//! let mut view = MapView::new(8.0);
//! let mut control = ZoomControl::default();
//!
//! let pressed_at = Instant::now();
//! control.press_start(ZoomDirection::In, pressed_at, &mut view);
//! // ... on every frame while the button is held
//! control.advance(Instant::now(), &mut view);
//! // ... and when it is released
//! control.press_end(Instant::now(), &mut view);
//!
//! println!("Zoom is now {:?}", view.zoom());
//! ```
//!
//! # Main components
//!
//! Mapkit does not render maps. It works with any view implementing [`ZoomView`], which is the
//! only thing the controls know about the map. [`MapView`] is a ready-to-use implementation.
//!
//! * [`control`] contains the controls themselves. [`ZoomControl`](control::ZoomControl) is
//!   driven by the host event loop. With the `tokio` feature, `ContinuousZoom` runs its own
//!   timer on a tokio runtime.
//! * [`config`] describes how the controls look and behave and can be loaded from JSON.
//! * [`Messenger`] lets a view notify the host that it needs to redraw.
//!
//! The `mapkit-egui` crate shows the controls as `egui` widgets.

#![warn(clippy::unwrap_used)]
#![warn(missing_docs)]

pub mod config;
pub mod control;
pub mod error;
mod messenger;
mod view;

pub use config::{ControlsConfig, ControlsPosition};
pub use messenger::{DummyMessenger, Messenger};
pub use view::{MapView, ZoomConstraints, ZoomView, DEFAULT_MAX_ZOOM, DEFAULT_MIN_ZOOM};
