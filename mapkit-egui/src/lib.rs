//! Egui widgets showing [`mapkit`] controls: zoom buttons with press-and-hold support, a compass
//! and a panel placing them in a corner of the map.
//!
//! Widgets borrow the control state and the view for one frame. Keep a [`ControlsPanel`] (or the
//! controls themselves) in the app state between frames.

mod compass_buttons;
mod messenger;
mod panel;
mod zoom_buttons;

pub use compass_buttons::CompassButtons;
pub use messenger::EguiMessenger;
pub use panel::ControlsPanel;
pub use zoom_buttons::ZoomButtons;

#[cfg(feature = "init")]
mod init;
#[cfg(feature = "init")]
pub use init::{show_view_state, InitBuilder};
