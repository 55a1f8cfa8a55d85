use egui::{Align2, Area, Frame, Id, Vec2};
use mapkit::control::MapControls;
use mapkit::error::MapkitError;
use mapkit::{ControlsConfig, ControlsPosition, ZoomView};

use crate::{CompassButtons, ZoomButtons};

const MARGIN: f32 = 10.0;

/// State of the controls shown over a map.
///
/// Owns the zoom and compass controls, so a held zoom button is released when the panel is
/// dropped.
#[derive(Debug, Default)]
pub struct ControlsPanel {
    config: ControlsConfig,
    controls: MapControls,
}

impl ControlsPanel {
    /// Creates a panel with the given configuration.
    pub fn new(config: ControlsConfig) -> Result<Self, MapkitError> {
        let controls = config.build_controls()?;
        Ok(Self { config, controls })
    }

    /// Current configuration of the panel.
    pub fn config(&self) -> ControlsConfig {
        self.config
    }

    /// Replaces the configuration. Any held zoom button is released.
    pub fn set_config(&mut self, config: ControlsConfig) -> Result<(), MapkitError> {
        self.controls = config.build_controls()?;
        self.config = config;
        Ok(())
    }

    /// Moves the panel to another corner of the map.
    pub fn set_position(&mut self, position: ControlsPosition) {
        self.config.set_position(position);
    }

    /// The controls of the panel.
    pub fn controls(&self) -> &MapControls {
        &self.controls
    }

    /// Mutable reference to the controls of the panel.
    pub fn controls_mut(&mut self) -> &mut MapControls {
        &mut self.controls
    }

    /// Shows the panel in its corner of the screen area.
    pub fn show<V: ZoomView + ?Sized>(&mut self, ctx: &egui::Context, view: &mut V) {
        let (align, offset) = anchor(self.config.position());
        let show_compass = self.config.show_compass();
        let Self { controls, .. } = self;

        Area::new(Id::new("mapkit_controls"))
            .anchor(align, offset)
            .show(ctx, |ui| {
                Frame::popup(ui.style()).show(ui, |ui| {
                    ui.add(ZoomButtons::new(controls.zoom_mut(), view));

                    if show_compass {
                        ui.separator();
                        let compass = *controls.compass();
                        ui.add(CompassButtons::new(&compass, view));
                    }
                });
            });
    }
}

/// Alignment and offset of the panel for the given corner.
pub(crate) fn anchor(position: ControlsPosition) -> (Align2, Vec2) {
    let align = match position {
        ControlsPosition::TopLeft => Align2::LEFT_TOP,
        ControlsPosition::TopRight => Align2::RIGHT_TOP,
        ControlsPosition::BottomLeft => Align2::LEFT_BOTTOM,
        ControlsPosition::BottomRight => Align2::RIGHT_BOTTOM,
    };

    let x = if position.is_left() { MARGIN } else { -MARGIN };
    let y = if position.is_top() { MARGIN } else { -MARGIN };

    (align, Vec2::new(x, y))
}
