use egui::{Button, Response, Ui, Widget};
use mapkit::control::CompassControl;
use mapkit::ZoomView;

use crate::zoom_buttons::BUTTON_SIZE;

/// Rotate left, north and rotate right buttons.
pub struct CompassButtons<'a, V: ZoomView + ?Sized> {
    compass: &'a CompassControl,
    view: &'a mut V,
}

impl<'a, V: ZoomView + ?Sized> CompassButtons<'a, V> {
    /// Creates the widget for the given compass and view.
    pub fn new(compass: &'a CompassControl, view: &'a mut V) -> Self {
        Self { compass, view }
    }
}

impl<V: ZoomView + ?Sized> Widget for CompassButtons<'_, V> {
    fn ui(self, ui: &mut Ui) -> Response {
        ui.horizontal(|ui| {
            let left = ui
                .add(Button::new("↺").min_size(BUTTON_SIZE))
                .on_hover_text("Rotate counterclockwise");
            let north = ui
                .add(Button::new("N").min_size(BUTTON_SIZE))
                .on_hover_text(format!(
                    "Reset to north (now {:.0}°)",
                    self.view.rotation().to_degrees()
                ));
            let right = ui
                .add(Button::new("↻").min_size(BUTTON_SIZE))
                .on_hover_text("Rotate clockwise");

            if left.clicked() {
                self.compass.rotate_left(self.view);
            }
            if north.clicked() {
                self.compass.reset_north(self.view);
            }
            if right.clicked() {
                self.compass.rotate_right(self.view);
            }

            left | north | right
        })
        .inner
    }
}
