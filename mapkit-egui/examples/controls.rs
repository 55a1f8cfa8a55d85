//! Example showing map controls in an egui application.
//!
//! Run with an optional path to a JSON controls configuration:
//!
//! ```sh
//! cargo run --example controls -- controls.json
//! ```

use eframe::CreationContext;
use mapkit::{ControlsConfig, ControlsPosition, MapView, ZoomView};
use mapkit_egui::{show_view_state, ControlsPanel};

const STORAGE_KEY: &str = "mapkit_controls_example";

#[derive(serde::Deserialize, serde::Serialize)]
#[serde(default)]
struct AppStorage {
    zoom: f64,
    rotation: f64,
}

impl Default for AppStorage {
    fn default() -> Self {
        Self {
            zoom: 8.0,
            rotation: 0.0,
        }
    }
}

struct ControlsExampleApp {
    view: MapView,
    panel: ControlsPanel,
}

impl ControlsExampleApp {
    fn new(mut view: MapView, panel: ControlsPanel, cc: &CreationContext<'_>) -> Self {
        if let Some(stored) = cc
            .storage
            .and_then(|storage| eframe::get_value::<AppStorage>(storage, STORAGE_KEY))
        {
            view.set_zoom(stored.zoom);
            view.set_rotation(stored.rotation);
        }

        Self { view, panel }
    }
}

impl eframe::App for ControlsExampleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            show_view_state(ui, &self.view);
        });

        egui::Window::new("Controls").show(ctx, |ui| {
            let mut position = self.panel.config().position();
            egui::ComboBox::from_label("Position")
                .selected_text(position.as_str())
                .show_ui(ui, |ui| {
                    for option in ControlsPosition::ALL {
                        ui.selectable_value(&mut position, option, option.as_str());
                    }
                });

            if position != self.panel.config().position() {
                self.panel.set_position(position);
            }

            let zoom = self.panel.config().zoom();
            ui.label(format!(
                "Step {} every {} ms while held",
                zoom.step(),
                zoom.interval().as_millis()
            ));
        });

        self.panel.show(ctx, &mut self.view);
    }

    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(
            storage,
            STORAGE_KEY,
            &AppStorage {
                zoom: self.view.zoom().unwrap_or(8.0),
                rotation: self.view.rotation(),
            },
        );
    }
}

fn load_config() -> ControlsConfig {
    let Some(path) = std::env::args().nth(1) else {
        return ControlsConfig::default();
    };

    let json = std::fs::read_to_string(&path).expect("failed to read configuration file");
    ControlsConfig::from_json(&json).expect("invalid configuration")
}

fn main() {
    mapkit_egui::InitBuilder::new(MapView::new(8.0))
        .with_config(load_config())
        .with_app_builder(|view, panel, cc| Box::new(ControlsExampleApp::new(view, panel, cc)))
        .init()
        .expect("failed to initialize");
}
