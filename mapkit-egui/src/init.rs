use eframe::AppCreator;
use mapkit::{ControlsConfig, MapView, ZoomView};

use crate::{ControlsPanel, EguiMessenger};

/// Default app: shows the view readout and the controls over it.
struct ControlsApp {
    view: MapView,
    panel: ControlsPanel,
}

impl eframe::App for ControlsApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        egui::CentralPanel::default().show(ctx, |ui| {
            show_view_state(ui, &self.view);
        });

        self.panel.show(ctx, &mut self.view);
    }
}

/// Shows zoom level and rotation of the view as text.
pub fn show_view_state(ui: &mut egui::Ui, view: &impl ZoomView) {
    match view.zoom() {
        Some(zoom) => ui.label(format!("Zoom: {zoom:.2}")),
        None => ui.label("Zoom: not set"),
    };
    ui.label(format!("Rotation: {:.1}°", view.rotation().to_degrees()));
}

type AppBuilder =
    Box<dyn FnOnce(MapView, ControlsPanel, &eframe::CreationContext<'_>) -> Box<dyn eframe::App>>;

/// Runs an eframe application showing map controls.
pub struct InitBuilder {
    view: MapView,
    config: ControlsConfig,
    native_options: Option<eframe::NativeOptions>,
    app_builder: Option<AppBuilder>,
}

impl InitBuilder {
    /// Creates a builder for the given view.
    pub fn new(view: MapView) -> Self {
        Self {
            view,
            config: ControlsConfig::default(),
            native_options: None,
            app_builder: None,
        }
    }

    /// Sets configuration of the controls.
    pub fn with_config(mut self, config: ControlsConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets eframe options of the native window.
    pub fn with_native_options(mut self, options: eframe::NativeOptions) -> Self {
        self.native_options = Some(options);
        self
    }

    /// Sets a function creating the app. Without it a default app is shown.
    pub fn with_app_builder(
        mut self,
        app_builder: impl FnOnce(MapView, ControlsPanel, &eframe::CreationContext<'_>) -> Box<dyn eframe::App>
            + 'static,
    ) -> Self {
        self.app_builder = Some(Box::new(app_builder));
        self
    }

    /// Starts the app. Blocks until the window is closed.
    pub fn init(self) -> eframe::Result {
        env_logger::init();

        let panel = match ControlsPanel::new(self.config) {
            Ok(panel) => panel,
            Err(err) => {
                log::warn!("Invalid controls configuration, using defaults: {err}");
                ControlsPanel::default()
            }
        };

        let native_options = self.native_options.unwrap_or_default();
        let app_creator: AppCreator<'static> = app_creator(self.view, panel, self.app_builder);

        eframe::run_native("Mapkit controls", native_options, app_creator)
    }
}

fn app_creator<'app>(
    mut view: MapView,
    panel: ControlsPanel,
    app_builder: Option<AppBuilder>,
) -> AppCreator<'app> {
    Box::new(move |cc: &eframe::CreationContext<'_>| {
        view.set_messenger(Some(EguiMessenger::new(cc.egui_ctx.clone())));

        let app: Box<dyn eframe::App> = match app_builder {
            Some(builder) => builder(view, panel, cc),
            None => Box::new(ControlsApp { view, panel }),
        };

        Ok(app)
    })
}
