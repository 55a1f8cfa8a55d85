use mapkit::Messenger;

/// Messenger that asks egui to repaint when the view changes.
#[derive(Debug, Clone)]
pub struct EguiMessenger {
    context: egui::Context,
}

impl EguiMessenger {
    /// Creates a messenger for the given egui context.
    pub fn new(context: egui::Context) -> Self {
        Self { context }
    }
}

impl Messenger for EguiMessenger {
    fn request_redraw(&self) {
        log::trace!("Redraw requested");
        self.context.request_repaint();
    }
}
