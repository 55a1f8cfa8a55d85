/// Notifies the host application that the map view changed and needs to be redrawn.
pub trait Messenger: Send + Sync {
    /// Request a redraw of the map and its controls.
    fn request_redraw(&self);
}

/// Messenger that does nothing. Useful for headless views and tests.
#[derive(Debug, Default, Copy, Clone)]
pub struct DummyMessenger;

impl Messenger for DummyMessenger {
    fn request_redraw(&self) {}
}
