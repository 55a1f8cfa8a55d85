use egui::{Button, Response, Ui, Vec2, Widget};
use mapkit::control::{ZoomControl, ZoomDirection};
use mapkit::ZoomView;
use web_time::Instant;

pub(crate) const BUTTON_SIZE: Vec2 = Vec2::new(28.0, 28.0);

/// Zoom-in and zoom-out buttons.
///
/// Pressing a button zooms the view one step at once and keeps zooming while the button is
/// held. Releasing the button or dragging the pointer off it stops zooming; dragging back onto
/// the button does not resume until it is pressed again. The widget asks egui to repaint in
/// time for the next zoom step while a button is held.
pub struct ZoomButtons<'a, V: ZoomView + ?Sized> {
    control: &'a mut ZoomControl,
    view: &'a mut V,
    now: Option<Instant>,
}

impl<'a, V: ZoomView + ?Sized> ZoomButtons<'a, V> {
    /// Creates the widget for the given control and view.
    pub fn new(control: &'a mut ZoomControl, view: &'a mut V) -> Self {
        Self {
            control,
            view,
            now: None,
        }
    }

    /// Uses `now` as the frame time instead of reading the clock.
    pub fn at(mut self, now: Instant) -> Self {
        self.now = Some(now);
        self
    }
}

impl<V: ZoomView + ?Sized> Widget for ZoomButtons<'_, V> {
    fn ui(self, ui: &mut Ui) -> Response {
        let now = self.now.unwrap_or_else(Instant::now);
        let latch_id = ui.make_persistent_id("mapkit_zoom_press");

        ui.vertical(|ui| {
            let zoom_in = ui
                .add(Button::new("+").min_size(BUTTON_SIZE))
                .on_hover_text("Zoom in");
            let zoom_out = ui
                .add(Button::new("−").min_size(BUTTON_SIZE))
                .on_hover_text("Zoom out");

            let (pressed, time) = ui.input(|input| (input.pointer.primary_pressed(), input.time));
            let frame = FrameInput {
                zoom_in: ButtonState::from_response(&zoom_in),
                zoom_out: ButtonState::from_response(&zoom_out),
                pressed,
                time,
            };

            let mut latch = PressLatch(ui.data(|data| data.get_temp::<f64>(latch_id)));
            update_press(self.control, &frame, &mut latch, now, self.view);
            if let Some(time) = latch.0 {
                ui.data_mut(|data| data.insert_temp(latch_id, time));
            }

            if let Some(next_tick) = self.control.next_tick_in(now) {
                ui.ctx().request_repaint_after(next_tick);
            }

            zoom_in | zoom_out
        })
        .inner
    }
}

/// Pointer state of one zoom button in the current frame.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub(crate) struct ButtonState {
    pub down: bool,
    pub hovered: bool,
    pub clicked: bool,
}

impl ButtonState {
    fn from_response(response: &Response) -> Self {
        Self {
            down: response.is_pointer_button_down_on(),
            hovered: response.contains_pointer(),
            clicked: response.clicked(),
        }
    }
}

/// Everything the zoom buttons read from one egui frame.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub(crate) struct FrameInput {
    pub zoom_in: ButtonState,
    pub zoom_out: ButtonState,
    /// The primary pointer button went down during this frame.
    pub pressed: bool,
    /// egui input time of the frame, in seconds.
    pub time: f64,
}

impl FrameInput {
    fn button(&self, direction: ZoomDirection) -> ButtonState {
        match direction {
            ZoomDirection::In => self.zoom_in,
            ZoomDirection::Out => self.zoom_out,
        }
    }

    /// The button a fresh press went down on and is still held.
    fn pressed_button(&self) -> Option<ZoomDirection> {
        if !self.pressed {
            None
        } else if self.zoom_in.down {
            Some(ZoomDirection::In)
        } else if self.zoom_out.down {
            Some(ZoomDirection::Out)
        } else {
            None
        }
    }

    /// The button pressed and released within this frame.
    fn tapped_button(&self) -> Option<ZoomDirection> {
        if !self.pressed {
            None
        } else if self.zoom_in.clicked {
            Some(ZoomDirection::In)
        } else if self.zoom_out.clicked {
            Some(ZoomDirection::Out)
        } else {
            None
        }
    }
}

/// Input time of the last pointer press that already zoomed.
///
/// egui may run the same frame more than once; the latch keeps a press from zooming twice.
#[derive(Debug, Default, Copy, Clone, PartialEq)]
pub(crate) struct PressLatch(Option<f64>);

impl PressLatch {
    fn take(&mut self, time: f64) -> bool {
        if self.0 == Some(time) {
            return false;
        }

        self.0 = Some(time);
        true
    }
}

/// Moves the zoom control to the state matching the buttons in this frame.
///
/// Sessions only start on a press made during this frame. A session ends when its button is
/// released or the pointer leaves it, and stays ended until the next press.
pub(crate) fn update_press<V: ZoomView + ?Sized>(
    control: &mut ZoomControl,
    frame: &FrameInput,
    latch: &mut PressLatch,
    now: Instant,
    view: &mut V,
) {
    if let Some(direction) = frame.pressed_button() {
        if latch.take(frame.time) {
            control.press_start(direction, now, view);
        }
    }

    if let Some(direction) = control.direction() {
        let button = frame.button(direction);
        if !button.down {
            control.press_end(now, view);
        } else if !button.hovered {
            control.pointer_left(now, view);
        } else {
            control.advance(now, view);
        }

        return;
    }

    if let Some(direction) = frame.tapped_button() {
        if latch.take(frame.time) {
            log::debug!("Zoom button tapped within one frame");
            control.press_start(direction, now, view);
            control.press_end(now, view);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use approx::assert_relative_eq;
    use egui::{CentralPanel, Context, Event, Modifiers, PointerButton, Pos2, RawInput, Rect};
    use mapkit::MapView;

    use super::*;

    const UP: ButtonState = ButtonState {
        down: false,
        hovered: true,
        clicked: false,
    };
    const HELD: ButtonState = ButtonState {
        down: true,
        hovered: true,
        clicked: false,
    };
    const DRAGGED_OFF: ButtonState = ButtonState {
        down: true,
        hovered: false,
        clicked: false,
    };
    const CLICKED: ButtonState = ButtonState {
        down: false,
        hovered: true,
        clicked: true,
    };

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn frame(time: f64, zoom_in: ButtonState, zoom_out: ButtonState, pressed: bool) -> FrameInput {
        FrameInput {
            zoom_in,
            zoom_out,
            pressed,
            time,
        }
    }

    #[test]
    fn click_zooms_one_step() {
        let mut control = ZoomControl::default();
        let mut latch = PressLatch::default();
        let mut view = MapView::new(8.0);
        let start = Instant::now();

        update_press(&mut control, &frame(0.0, HELD, UP, true), &mut latch, start, &mut view);
        update_press(
            &mut control,
            &frame(0.016, CLICKED, UP, false),
            &mut latch,
            start + ms(16),
            &mut view,
        );
        assert_relative_eq!(view.zoom().unwrap(), 8.5);

        update_press(
            &mut control,
            &frame(0.032, UP, HELD, true),
            &mut latch,
            start + ms(32),
            &mut view,
        );
        update_press(
            &mut control,
            &frame(0.048, UP, CLICKED, false),
            &mut latch,
            start + ms(48),
            &mut view,
        );
        assert_relative_eq!(view.zoom().unwrap(), 8.0);
        assert!(!control.is_pressing());
    }

    #[test]
    fn tap_within_one_frame_zooms_one_step() {
        let mut control = ZoomControl::default();
        let mut latch = PressLatch::default();
        let mut view = MapView::new(8.0);
        let start = Instant::now();

        update_press(&mut control, &frame(0.0, CLICKED, UP, true), &mut latch, start, &mut view);
        assert_relative_eq!(view.zoom().unwrap(), 8.5);
        assert!(!control.is_pressing());

        update_press(
            &mut control,
            &frame(0.5, UP, CLICKED, true),
            &mut latch,
            start + ms(500),
            &mut view,
        );
        assert_relative_eq!(view.zoom().unwrap(), 8.0);
    }

    #[test]
    fn repeated_pass_of_a_frame_zooms_once() {
        let mut control = ZoomControl::default();
        let mut latch = PressLatch::default();
        let mut view = MapView::new(8.0);
        let start = Instant::now();

        let tap = frame(0.0, CLICKED, UP, true);
        update_press(&mut control, &tap, &mut latch, start, &mut view);
        update_press(&mut control, &tap, &mut latch, start, &mut view);
        assert_relative_eq!(view.zoom().unwrap(), 8.5);

        let press = frame(1.0, HELD, UP, true);
        update_press(&mut control, &press, &mut latch, start + ms(1000), &mut view);
        update_press(&mut control, &press, &mut latch, start + ms(1000), &mut view);
        assert_relative_eq!(view.zoom().unwrap(), 9.0);
        assert!(control.is_pressing());
    }

    #[test]
    fn held_button_zooms_on_frames() {
        let mut control = ZoomControl::default();
        let mut latch = PressLatch::default();
        let mut view = MapView::new(8.0);
        let start = Instant::now();

        update_press(&mut control, &frame(0.0, HELD, UP, true), &mut latch, start, &mut view);
        update_press(
            &mut control,
            &frame(0.11, HELD, UP, false),
            &mut latch,
            start + ms(110),
            &mut view,
        );
        update_press(
            &mut control,
            &frame(0.21, HELD, UP, false),
            &mut latch,
            start + ms(210),
            &mut view,
        );
        assert_relative_eq!(view.zoom().unwrap(), 9.5);

        update_press(
            &mut control,
            &frame(0.25, CLICKED, UP, false),
            &mut latch,
            start + ms(250),
            &mut view,
        );
        update_press(
            &mut control,
            &frame(0.75, UP, UP, false),
            &mut latch,
            start + ms(750),
            &mut view,
        );
        assert_relative_eq!(view.zoom().unwrap(), 9.5);
    }

    #[test]
    fn dragging_off_the_button_stops_zoom() {
        let mut control = ZoomControl::default();
        let mut latch = PressLatch::default();
        let mut view = MapView::new(8.0);
        let start = Instant::now();

        update_press(&mut control, &frame(0.0, HELD, UP, true), &mut latch, start, &mut view);
        update_press(
            &mut control,
            &frame(0.05, DRAGGED_OFF, UP, false),
            &mut latch,
            start + ms(50),
            &mut view,
        );
        assert!(!control.is_pressing());

        update_press(
            &mut control,
            &frame(0.5, DRAGGED_OFF, UP, false),
            &mut latch,
            start + ms(500),
            &mut view,
        );
        assert_relative_eq!(view.zoom().unwrap(), 8.5);
    }

    #[test]
    fn dragging_back_onto_the_button_does_not_resume() {
        let mut control = ZoomControl::default();
        let mut latch = PressLatch::default();
        let mut view = MapView::new(8.0);
        let start = Instant::now();

        update_press(&mut control, &frame(0.0, HELD, UP, true), &mut latch, start, &mut view);
        update_press(
            &mut control,
            &frame(0.05, DRAGGED_OFF, UP, false),
            &mut latch,
            start + ms(50),
            &mut view,
        );
        update_press(
            &mut control,
            &frame(0.15, HELD, UP, false),
            &mut latch,
            start + ms(150),
            &mut view,
        );
        assert!(!control.is_pressing());

        update_press(
            &mut control,
            &frame(0.6, CLICKED, UP, false),
            &mut latch,
            start + ms(600),
            &mut view,
        );
        assert_relative_eq!(view.zoom().unwrap(), 8.5);
        assert!(!control.is_pressing());
    }

    #[test]
    fn pressing_other_button_restarts_session() {
        let mut control = ZoomControl::default();
        let mut latch = PressLatch::default();
        let mut view = MapView::new(8.0);
        let start = Instant::now();

        update_press(&mut control, &frame(0.0, HELD, UP, true), &mut latch, start, &mut view);
        update_press(
            &mut control,
            &frame(0.05, UP, HELD, true),
            &mut latch,
            start + ms(50),
            &mut view,
        );
        assert_eq!(control.direction(), Some(ZoomDirection::Out));
        assert_relative_eq!(view.zoom().unwrap(), 8.0);
    }

    /// Runs egui frames with [`ZoomButtons`] in a central panel.
    struct Harness {
        ctx: Context,
        control: ZoomControl,
        view: MapView,
        start: Instant,
        buttons: Rect,
    }

    impl Harness {
        fn new(zoom: f64) -> Self {
            let mut harness = Self {
                ctx: Context::default(),
                control: ZoomControl::default(),
                view: MapView::new(zoom),
                start: Instant::now(),
                buttons: Rect::NOTHING,
            };

            // Lay the buttons out once so that pointer events can hit them.
            harness.run(0, vec![]);
            harness
        }

        fn run(&mut self, at_ms: u64, events: Vec<Event>) {
            let input = RawInput {
                screen_rect: Some(Rect::from_min_size(Pos2::ZERO, Vec2::new(800.0, 600.0))),
                time: Some(at_ms as f64 / 1000.0),
                events,
                ..Default::default()
            };

            let now = self.start + ms(at_ms);
            let control = &mut self.control;
            let view = &mut self.view;
            let buttons = &mut self.buttons;
            let _ = self.ctx.run(input, |ctx| {
                CentralPanel::default().show(ctx, |ui| {
                    *buttons = ui.add(ZoomButtons::new(control, view).at(now)).rect;
                });
            });
        }

        fn zoom_in_pos(&self) -> Pos2 {
            self.buttons.left_top() + BUTTON_SIZE / 2.0
        }

        fn zoom_out_pos(&self) -> Pos2 {
            self.buttons.left_bottom() + Vec2::new(BUTTON_SIZE.x, -BUTTON_SIZE.y) / 2.0
        }

        fn zoom(&self) -> f64 {
            self.view.zoom().unwrap()
        }
    }

    fn moved(pos: Pos2) -> Event {
        Event::PointerMoved(pos)
    }

    fn button(pos: Pos2, pressed: bool) -> Event {
        Event::PointerButton {
            pos,
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    #[test]
    fn egui_tap_in_one_frame() {
        let mut harness = Harness::new(8.0);

        let pos = harness.zoom_in_pos();
        harness.run(100, vec![moved(pos), button(pos, true), button(pos, false)]);
        assert_relative_eq!(harness.zoom(), 8.5);
        assert!(!harness.control.is_pressing());

        let pos = harness.zoom_out_pos();
        harness.run(600, vec![moved(pos), button(pos, true), button(pos, false)]);
        assert_relative_eq!(harness.zoom(), 8.0);
        assert!(!harness.control.is_pressing());
    }

    #[test]
    fn egui_tap_over_two_frames() {
        let mut harness = Harness::new(8.0);

        let pos = harness.zoom_in_pos();
        harness.run(100, vec![moved(pos), button(pos, true)]);
        harness.run(116, vec![button(pos, false)]);
        assert_relative_eq!(harness.zoom(), 8.5);
        assert!(!harness.control.is_pressing());
    }

    #[test]
    fn egui_hold_zooms_until_release() {
        let mut harness = Harness::new(8.0);

        let pos = harness.zoom_in_pos();
        harness.run(100, vec![moved(pos), button(pos, true)]);
        assert_relative_eq!(harness.zoom(), 8.5);
        assert!(harness.control.is_pressing());

        harness.run(350, vec![]);
        assert_relative_eq!(harness.zoom(), 9.5);

        harness.run(360, vec![button(pos, false)]);
        assert!(!harness.control.is_pressing());

        harness.run(900, vec![]);
        assert_relative_eq!(harness.zoom(), 9.5);
    }

    #[test]
    fn egui_drag_off_and_back() {
        let mut harness = Harness::new(8.0);

        let pos = harness.zoom_in_pos();
        harness.run(100, vec![moved(pos), button(pos, true)]);
        harness.run(150, vec![moved(Pos2::new(500.0, 500.0))]);
        assert!(!harness.control.is_pressing());

        harness.run(250, vec![moved(pos)]);
        assert!(!harness.control.is_pressing());

        harness.run(600, vec![button(pos, false)]);
        harness.run(900, vec![]);
        assert_relative_eq!(harness.zoom(), 8.5);
        assert!(!harness.control.is_pressing());
    }
}
