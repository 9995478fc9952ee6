// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The clock slider control: owned state, pointer input, and rendering.

use alloc::boxed::Box;
use alloc::string::String;
use core::fmt;

use kurbo::{Point, Size};
use tracing::{debug, trace};

use crate::angle::{
    ClockTime, HourCycle, angle_to_hours, hours_to_angle, normalize_hours, pointer_to_angle,
};
use crate::canvas::Canvas;
use crate::config::SliderConfig;
use crate::drag::{AngularDrag, Handle};
use crate::render::{HourSpan, RingLayout, render_frame};

/// Reported once when a drag gesture on a handle completes.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct TimeChanged {
    /// The handle that was dragged.
    pub handle: Handle,
    /// Where it was released, in whole hours and bucketed minutes.
    pub time: ClockTime,
}

/// Phase of a raw pointer event.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PointerPhase {
    /// The pointer was pressed.
    Down,
    /// The pointer moved.
    Move,
    /// The pointer was released.
    Up,
    /// The host aborted the gesture.
    Cancel,
}

/// A raw pointer event in the slider's local coordinates.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Phase of the event.
    pub phase: PointerPhase,
    /// Pointer position; ignored for [`PointerPhase::Cancel`].
    pub position: Point,
}

impl PointerEvent {
    /// Creates an event at `position`.
    pub fn new(phase: PointerPhase, position: impl Into<Point>) -> Self {
        Self {
            phase,
            position: position.into(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq)]
struct HandleState {
    hours: f64,
    angle: f64,
    enabled: bool,
}

impl HandleState {
    fn new(hours: f64, cycle: HourCycle) -> Self {
        let mut state = Self {
            hours: 0.0,
            angle: 0.0,
            enabled: true,
        };
        state.set_hours(hours, cycle);
        state
    }

    fn set_hours(&mut self, hours: f64, cycle: HourCycle) {
        self.hours = normalize_hours(hours, cycle);
        self.angle = hours_to_angle(self.hours, cycle);
    }

    fn set_angle(&mut self, angle: f64, cycle: HourCycle) {
        self.angle = angle;
        self.hours = angle_to_hours(angle, cycle);
    }
}

type TimeChangedListener = Box<dyn FnMut(TimeChanged)>;

/// A circular dual-handle time-range slider.
///
/// The slider owns its selection and drag state. Hosts feed it pointer events,
/// call [`ClockSlider::render`] once per frame, and poll
/// [`ClockSlider::take_redraw_request`] to learn when a new frame is needed.
///
/// ```
/// use understory_clock_slider::{ClockSlider, RecordingCanvas, SliderConfig};
///
/// let mut slider = ClockSlider::new(SliderConfig::default().with_end_hours(1.5));
/// let mut canvas = RecordingCanvas::new();
/// slider.render(&mut canvas, 600.0, 600.0);
/// assert_eq!(canvas.texts().last(), Some("1.5hr"));
///
/// // The start handle sits at 12 o'clock on the ring; grab it and drag to 3 o'clock.
/// assert!(slider.on_pointer_down((300.0, 36.0).into()));
/// assert!(slider.on_pointer_move((564.0, 300.0).into()));
/// assert!(slider.on_pointer_up((564.0, 300.0).into()));
/// assert!((slider.start_hours() - 3.0).abs() < 1e-9);
/// ```
pub struct ClockSlider {
    config: SliderConfig,
    start: HandleState,
    end: HandleState,
    drag: AngularDrag,
    enabled: bool,
    viewport: Size,
    redraw_requested: bool,
    scratch: String,
    listener: Option<TimeChangedListener>,
}

impl fmt::Debug for ClockSlider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClockSlider")
            .field("config", &self.config)
            .field("start", &self.start)
            .field("end", &self.end)
            .field("drag", &self.drag)
            .field("enabled", &self.enabled)
            .field("viewport", &self.viewport)
            .field("redraw_requested", &self.redraw_requested)
            .field("has_listener", &self.listener.is_some())
            .finish_non_exhaustive()
    }
}

impl Default for ClockSlider {
    fn default() -> Self {
        Self::new(SliderConfig::default())
    }
}

impl ClockSlider {
    /// Create a slider from `config`.
    ///
    /// The initial hours are taken from the configuration and normalized to
    /// its hour cycle.
    pub fn new(config: SliderConfig) -> Self {
        let cycle = config.hour_cycle;
        Self {
            start: HandleState::new(config.start_hours, cycle),
            end: HandleState::new(config.end_hours, cycle),
            config,
            drag: AngularDrag::default(),
            enabled: true,
            viewport: Size::ZERO,
            redraw_requested: true,
            scratch: String::new(),
            listener: None,
        }
    }

    /// The active configuration.
    #[inline]
    pub fn config(&self) -> &SliderConfig {
        &self.config
    }

    /// Replace the configuration wholesale.
    ///
    /// Start and end hours are reset from the new configuration and
    /// normalized to its hour cycle. An active drag is dropped without
    /// reporting a change.
    pub fn set_config(&mut self, config: SliderConfig) {
        if let Some(handle) = self.drag.end() {
            debug!(?handle, "configuration replaced during drag; dropping capture");
        }
        let cycle = config.hour_cycle;
        self.start.set_hours(config.start_hours, cycle);
        self.end.set_hours(config.end_hours, cycle);
        debug!(
            ?cycle,
            start_hours = self.start.hours,
            end_hours = self.end.hours,
            "replaced slider configuration"
        );
        self.config = config;
        self.request_redraw();
    }

    /// Register the sink for completed drags, replacing any previous one.
    pub fn set_time_changed_listener(&mut self, listener: impl FnMut(TimeChanged) + 'static) {
        self.listener = Some(Box::new(listener));
    }

    /// Remove the completed-drag sink.
    pub fn clear_time_changed_listener(&mut self) {
        self.listener = None;
    }

    /// Start of the selection, in `[0, modulus)` hours.
    #[inline]
    pub fn start_hours(&self) -> f64 {
        self.start.hours
    }

    /// End of the selection, in `[0, modulus)` hours.
    #[inline]
    pub fn end_hours(&self) -> f64 {
        self.end.hours
    }

    /// Pointer angle of the start handle, in `[0, 2π)`.
    #[inline]
    pub fn start_angle(&self) -> f64 {
        self.start.angle
    }

    /// Pointer angle of the end handle, in `[0, 2π)`.
    #[inline]
    pub fn end_angle(&self) -> f64 {
        self.end.angle
    }

    /// Move the start of the selection; `hours` is taken modulo the hour cycle.
    pub fn set_start_hours(&mut self, hours: f64) {
        self.start.set_hours(hours, self.config.hour_cycle);
        self.request_redraw();
    }

    /// Move the end of the selection; `hours` is taken modulo the hour cycle.
    pub fn set_end_hours(&mut self, hours: f64) {
        self.end.set_hours(hours, self.config.hour_cycle);
        self.request_redraw();
    }

    /// Returns `true` if the slider reacts to pointer input.
    #[inline]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Enable or disable pointer input for the whole slider.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
        self.request_redraw();
    }

    /// Returns `true` if the start handle can be grabbed.
    #[inline]
    pub fn is_start_enabled(&self) -> bool {
        self.start.enabled
    }

    /// Allow or forbid grabbing the start handle. A disabled handle is still drawn.
    pub fn set_start_enabled(&mut self, enabled: bool) {
        self.start.enabled = enabled;
        self.request_redraw();
    }

    /// Returns `true` if the end handle can be grabbed.
    #[inline]
    pub fn is_end_enabled(&self) -> bool {
        self.end.enabled
    }

    /// Allow or forbid grabbing the end handle. A disabled handle is still drawn.
    pub fn set_end_enabled(&mut self, enabled: bool) {
        self.end.enabled = enabled;
        self.request_redraw();
    }

    /// The handle currently being dragged, if any.
    #[inline]
    pub fn captured_handle(&self) -> Option<Handle> {
        self.drag.captured()
    }

    /// Returns `true` if state changed since the last [`take_redraw_request`](Self::take_redraw_request).
    #[inline]
    pub fn needs_redraw(&self) -> bool {
        self.redraw_requested
    }

    /// Clear and return the pending redraw request.
    pub fn take_redraw_request(&mut self) -> bool {
        core::mem::take(&mut self.redraw_requested)
    }

    /// Record the size the slider is laid out at.
    ///
    /// Hit testing uses the most recent size from here or from [`render`](Self::render).
    pub fn set_size(&mut self, width: f64, height: f64) {
        self.viewport = Size::new(width, height);
    }

    /// Ring geometry for the current size.
    pub fn layout(&self) -> RingLayout {
        RingLayout::new(
            self.viewport.width,
            self.viewport.height,
            self.config.border_width,
        )
    }

    /// The grabbable handle under `pos`, if any.
    ///
    /// Each handle is a circle of radius `border_width` on the ring. When the
    /// two overlap the start handle wins.
    pub fn handle_at(&self, pos: Point) -> Option<Handle> {
        let layout = self.layout();
        let radius = self.config.border_width;
        [(Handle::Start, &self.start), (Handle::End, &self.end)]
            .into_iter()
            .find(|(_, state)| {
                state.enabled && layout.handle_center(state.angle).distance(pos) < radius
            })
            .map(|(handle, _)| handle)
    }

    /// Pointer pressed at `pos`. Returns `true` if a handle was captured.
    pub fn on_pointer_down(&mut self, pos: Point) -> bool {
        if let Some(handle) = self.drag.captured() {
            trace!(?handle, "pointer down ignored during drag");
            return false;
        }
        if !self.enabled {
            return false;
        }
        let Some(handle) = self.handle_at(pos) else {
            return false;
        };
        let angle = pointer_to_angle(pos, self.layout().center);
        self.drag.start(handle, angle);
        debug!(?handle, angle, "captured handle");
        true
    }

    /// Pointer moved to `pos`. Returns `true` if a captured handle moved.
    pub fn on_pointer_move(&mut self, pos: Point) -> bool {
        let Some(handle) = self.drag.captured() else {
            return false;
        };
        if !self.enabled {
            return false;
        }
        let pointer = pointer_to_angle(pos, self.layout().center);
        let current = self.handle_state(handle).angle;
        let Some(next) = self.drag.update(current, pointer) else {
            return false;
        };
        let cycle = self.config.hour_cycle;
        let state = self.handle_state_mut(handle);
        state.set_angle(next, cycle);
        trace!(?handle, angle = next, hours = state.hours, "dragged handle");
        self.request_redraw();
        true
    }

    /// Pointer released. Reports the dragged handle's time and returns `true`
    /// if a drag was active.
    pub fn on_pointer_up(&mut self, _pos: Point) -> bool {
        let Some(handle) = self.drag.end() else {
            return false;
        };
        let time = ClockTime::from_hours(self.handle_state(handle).hours);
        debug!(?handle, %time, "released handle");
        if let Some(listener) = self.listener.as_mut() {
            listener(TimeChanged { handle, time });
        }
        true
    }

    /// Gesture aborted by the host. Ends any drag without reporting a change.
    pub fn on_pointer_cancel(&mut self) -> bool {
        let Some(handle) = self.drag.end() else {
            return false;
        };
        debug!(?handle, "drag cancelled");
        true
    }

    /// Dispatch a [`PointerEvent`] to the matching `on_pointer_*` method.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        match event.phase {
            PointerPhase::Down => self.on_pointer_down(event.position),
            PointerPhase::Move => self.on_pointer_move(event.position),
            PointerPhase::Up => self.on_pointer_up(event.position),
            PointerPhase::Cancel => self.on_pointer_cancel(),
        }
    }

    /// Draw the current state into `canvas` at `width` × `height`.
    ///
    /// The size is remembered for hit testing subsequent pointer events.
    pub fn render<C: Canvas + ?Sized>(&mut self, canvas: &mut C, width: f64, height: f64) {
        self.set_size(width, height);
        let layout = self.layout();
        let span = HourSpan {
            start_hours: self.start.hours,
            end_hours: self.end.hours,
        };
        render_frame(canvas, &self.config, span, &layout, &mut self.scratch);
    }

    fn request_redraw(&mut self) {
        self.redraw_requested = true;
    }

    fn handle_state(&self, handle: Handle) -> &HandleState {
        match handle {
            Handle::Start => &self.start,
            Handle::End => &self.end,
        }
    }

    fn handle_state_mut(&mut self, handle: Handle) -> &mut HandleState {
        match handle {
            Handle::Start => &mut self.start,
            Handle::End => &mut self.end,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::vec::Vec;
    use core::cell::RefCell;
    use core::f64::consts::TAU;

    fn sized(config: SliderConfig) -> ClockSlider {
        let mut slider = ClockSlider::new(config);
        slider.set_size(600.0, 600.0);
        slider
    }

    fn recorder(slider: &mut ClockSlider) -> Rc<RefCell<Vec<TimeChanged>>> {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&seen);
        slider.set_time_changed_listener(move |event| sink.borrow_mut().push(event));
        seen
    }

    #[test]
    fn setters_normalize_and_sync_angle() {
        let mut slider = sized(SliderConfig::default());
        slider.take_redraw_request();

        slider.set_start_hours(13.0);
        assert!((slider.start_hours() - 1.0).abs() < 1e-9);
        assert!((slider.start_angle() - TAU / 12.0).abs() < 1e-9);
        assert!(slider.take_redraw_request());
        assert!(!slider.needs_redraw());

        slider.set_end_hours(-3.0);
        assert!((slider.end_hours() - 9.0).abs() < 1e-9);
        assert!((slider.end_angle() - 0.75 * TAU).abs() < 1e-9);
    }

    #[test]
    fn construction_normalizes_configured_hours() {
        let slider = ClockSlider::new(
            SliderConfig::default()
                .with_hour_cycle(HourCycle::TwentyFour)
                .with_start_hours(25.0)
                .with_end_hours(-2.0),
        );
        assert!((slider.start_hours() - 1.0).abs() < 1e-9);
        assert!((slider.end_hours() - 22.0).abs() < 1e-9);
        assert!(slider.needs_redraw());
    }

    #[test]
    fn overlapping_handles_prefer_start() {
        let slider = sized(SliderConfig::default());
        assert_eq!(slider.handle_at(Point::new(300.0, 36.0)), Some(Handle::Start));
        assert_eq!(slider.handle_at(Point::new(300.0, 300.0)), None);
    }

    #[test]
    fn disabled_start_handle_yields_to_end() {
        let mut slider = sized(SliderConfig::default());
        slider.set_start_enabled(false);
        assert!(!slider.is_start_enabled());
        assert_eq!(slider.handle_at(Point::new(300.0, 36.0)), Some(Handle::End));

        slider.set_end_enabled(false);
        assert!(!slider.on_pointer_down(Point::new(300.0, 36.0)));
        assert_eq!(slider.captured_handle(), None);
    }

    #[test]
    fn disabled_slider_ignores_press() {
        let mut slider = sized(SliderConfig::default());
        slider.set_enabled(false);
        assert!(!slider.is_enabled());
        assert!(!slider.on_pointer_down(Point::new(300.0, 36.0)));
        assert_eq!(slider.captured_handle(), None);
    }

    #[test]
    fn press_outside_handles_is_not_consumed() {
        let mut slider = sized(SliderConfig::default());
        assert!(!slider.on_pointer_down(Point::new(300.0, 300.0)));
        assert!(!slider.on_pointer_move(Point::new(310.0, 300.0)));
        assert!(!slider.on_pointer_up(Point::new(310.0, 300.0)));
        assert!(!slider.on_pointer_cancel());
    }

    #[test]
    fn second_press_during_drag_is_ignored() {
        let mut slider = sized(SliderConfig::default().with_end_hours(3.0));
        assert!(slider.on_pointer_down(Point::new(300.0, 36.0)));
        let before = slider.drag;

        // The end handle sits at 3 o'clock.
        assert!(!slider.on_pointer_down(Point::new(564.0, 300.0)));
        assert_eq!(slider.drag, before);
        assert_eq!(slider.captured_handle(), Some(Handle::Start));
    }

    #[test]
    fn up_reports_dragged_handle_once() {
        let mut slider = sized(SliderConfig::default().with_end_hours(3.0));
        let seen = recorder(&mut slider);

        assert!(slider.on_pointer_down(Point::new(564.0, 300.0)));
        assert_eq!(slider.captured_handle(), Some(Handle::End));
        // 191° is 6h22m, reported as 6:20.
        let target = slider.layout().handle_center(191_f64.to_radians());
        assert!(slider.on_pointer_move(target));
        assert!(seen.borrow().is_empty());

        assert!(slider.on_pointer_up(target));
        assert!(!slider.on_pointer_up(target));

        let seen = seen.borrow();
        assert_eq!(seen.len(), 1);
        assert_eq!(seen[0].handle, Handle::End);
        assert_eq!(seen[0].time, ClockTime::from_hours(slider.end_hours()));
        assert_eq!(seen[0].time.hour, 6);
        assert_eq!(seen[0].time.minute, 20);
    }

    #[test]
    fn cancel_drops_drag_silently() {
        let mut slider = sized(SliderConfig::default());
        let seen = recorder(&mut slider);

        assert!(slider.on_pointer_down(Point::new(300.0, 36.0)));
        assert!(slider.on_pointer_cancel());
        assert_eq!(slider.captured_handle(), None);
        assert!(!slider.on_pointer_up(Point::new(300.0, 36.0)));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn disabling_mid_drag_freezes_handle() {
        let mut slider = sized(SliderConfig::default());
        assert!(slider.on_pointer_down(Point::new(300.0, 36.0)));
        slider.set_enabled(false);
        assert!(!slider.on_pointer_move(Point::new(564.0, 300.0)));
        assert!(slider.start_hours().abs() < 1e-9);
    }

    #[test]
    fn set_config_renormalizes_and_cancels() {
        let mut slider = sized(
            SliderConfig::default()
                .with_hour_cycle(HourCycle::TwentyFour)
                .with_start_hours(20.0),
        );
        assert!((slider.start_hours() - 20.0).abs() < 1e-9);
        assert!(slider.on_pointer_down(slider.layout().handle_center(slider.start_angle())));
        let seen = recorder(&mut slider);

        slider.take_redraw_request();
        slider.set_config(SliderConfig::default().with_start_hours(20.0).with_end_hours(13.5));

        assert_eq!(slider.captured_handle(), None);
        assert!((slider.start_hours() - 8.0).abs() < 1e-9);
        assert!((slider.end_hours() - 1.5).abs() < 1e-9);
        assert!((slider.start_angle() - hours_to_angle(8.0, HourCycle::Twelve)).abs() < 1e-9);
        assert!(slider.needs_redraw());
        assert!(!slider.on_pointer_up(Point::ORIGIN));
        assert!(seen.borrow().is_empty());
    }

    #[test]
    fn handle_pointer_dispatches_by_phase() {
        let mut slider = sized(SliderConfig::default());
        let top = (300.0, 36.0);
        assert!(slider.handle_pointer(&PointerEvent::new(PointerPhase::Down, top)));
        assert!(slider.handle_pointer(&PointerEvent::new(PointerPhase::Move, (564.0, 300.0))));
        assert!(slider.handle_pointer(&PointerEvent::new(PointerPhase::Cancel, Point::ORIGIN)));
        assert!(!slider.handle_pointer(&PointerEvent::new(PointerPhase::Up, top)));
        assert!((slider.start_hours() - 3.0).abs() < 1e-9);
    }

    #[test]
    fn debug_output_omits_listener_body() {
        let mut slider = ClockSlider::default();
        slider.set_time_changed_listener(|_| {});
        let text = alloc::format!("{slider:?}");
        assert!(text.contains("has_listener: true"));
        slider.clear_time_changed_listener();
        assert!(alloc::format!("{slider:?}").contains("has_listener: false"));
    }
}
