// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Frame rendering: turns the selection and configuration into draw ops.
//!
//! A frame is always the same sequence, back to front:
//!
//! 1. the full ring,
//! 2. the selected arc from start to end,
//! 3. the start icon, then the end icon,
//! 4. twelve major ticks, each followed by its label,
//! 5. sixty minor ticks,
//! 6. the duration readout in the center.

use alloc::string::String;
use core::fmt::Write as _;

#[cfg(not(feature = "std"))]
use kurbo::common::FloatFuncs as _; // for `sin_cos`
use kurbo::{Arc, Cap, Line, Point, Rect, Stroke, Vec2};

use crate::angle::{HourCycle, draw_angle, duration_minutes, fill_sweep_degrees};
use crate::canvas::{Canvas, CanvasExt, IconId, TextStyle};
use crate::config::{MetricMode, SliderConfig};

/// Length of a major tick, measured inward from the ring.
pub const MAJOR_TICK_SIZE: f64 = 80.0;
/// Length of a minor tick, measured inward from the ring.
pub const MINOR_TICK_SIZE: f64 = 50.0;
/// Stroke width of a major tick.
pub const MAJOR_TICK_WIDTH: f64 = 6.0;
/// Stroke width of a minor tick.
pub const MINOR_TICK_WIDTH: f64 = 3.0;
/// Gap between the inner edge of the ring and the outer end of the ticks.
pub const TICK_MARGIN: f64 = 30.0;
/// Gap between the inner end of a major tick and its label.
pub const TICK_TEXT_MARGIN: f64 = 15.0;
/// Font size of the hour labels.
pub const TICK_TEXT_SIZE: f64 = 40.0;
/// Major ticks drawn around the face, one per face unit.
pub const MAJOR_TICK_COUNT: u32 = 12;
/// Face units between minor ticks.
pub const MINOR_TICK_STEP: f64 = 0.2;
/// Minor ticks drawn around the full face.
pub const MINOR_TICK_COUNT: u32 = 60;

/// Ring start angle for arcs, in degrees (12 o'clock in y-down space).
const ARC_START_DEGREES: f64 = -90.0;

/// Geometry of the ring for a given canvas size.
///
/// The ring sits in the largest centered square; its centerline is inset by
/// half the border width.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RingLayout {
    /// Center of the canvas.
    pub center: Point,
    /// Half the side of the largest centered square.
    pub half_extent: f64,
    /// Ring stroke width.
    pub border_width: f64,
}

impl RingLayout {
    /// Layout for a `width` × `height` canvas.
    pub fn new(width: f64, height: f64, border_width: f64) -> Self {
        Self {
            center: Point::new(width / 2.0, height / 2.0),
            half_extent: width.min(height) / 2.0,
            border_width,
        }
    }

    /// Radius of the ring's centerline.
    #[inline]
    pub fn ring_radius(&self) -> f64 {
        self.half_extent - self.border_width / 2.0
    }

    /// Center of a handle at pointer angle `angle` (clockwise from 12 o'clock).
    pub fn handle_center(&self, angle: f64) -> Point {
        let (sin, cos) = angle.sin_cos();
        let r = self.ring_radius();
        self.center + Vec2::new(r * sin, -r * cos)
    }

    /// Point at `radius` along drawing angle `degrees` (counter-clockwise, y up).
    pub fn point_at(&self, radius: f64, degrees: f64) -> Point {
        let (sin, cos) = degrees.to_radians().sin_cos();
        self.center + Vec2::new(radius * cos, -radius * sin)
    }

    /// Radius, inward from the ring, at `inset` past the border.
    #[inline]
    fn inner_radius(&self, inset: f64) -> f64 {
        self.half_extent - self.border_width - inset
    }

    fn ring_arc(&self, start_degrees: f64, sweep_degrees: f64) -> Arc {
        let r = self.ring_radius();
        Arc::new(
            self.center,
            Vec2::new(r, r),
            start_degrees.to_radians(),
            sweep_degrees.to_radians(),
            0.0,
        )
    }
}

/// Current start and end of the selection, in normalized hours.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct HourSpan {
    /// Start of the selection.
    pub start_hours: f64,
    /// End of the selection.
    pub end_hours: f64,
}

/// Emit one frame into `canvas`.
///
/// `scratch` is reused for label formatting and is left holding the readout.
pub fn render_frame<C: Canvas + ?Sized>(
    canvas: &mut C,
    config: &SliderConfig,
    span: HourSpan,
    layout: &RingLayout,
    scratch: &mut String,
) {
    render_ring(canvas, config, layout);
    render_selection(canvas, config, span, layout);
    render_icon(canvas, config, config.start_icon, span.start_hours, layout);
    render_icon(canvas, config, config.end_icon, span.end_hours, layout);
    render_major_ticks(canvas, config, layout, scratch);
    render_minor_ticks(canvas, config, layout);
    render_readout(canvas, config, span, layout, scratch);
}

fn render_ring<C: Canvas + ?Sized>(canvas: &mut C, config: &SliderConfig, layout: &RingLayout) {
    canvas.stroke_arc(
        layout.ring_arc(ARC_START_DEGREES, 360.0),
        config.ring_stroke(),
        config.border_color,
    );
}

fn render_selection<C: Canvas + ?Sized>(
    canvas: &mut C,
    config: &SliderConfig,
    span: HourSpan,
    layout: &RingLayout,
) {
    let cycle = config.hour_cycle;
    let start = ARC_START_DEGREES + span.start_hours * cycle.degrees_per_hour();
    let sweep = fill_sweep_degrees(span.start_hours, span.end_hours, cycle);
    canvas.stroke_arc(
        layout.ring_arc(start, sweep),
        config.ring_stroke(),
        config.fill_color,
    );
}

/// Position on the 12-division face of an hour value.
pub fn face_position(hours: f64, cycle: HourCycle) -> f64 {
    match cycle {
        HourCycle::Twelve => hours,
        HourCycle::TwentyFour => hours / 2.0,
    }
}

/// Square an icon for a handle at `hours` is drawn into.
pub fn icon_bounds(config: &SliderConfig, hours: f64, layout: &RingLayout) -> Rect {
    let angle = draw_angle(face_position(hours, config.hour_cycle));
    let center = layout.point_at(layout.ring_radius(), angle);
    let side = config.icon_half_width() * 2.0;
    Rect::from_center_size(center, (side, side))
}

fn render_icon<C: Canvas + ?Sized>(
    canvas: &mut C,
    config: &SliderConfig,
    icon: Option<IconId>,
    hours: f64,
    layout: &RingLayout,
) {
    if let Some(icon) = icon {
        canvas.draw_icon(icon, icon_bounds(config, hours, layout));
    }
}

/// Label of major tick `index` (`0..=11`).
pub fn major_tick_label(index: u32, cycle: HourCycle) -> u32 {
    match (cycle, index) {
        (HourCycle::TwentyFour, i) => i * 2,
        (HourCycle::Twelve, 0) => 12,
        (HourCycle::Twelve, i) => i,
    }
}

fn tick_line(layout: &RingLayout, inset: f64, degrees: f64) -> Line {
    Line::new(
        layout.point_at(layout.inner_radius(inset), degrees),
        layout.point_at(layout.inner_radius(TICK_MARGIN), degrees),
    )
}

fn render_major_ticks<C: Canvas + ?Sized>(
    canvas: &mut C,
    config: &SliderConfig,
    layout: &RingLayout,
    scratch: &mut String,
) {
    let stroke = Stroke::new(MAJOR_TICK_WIDTH).with_caps(Cap::Butt);
    let label_style = TextStyle {
        size: TICK_TEXT_SIZE,
        color: config.tick_text_color,
    };
    let label_radius =
        layout.inner_radius(MAJOR_TICK_SIZE + TICK_MARGIN + TICK_TEXT_MARGIN);
    for index in 0..MAJOR_TICK_COUNT {
        let degrees = draw_angle(f64::from(index));
        canvas.stroke_line(
            tick_line(layout, MAJOR_TICK_SIZE, degrees),
            stroke.clone(),
            config.border_color,
        );

        scratch.clear();
        let _ = write!(scratch, "{}", major_tick_label(index, config.hour_cycle));
        canvas.draw_text_centered(scratch, layout.point_at(label_radius, degrees), label_style);
    }
}

fn render_minor_ticks<C: Canvas + ?Sized>(
    canvas: &mut C,
    config: &SliderConfig,
    layout: &RingLayout,
) {
    let stroke = Stroke::new(MINOR_TICK_WIDTH).with_caps(Cap::Butt);
    for step in 1..=MINOR_TICK_COUNT {
        let degrees = draw_angle(f64::from(step) * MINOR_TICK_STEP);
        canvas.stroke_line(
            tick_line(layout, MINOR_TICK_SIZE, degrees),
            stroke.clone(),
            config.border_color,
        );
    }
}

/// Write the duration readout for `minutes` in `mode` into `out`.
///
/// Counter mode rounds half up to one decimal place of an hour.
pub fn write_readout(out: &mut String, minutes: u32, mode: MetricMode) {
    out.clear();
    let _ = match mode {
        MetricMode::Counter => {
            // Tenths of an hour are 6 minutes; adding 3 rounds half up.
            let tenths = (minutes + 3) / 6;
            write!(out, "{}.{}hr", tenths / 10, tenths % 10)
        }
        MetricMode::Clock => write!(out, "{:02}:{:02}", minutes / 60, minutes % 60),
    };
}

fn render_readout<C: Canvas + ?Sized>(
    canvas: &mut C,
    config: &SliderConfig,
    span: HourSpan,
    layout: &RingLayout,
    scratch: &mut String,
) {
    let minutes = duration_minutes(span.start_hours, span.end_hours, config.hour_cycle);
    write_readout(scratch, minutes, config.metric_mode);
    canvas.draw_text_centered(
        scratch,
        layout.center,
        TextStyle {
            size: config.metric_text_size,
            color: config.fill_color,
        },
    );
}
